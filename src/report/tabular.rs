//! Tabular reports: one row per record under a fixed header

use super::{Document, Page};
use crate::core::resource::{NameIndex, Record, Resource};
use chrono::{DateTime, Utc};

/// Rows per page before a continuation page starts
pub const ROWS_PER_PAGE: usize = 40;

/// Report layout of a resource
pub trait Tabular: Resource {
    fn report_title() -> &'static str;

    /// Header row, in display order
    fn columns() -> &'static [&'static str];

    /// Cell values for one record, same length as [`columns`](Tabular::columns)
    fn row(&self, index: &NameIndex) -> Vec<String>;

    /// The report produced by the "generate report" action
    fn report(records: &[Record<Self>], index: &NameIndex, _generated_at: DateTime<Utc>) -> Document {
        tabular_report(records, index)
    }
}

/// Dump records as a table, in input order, continuing over as many pages
/// as needed
pub fn tabular_report<R: Tabular>(records: &[Record<R>], index: &NameIndex) -> Document {
    let title = R::report_title();
    let mut doc = Document::new(R::KIND.report_file_name());

    if records.is_empty() {
        return doc.page(Page::new().heading(title).table(R::columns(), Vec::new()));
    }

    for (n, chunk) in records.chunks(ROWS_PER_PAGE).enumerate() {
        let heading = if n == 0 {
            title.to_string()
        } else {
            format!("{} (continued)", title)
        };
        let rows = chunk.iter().map(|r| r.data.row(index)).collect();
        doc = doc.page(Page::new().heading(heading).table(R::columns(), rows));
    }

    doc
}
