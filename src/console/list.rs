//! List/search controller

use crate::core::error::TransportError;
use crate::core::resource::{NameIndex, Record, RecordId, Resource};
use crate::core::service::ResourceClient;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A user-applied column sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: String,
    pub direction: SortDirection,
}

/// Owns the fetched collection and the filtered view derived from it.
///
/// `visible` is always `all` filtered by `query` and then, if a column sort
/// is active, sorted. Nothing else writes to either list.
#[derive(Debug, Clone)]
pub struct ListController<R> {
    all: Vec<Record<R>>,
    query: String,
    visible: Vec<Record<R>>,
    index: NameIndex,
    sort: Option<ColumnSort>,
}

impl<R: Resource> Default for ListController<R> {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            query: String::new(),
            visible: Vec::new(),
            index: NameIndex::new(),
            sort: None,
        }
    }
}

impl<R: Resource> ListController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Record<R>] {
        &self.all
    }

    pub fn visible(&self) -> &[Record<R>] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<&ColumnSort> {
        self.sort.as_ref()
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    /// Look a record up in the full collection
    pub fn find(&self, id: &RecordId) -> Option<&Record<R>> {
        self.all.iter().find(|r| &r.id == id)
    }

    /// Re-fetch the collection.
    ///
    /// On success `all` is replaced and any column sort is dropped. On
    /// failure both lists are left exactly as they were.
    pub async fn refresh<C>(&mut self, client: &C) -> Result<usize, TransportError>
    where
        C: ResourceClient<R> + ?Sized,
    {
        self.refresh_with(client, None).await
    }

    /// Re-fetch the collection and, only if that succeeds, install `index`
    /// alongside it. A failed fetch discards `index`.
    pub async fn refresh_with<C>(
        &mut self,
        client: &C,
        index: Option<NameIndex>,
    ) -> Result<usize, TransportError>
    where
        C: ResourceClient<R> + ?Sized,
    {
        let records = client.list().await?;
        let count = records.len();

        if let Some(index) = index {
            self.index = index;
        }
        self.all = records;
        self.sort = None;
        self.recompute();

        tracing::debug!(
            resource = R::KIND.path(),
            count,
            visible = self.visible.len(),
            "list refreshed"
        );
        Ok(count)
    }

    /// Replace the lookup used for foreign-key search keys
    pub fn set_index(&mut self, index: NameIndex) {
        self.index = index;
        self.recompute();
    }

    /// Filter `all` by a case-insensitive substring of the search keys
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    /// Sort the visible rows by a column. Returns `false`, leaving the view
    /// alone, when the resource cannot sort on that column.
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> bool {
        if !R::SORTABLE_COLUMNS.contains(&column) {
            return false;
        }

        self.sort = Some(ColumnSort {
            column: column.to_string(),
            direction,
        });
        self.recompute();
        true
    }

    /// Back to fetch order
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.recompute();
    }

    /// Number of visible rows
    pub fn count(&self) -> usize {
        self.visible.len()
    }

    /// Sum of a numeric column over the visible rows
    pub fn total(&self, column: &str) -> f64 {
        self.visible
            .iter()
            .filter_map(|r| r.data.amount(column))
            .sum()
    }

    fn recompute(&mut self) {
        let query = self.query.as_str();
        let index = &self.index;
        let mut visible: Vec<Record<R>> = self
            .all
            .iter()
            .filter(|r| r.data.matches(query, index))
            .cloned()
            .collect();

        if let Some(sort) = &self.sort {
            visible.sort_by(|a, b| {
                let ord = a
                    .data
                    .compare_by(&b.data, &sort.column)
                    .unwrap_or(Ordering::Equal);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        self.visible = visible;
    }
}
