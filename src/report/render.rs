//! Document renderers

use super::{Block, Document};
use crate::core::error::ReportError;
use comfy_table::Table;
use comfy_table::presets::ASCII_FULL;
use std::path::{Path, PathBuf};

/// Separates pages in text output
pub const PAGE_BREAK: char = '\u{000C}';

/// Lays a [`Document`] out and writes it to disk
pub trait Renderer: Send + Sync {
    fn render(&self, doc: &Document) -> String;

    /// Write `<out_dir>/<file_name>`, creating `out_dir` if needed
    fn write(&self, doc: &Document, out_dir: &Path) -> Result<PathBuf, ReportError> {
        let path = out_dir.join(&doc.file_name);
        std::fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;
        std::fs::write(&path, self.render(doc)).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), pages = doc.page_count(), "report written");
        Ok(path)
    }
}

/// Plain-text layout; tables are drawn with comfy-table
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn table(head: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.load_preset(ASCII_FULL);
        table.set_header(head.to_vec());
        for row in rows {
            table.add_row(row.clone());
        }
        table.to_string()
    }
}

impl Renderer for TextRenderer {
    fn render(&self, doc: &Document) -> String {
        let total = doc.page_count();
        let mut pages = Vec::with_capacity(total);

        for (n, page) in doc.pages.iter().enumerate() {
            let mut out = String::new();
            for block in &page.blocks {
                match block {
                    Block::Heading(text) => {
                        out.push_str(text);
                        out.push('\n');
                        out.push_str(&"=".repeat(text.chars().count()));
                        out.push_str("\n\n");
                    }
                    Block::Text(text) => {
                        out.push_str(text);
                        out.push('\n');
                    }
                    Block::Table { head, rows } => {
                        out.push_str(&Self::table(head, rows));
                        out.push_str("\n\n");
                    }
                }
            }
            out.push_str(&format!("\nPage {} of {}\n", n + 1, total));
            pages.push(out);
        }

        pages.join(&format!("{}\n", PAGE_BREAK))
    }
}
