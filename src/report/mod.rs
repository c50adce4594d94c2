//! Report generation
//!
//! Reports are built as a [`Document`] of pages and blocks from the visible
//! collection, then handed to a [`Renderer`](render::Renderer) that lays them
//! out and writes the file. Building never touches the network or the disk.

pub mod format;
pub mod render;
pub mod stats;
pub mod tabular;

pub use render::{Renderer, TextRenderer};
pub use stats::{CategoryTotal, ExpenseSummary, statistical_report};
pub use tabular::{Tabular, tabular_report};

/// One piece of page content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Text(String),
    Table {
        head: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Text(text.into()));
        self
    }

    pub fn table(mut self, head: &[&str], rows: Vec<Vec<String>>) -> Self {
        self.blocks.push(Block::Table {
            head: head.iter().map(|h| h.to_string()).collect(),
            rows,
        });
        self
    }

    /// All text and heading lines on the page
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(text) | Block::Text(text) => Some(text.as_str()),
            Block::Table { .. } => None,
        })
    }

    /// Rows of the first table on the page
    pub fn first_table(&self) -> Option<&[Vec<String>]> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table { rows, .. } => Some(rows.as_slice()),
            _ => None,
        })
    }
}

/// A paginated report, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            pages: Vec::new(),
        }
    }

    pub fn page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_builder_keeps_block_order() {
        let page = Page::new()
            .heading("Title")
            .text("line")
            .table(&["A"], vec![vec!["1".to_string()]]);

        assert_eq!(page.lines().collect::<Vec<_>>(), vec!["Title", "line"]);
        assert_eq!(page.first_table(), Some(&[vec!["1".to_string()]][..]));
    }

    #[test]
    fn test_document_pages() {
        let doc = Document::new("x_report.txt").page(Page::new()).page(Page::new());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.file_name, "x_report.txt");
    }
}
