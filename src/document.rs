//! Structured document model produced by layout classification.
//!
//! A page becomes one [`StructuredDocument`]: an optional title followed by an
//! ordered list of [`Section`]s. The serde representation is the JSON output
//! format:
//!
//! ```json
//! {
//!   "title": "Report",
//!   "sections": [
//!     { "paragraph": "Intro" },
//!     { "table": [["Name", "Age"], ["Ali", "10"]] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// One table row: cell strings in left-to-right order.
pub type TableRow = Vec<String>;

/// A block of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Free text from a single-block line
    Paragraph(String),
    /// Contiguous run of multi-block lines
    Table(Vec<TableRow>),
}

impl Section {
    /// Whether this section is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Section::Table(_))
    }

    /// Rows of a table section, `None` for paragraphs.
    pub fn rows(&self) -> Option<&[TableRow]> {
        match self {
            Section::Table(rows) => Some(rows),
            Section::Paragraph(_) => None,
        }
    }
}

/// Reconstructed structure of one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Page title, empty when no line qualified
    pub title: String,
    /// Content sections in reading order
    pub sections: Vec<Section>,
}

impl StructuredDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document has neither a title nor sections.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.sections.is_empty()
    }

    /// Append a paragraph section.
    pub fn push_paragraph(&mut self, text: impl Into<String>) {
        self.sections.push(Section::Paragraph(text.into()));
    }

    /// Append a table row.
    ///
    /// The row extends the last section when that section is a table;
    /// otherwise a new table section is opened. A table closed by a paragraph
    /// is never re-opened.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::document::StructuredDocument;
    ///
    /// let mut doc = StructuredDocument::new();
    /// doc.push_table_row(vec!["Name".into(), "Age".into()]);
    /// doc.push_table_row(vec!["Ali".into(), "10".into()]);
    /// doc.push_paragraph("Notes");
    /// doc.push_table_row(vec!["x".into(), "y".into()]);
    /// assert_eq!(doc.sections.len(), 3);
    /// ```
    pub fn push_table_row(&mut self, row: TableRow) {
        match self.sections.last_mut() {
            Some(Section::Table(rows)) => rows.push(row),
            _ => self.sections.push(Section::Table(vec![row])),
        }
    }

    /// Iterate over table sections only.
    pub fn tables(&self) -> impl Iterator<Item = &[TableRow]> {
        self.sections.iter().filter_map(Section::rows)
    }

    /// Pad every table row with empty cells up to the widest row of its table.
    ///
    /// Optional cleanup before serialization; rows are never truncated.
    pub fn rectangularize_tables(&mut self) {
        for section in &mut self.sections {
            if let Section::Table(rows) = section {
                let width = rows.iter().map(Vec::len).max().unwrap_or(0);
                for row in rows.iter_mut() {
                    row.resize(width, String::new());
                }
            }
        }
    }
}

/// Borrowed multi-page wrapper serialized as `{"pages": [...]}`.
#[derive(Debug, Serialize)]
pub(crate) struct Pages<'a> {
    pub pages: &'a [StructuredDocument],
}
