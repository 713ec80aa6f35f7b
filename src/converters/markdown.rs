//! Markdown rendering of structured documents.
//!
//! Output layout per page:
//! - `# ` + title on the first line (a bare `# ` when there is no title)
//! - each paragraph surrounded by blank lines
//! - each table as a GFM pipe table whose separator row has one `---` per
//!   cell of the first row; later rows are emitted as given, without padding
//!   or truncation
//!
//! Pages are joined with [`MarkdownOptions::page_separator`].

use crate::config::{MarkdownOptions, SingleColumnTableMode};
use crate::document::{Section, StructuredDocument, TableRow};

/// Converter from [`StructuredDocument`] to Markdown.
///
/// # Examples
///
/// ```
/// use ocr_markdown::converters::MarkdownConverter;
/// use ocr_markdown::document::StructuredDocument;
///
/// let mut doc = StructuredDocument::new();
/// doc.title = "Report".to_string();
/// doc.push_paragraph("Summary");
///
/// let markdown = MarkdownConverter::new().convert(&doc);
/// assert_eq!(markdown, "# Report\n\nSummary\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: MarkdownOptions,
}

impl MarkdownConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with explicit options.
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Render one page.
    pub fn convert(&self, doc: &StructuredDocument) -> String {
        let mut lines = vec![format!("# {}", doc.title)];

        for section in &doc.sections {
            match section {
                Section::Paragraph(text) => {
                    lines.push(format!("\n{}\n", text));
                },
                Section::Table(rows) => {
                    self.render_table(rows, &mut lines);
                },
            }
        }

        lines.join("\n")
    }

    /// Render several pages joined by the page separator.
    pub fn convert_pages(&self, pages: &[StructuredDocument]) -> String {
        pages
            .iter()
            .map(|page| self.convert(page))
            .collect::<Vec<_>>()
            .join(&self.options.page_separator)
    }

    fn render_table(&self, rows: &[TableRow], lines: &mut Vec<String>) {
        let Some((header, body)) = rows.split_first() else {
            return;
        };

        if header.len() == 1 && self.options.single_column_tables == SingleColumnTableMode::BareLine
        {
            lines.push(header[0].clone());
        } else {
            lines.push(pipe_row(header));
            lines.push(separator_row(header.len()));
        }

        lines.extend(body.iter().map(|row| pipe_row(row)));
    }
}

/// `| a | b |`
fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// `| --- | --- |` with one `---` per column.
fn separator_row(columns: usize) -> String {
    format!("| {} |", vec!["---"; columns].join(" | "))
}
