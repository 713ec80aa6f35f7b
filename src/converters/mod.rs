//! Output converters for structured documents.
//!
//! - **Markdown**: ATX title, blank-line paragraphs, GFM pipe tables
//! - **JSON**: direct structural dump of the document model
//! - **Cleanup**: post-processing helpers for Markdown tables and labels
//!
//! # Examples
//!
//! ```
//! use ocr_markdown::converters::{to_json, MarkdownConverter};
//! use ocr_markdown::document::StructuredDocument;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = StructuredDocument::new();
//! doc.title = "Invoice".to_string();
//! doc.push_table_row(vec!["Item".into(), "Qty".into()]);
//!
//! let markdown = MarkdownConverter::new().convert(&doc);
//! assert!(markdown.contains("| Item | Qty |"));
//!
//! let json = to_json(&doc)?;
//! assert!(json.contains("\"table\""));
//! # Ok(())
//! # }
//! ```

pub mod cleanup;
pub mod json;
pub mod markdown;

// Re-export main types
pub use cleanup::{bold_theorem_labels, clean_markdown_table};
pub use json::{to_json, to_json_multi};
pub use markdown::MarkdownConverter;
