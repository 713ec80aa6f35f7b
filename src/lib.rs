//! # OCR Markdown
//!
//! Layout reconstruction for OCR output: turns the flat, unordered fragments an
//! OCR engine reports for a scanned page into a structured document (title,
//! paragraphs, tables) and renders it as Markdown or JSON.
//!
//! ## Core Features
//!
//! - **Token Normalization**: repairs URL and email artifacts (`httpsII`, split
//!   domains, spaced separators)
//! - **Line Grouping**: clusters fragments into rows by vertical proximity
//! - **Reading Order**: stable top-to-bottom, left-to-right ordering
//! - **Classification**: greedy title / table row / paragraph rules
//! - **Output**: ATX Markdown with GFM pipe tables, or pretty JSON
//! - **Engines**: EasyOCR, PaddleOCR and Tesseract output adapters
//! - **Summaries**: chapter splitting and LLM-backed chapter summaries
//!
//! ## Architecture
//!
//! ```text
//! OCR engine → RecognizedFragment[] → TextBlock[] → Line[] → StructuredDocument
//!                                                              ↓
//!                                                    Markdown / JSON
//! ```
//!
//! The layout core is deterministic and purely geometric. Each page is
//! processed independently with fresh state.
//!
//! ## Quick Start
//!
//! ```
//! use ocr_markdown::layout::RecognizedFragment;
//! use ocr_markdown::{process_page, to_json, to_markdown};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fragments = vec![
//!     RecognizedFragment::from_rect(0.0, 0.0, 200.0, 30.0, "Document", 0.99),
//!     RecognizedFragment::from_rect(0.0, 60.0, 50.0, 80.0, "Name", 0.95),
//!     RecognizedFragment::from_rect(100.0, 61.0, 140.0, 81.0, "Age", 0.95),
//!     RecognizedFragment::from_rect(0.0, 100.0, 40.0, 120.0, "Ali", 0.93),
//!     RecognizedFragment::from_rect(100.0, 99.0, 120.0, 119.0, "10", 0.97),
//! ];
//!
//! let doc = process_page(&fragments);
//! assert_eq!(
//!     to_markdown(&doc),
//!     "# Document\n| Name | Age |\n| --- | --- |\n| Ali | 10 |"
//! );
//! assert!(to_json(&doc)?.contains("\"table\""));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(test, allow(dead_code))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and layout analysis
pub mod geometry;
pub mod layout;

// Document model
pub mod document;

// Format converters
pub mod converters;

// OCR engine adapters
pub mod ocr;

// Raster input and preprocessing
pub mod raster;

// Page and document pipeline
pub mod pipeline;

// Chapter splitting and summaries
pub mod summary;

// Re-exports
pub use config::{LayoutConfig, MarkdownOptions, SingleColumnTableMode};
pub use document::{Section, StructuredDocument};
pub use error::{Error, Result};
pub use layout::RecognizedFragment;
pub use pipeline::{DocumentExtractor, LayoutPipeline, OutputFormat};

/// Reconstruct one page with the default configuration.
pub fn process_page(ocr_results: &[RecognizedFragment]) -> StructuredDocument {
    LayoutPipeline::new().process_page(ocr_results)
}

/// Render one page as Markdown with default options.
pub fn to_markdown(doc: &StructuredDocument) -> String {
    converters::MarkdownConverter::new().convert(doc)
}

/// Render one page as JSON.
pub fn to_json(doc: &StructuredDocument) -> Result<String> {
    converters::to_json(doc)
}

/// Render pages as Markdown joined by `\n\n---\n\n`.
pub fn to_markdown_multi(pages: &[StructuredDocument]) -> String {
    converters::MarkdownConverter::new().convert_pages(pages)
}

/// Render pages as `{"pages": [...]}` JSON.
pub fn to_json_multi(pages: &[StructuredDocument]) -> Result<String> {
    converters::to_json_multi(pages)
}

// Internal utilities
pub(crate) mod utils {
    use std::cmp::Ordering;

    /// Total order on page coordinates with NaN sorted after every number.
    ///
    /// Block centers come from OCR boxes and can be NaN when a coordinate was
    /// missing, so sorting by them must never panic.
    #[inline]
    pub fn cmp_coord(a: f32, b: f32) -> Ordering {
        a.partial_cmp(&b).unwrap_or_else(|| b.is_nan().cmp(&a.is_nan()).reverse())
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
