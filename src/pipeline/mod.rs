//! Page reconstruction pipeline.
//!
//! ```text
//! RecognizedFragment[] (engine order)
//!     ↓
//! [TextBlock::from_fragment] (strip, normalize, project; malformed skipped)
//!     ↓
//! [sort_top_to_bottom] + [group_by_lines]
//!     ↓
//! [order_lines] (left-to-right within each line)
//!     ↓
//! [LayoutClassifier]
//!     ↓
//! StructuredDocument
//! ```
//!
//! [`DocumentExtractor`] runs an OCR engine over page rasters and feeds each
//! page through a [`LayoutPipeline`].
//!
//! [TextBlock::from_fragment]: crate::layout::TextBlock::from_fragment
//! [sort_top_to_bottom]: crate::layout::sort_top_to_bottom
//! [group_by_lines]: crate::layout::group_by_lines
//! [order_lines]: crate::layout::order_lines
//! [LayoutClassifier]: crate::layout::LayoutClassifier

pub mod extractor;

pub use extractor::{DocumentExtractor, OutputFormat};

use crate::config::LayoutConfig;
use crate::document::StructuredDocument;
use crate::layout::{
    group_by_lines, order_lines, sort_top_to_bottom, LayoutClassifier, RecognizedFragment,
    TextBlock,
};

/// Layout reconstruction for single pages.
///
/// Holds no per-page state; every call to [`process_page`](Self::process_page)
/// starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct LayoutPipeline {
    config: LayoutConfig,
    classifier: LayoutClassifier,
}

impl LayoutPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            classifier: LayoutClassifier::new(config.clone()),
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Convert fragments into blocks, dropping blank and malformed ones.
    pub fn build_blocks(&self, fragments: &[RecognizedFragment]) -> Vec<TextBlock> {
        let mut blocks = Vec::with_capacity(fragments.len());
        for (index, fragment) in fragments.iter().enumerate() {
            match TextBlock::from_fragment(fragment, self.config.normalize_text) {
                Ok(Some(block)) => blocks.push(block),
                Ok(None) => {},
                Err(e) => {
                    log::warn!("Skipping fragment {}: {}", index, e);
                },
            }
        }
        blocks
    }

    /// Reconstruct the structure of one page.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::layout::RecognizedFragment;
    /// use ocr_markdown::pipeline::LayoutPipeline;
    ///
    /// let fragments = vec![
    ///     RecognizedFragment::from_rect(0.0, 100.0, 40.0, 120.0, "Ali", 0.9),
    ///     RecognizedFragment::from_rect(0.0, 0.0, 200.0, 30.0, "Student List", 0.9),
    ///     RecognizedFragment::from_rect(90.0, 101.0, 120.0, 121.0, "10", 0.9),
    /// ];
    /// let doc = LayoutPipeline::new()
    ///     .with_text_normalization(false)
    ///     .process_page(&fragments);
    /// assert_eq!(doc.title, "Student List");
    /// assert_eq!(doc.sections.len(), 1);
    /// ```
    pub fn process_page(&self, fragments: &[RecognizedFragment]) -> StructuredDocument {
        let mut blocks = self.build_blocks(fragments);
        let kept = blocks.len();

        sort_top_to_bottom(&mut blocks);
        let lines = order_lines(group_by_lines(blocks, self.config.y_threshold));
        let line_count = lines.len();

        let doc = self.classifier.classify(&lines);
        log::debug!(
            "Page: {} fragment(s), {} block(s), {} line(s), {} section(s)",
            fragments.len(),
            kept,
            line_count,
            doc.sections.len()
        );
        doc
    }

    /// Shorthand for toggling text normalization on this pipeline.
    pub fn with_text_normalization(self, enable: bool) -> Self {
        Self::with_config(self.config.with_text_normalization(enable))
    }
}
