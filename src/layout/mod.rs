//! Layout reconstruction from unordered OCR fragments.
//!
//! The stages run in this order for each page:
//! - Token normalization of each fragment's text
//! - Projection of fragments into axis-aligned [`TextBlock`]s
//! - Top-to-bottom sort and line grouping by vertical proximity
//! - Left-to-right sort within each line
//! - Rule-based classification into title, table rows and paragraphs

pub mod classifier;
pub mod fragment;
pub mod line_grouper;
pub mod normalizer;
pub mod reading_order;
pub mod text_block;

// Re-export main types
pub use classifier::{ClassificationState, LayoutClassifier, LineKind};
pub use fragment::RecognizedFragment;
pub use line_grouper::group_by_lines;
pub use normalizer::normalize;
pub use reading_order::{order_lines, sort_left_to_right, sort_top_to_bottom};
pub use text_block::{Line, TextBlock};
