//! Configuration for layout reconstruction and output.
//!
//! Every heuristic threshold used by the layout core is a named field here,
//! with defaults that reproduce the reference output byte for byte.

use crate::error::{Error, Result};

/// Default maximum vertical distance (pixels) between consecutive block centers
/// on the same line.
pub const DEFAULT_Y_THRESHOLD: f32 = 24.0;

/// Default title length: a line becomes the title when its joined text is
/// strictly longer than this many characters.
pub const DEFAULT_TITLE_MIN_CHARS: usize = 5;

/// Default number of blocks a line needs to be treated as a table row.
pub const DEFAULT_TABLE_MIN_COLUMNS: usize = 2;

/// Separator placed between pages in multi-page Markdown output.
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Layout reconstruction configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Maximum |Δcenter_y| between consecutive blocks that share a line.
    pub y_threshold: f32,

    /// A line is the title when its space-joined text has more characters
    /// than this (strict comparison).
    pub title_min_chars: usize,

    /// Minimum blocks per line for the line to be a table row.
    pub table_min_columns: usize,

    /// Apply the URL/email token normalizer to each fragment.
    ///
    /// The normalizer turns whitespace runs into dots, which is right for
    /// URL-like tokens and wrong for prose. Disable for prose-heavy scans.
    pub normalize_text: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a configuration with the reference defaults.
    pub fn new() -> Self {
        Self {
            y_threshold: DEFAULT_Y_THRESHOLD,
            title_min_chars: DEFAULT_TITLE_MIN_CHARS,
            table_min_columns: DEFAULT_TABLE_MIN_COLUMNS,
            normalize_text: true,
        }
    }

    /// Set the line grouping threshold.
    pub fn with_y_threshold(mut self, y_threshold: f32) -> Self {
        self.y_threshold = y_threshold;
        self
    }

    /// Set the title length threshold.
    pub fn with_title_min_chars(mut self, chars: usize) -> Self {
        self.title_min_chars = chars;
        self
    }

    /// Set the minimum number of blocks for a table row.
    pub fn with_table_min_columns(mut self, columns: usize) -> Self {
        self.table_min_columns = columns;
        self
    }

    /// Enable or disable token normalization.
    pub fn with_text_normalization(mut self, enable: bool) -> Self {
        self.normalize_text = enable;
        self
    }

    /// Check that the configuration can drive the classifier.
    ///
    /// `table_min_columns` below 2 would let single-block lines become table
    /// rows, leaving the paragraph rule unreachable.
    pub fn validate(&self) -> Result<()> {
        if !self.y_threshold.is_finite() || self.y_threshold <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "y_threshold must be a positive number, got {}",
                self.y_threshold
            )));
        }
        if self.table_min_columns < 2 {
            return Err(Error::InvalidConfig(format!(
                "table_min_columns must be at least 2, got {}",
                self.table_min_columns
            )));
        }
        Ok(())
    }
}

/// How a table whose first row has a single cell is rendered to Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleColumnTableMode {
    /// Always render a pipe table (`| a |` + `| --- |`).
    #[default]
    PipeTable,
    /// Render the single header cell as a bare line with no separator row.
    /// Remaining rows are still rendered pipe-delimited.
    BareLine,
}

/// Markdown rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownOptions {
    /// Rendering of tables with a one-cell first row
    pub single_column_tables: SingleColumnTableMode,
    /// Literal inserted between pages
    pub page_separator: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            single_column_tables: SingleColumnTableMode::default(),
            page_separator: PAGE_SEPARATOR.to_string(),
        }
    }
}

impl MarkdownOptions {
    /// Set the single-column table mode.
    pub fn with_single_column_tables(mut self, mode: SingleColumnTableMode) -> Self {
        self.single_column_tables = mode;
        self
    }
}

/// Raster preprocessing parameters applied before OCR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Adaptive threshold neighbourhood size in pixels (odd, >= 3)
    pub block_size: u32,
    /// Denoising strength; larger removes more speckle
    pub denoise_strength: u32,
    /// Resize factor in percent applied before thresholding (100 = unchanged)
    pub upscale_percent: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            block_size: 11,
            denoise_strength: 30,
            upscale_percent: 100,
        }
    }
}

impl PreprocessConfig {
    /// Settings tuned for Tesseract: 150% upscale and a wider threshold window.
    pub fn tesseract() -> Self {
        Self {
            block_size: 31,
            denoise_strength: 30,
            upscale_percent: 150,
        }
    }

    /// Set the adaptive threshold block size.
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "block_size must be odd and >= 3, got {}",
                self.block_size
            )));
        }
        if self.upscale_percent == 0 {
            return Err(Error::InvalidConfig("upscale_percent must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Split a Tesseract-style language string (`"eng+fra+ara"`) into codes.
pub fn parse_language_list(codes: &str) -> Vec<String> {
    codes.split(['+', ',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.y_threshold, 24.0);
        assert_eq!(config.title_min_chars, 5);
        assert_eq!(config.table_min_columns, 2);
        assert!(config.normalize_text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layout_builder() {
        let config = LayoutConfig::new()
            .with_y_threshold(10.0)
            .with_title_min_chars(8)
            .with_table_min_columns(3)
            .with_text_normalization(false);
        assert_eq!(config.y_threshold, 10.0);
        assert_eq!(config.title_min_chars, 8);
        assert_eq!(config.table_min_columns, 3);
        assert!(!config.normalize_text);
    }

    #[test]
    fn test_layout_validate_rejects_bad_values() {
        assert!(LayoutConfig::new().with_y_threshold(0.0).validate().is_err());
        assert!(LayoutConfig::new().with_y_threshold(f32::NAN).validate().is_err());
        assert!(LayoutConfig::new().with_table_min_columns(1).validate().is_err());
    }

    #[test]
    fn test_markdown_options_default() {
        let opts = MarkdownOptions::default();
        assert_eq!(opts.single_column_tables, SingleColumnTableMode::PipeTable);
        assert_eq!(opts.page_separator, "\n\n---\n\n");
    }

    #[test]
    fn test_preprocess_validate() {
        assert!(PreprocessConfig::default().validate().is_ok());
        assert!(PreprocessConfig::tesseract().validate().is_ok());
        assert!(PreprocessConfig::default().with_block_size(10).validate().is_err());
        assert!(PreprocessConfig::default().with_block_size(1).validate().is_err());
    }

    #[test]
    fn test_parse_language_list() {
        assert_eq!(parse_language_list("eng+fra+ara"), vec!["eng", "fra", "ara"]);
        assert_eq!(parse_language_list(" ar, en "), vec!["ar", "en"]);
        assert!(parse_language_list("").is_empty());
    }
}
