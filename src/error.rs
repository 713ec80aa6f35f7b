//! Error types for OCR layout reconstruction.
//!
//! The layout core (normalization, grouping, classification, serialization) is
//! infallible. These errors surface at the seams: raw OCR payload adapters,
//! raster decoding, configuration validation and the summarization backend.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning OCR output into documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A raw OCR entry whose shape cannot describe a fragment at all
    /// (for example a box that is not a sequence of points).
    #[error("Invalid OCR fragment at index {index}: {reason}")]
    InvalidFragment {
        /// Position of the entry in the raw OCR result list
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// Fragment geometry could not be projected onto an axis-aligned box
    #[error("Invalid fragment geometry: {0}")]
    InvalidGeometry(String),

    /// Parse error in a line-oriented input (Tesseract TSV, results files)
    #[error("Failed to parse line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or processing error
    #[error("Image error: {0}")]
    Image(String),

    /// OCR engine failure
    #[error("OCR error: {0}")]
    Ocr(String),

    /// PDF to raster conversion failure
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// Summarization backend failure
    #[error("Summarizer error: {0}")]
    Summarizer(String),

    /// Failure while processing one page of a multi-page document
    #[error("page {page}: {source}")]
    Page {
        /// 1-based page number
        page: usize,
        /// Underlying error
        source: Box<Error>,
    },
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_fragment_error() {
        let err = Error::InvalidFragment {
            index: 3,
            reason: "box is not a list of points".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("index 3"));
        assert!(msg.contains("not a list of points"));
    }

    #[test]
    fn test_parse_error() {
        let err = Error::Parse {
            line: 12,
            reason: "expected 12 columns".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("line 12"));
        assert!(msg.contains("12 columns"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{}", err).starts_with("JSON error"));
    }

    #[test]
    fn test_page_error_keeps_cause() {
        let err = Error::Page {
            page: 4,
            source: Box::new(Error::InvalidConfig("block_size must be odd".into())),
        };
        assert_eq!(
            err.to_string(),
            "page 4: Invalid configuration: block_size must be odd"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Invalid configuration: block_size must be odd"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
