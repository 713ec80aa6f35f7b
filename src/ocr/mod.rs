//! OCR engine adapters.
//!
//! Every engine is reduced to the same interface: an image goes in and a list
//! of [`RecognizedFragment`]s comes out, in engine order. Engine-specific
//! output formats are parsed by the adapters in this module:
//!
//! - [`easyocr`]: `readtext(detail=1)` JSON, `[[box, text, conf], ...]`
//! - [`paddle`]: PaddleOCR JSON, `[[box, [text, conf]], ...]`
//! - [`tesseract`]: `image_to_data` TSV, merged into line fragments
//!
//! Adapters wrap a [`RawOcrBackend`], the process or binding that actually
//! executes the engine and returns its raw textual output.
//!
//! [`vision`] covers multimodal models that return Markdown directly and skip
//! layout reconstruction.

pub mod easyocr;
pub mod paddle;
pub mod tesseract;
pub mod vision;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::layout::fragment::RecognizedFragment;
use image::DynamicImage;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub use easyocr::{parse_easyocr_json, EasyOcr};
pub use paddle::{parse_paddle_json, PaddleOcr};
pub use tesseract::{merge_words_into_lines, parse_tesseract_tsv, Tesseract, TesseractCli, TesseractWord};
pub use vision::{page_section, VisionExtractor, VisionOcrBackend, OCR_PROMPT};

/// An OCR engine producing fragments for one raster.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier (e.g. `"easyocr"`, `"tesseract"`).
    fn name(&self) -> &'static str;

    /// Recognize text in `image`.
    ///
    /// The returned order is the engine's and carries no reading-order meaning.
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>>;
}

/// Executes an engine and returns its raw output (JSON or TSV text).
pub trait RawOcrBackend: Send + Sync {
    /// Run the engine on `image`.
    fn run(&self, image: &DynamicImage) -> Result<String>;
}

impl<F> RawOcrBackend for F
where
    F: Fn(&DynamicImage) -> Result<String> + Send + Sync,
{
    fn run(&self, image: &DynamicImage) -> Result<String> {
        self(image)
    }
}

/// Supported raw output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// EasyOCR JSON
    EasyOcr,
    /// PaddleOCR JSON
    Paddle,
    /// Tesseract TSV
    Tesseract,
}

impl EngineKind {
    /// Engine identifier.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::EasyOcr => "easyocr",
            EngineKind::Paddle => "paddle",
            EngineKind::Tesseract => "tesseract",
        }
    }

    /// Parse raw engine output into fragments.
    ///
    /// Tesseract output is merged into line-level fragments.
    pub fn parse_output(&self, raw: &str) -> Result<Vec<RecognizedFragment>> {
        match self {
            EngineKind::EasyOcr => parse_easyocr_json(raw),
            EngineKind::Paddle => parse_paddle_json(raw),
            EngineKind::Tesseract => Ok(merge_words_into_lines(&parse_tesseract_tsv(raw)?)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easyocr" | "easy" => Ok(EngineKind::EasyOcr),
            "paddle" | "paddleocr" => Ok(EngineKind::Paddle),
            "tesseract" => Ok(EngineKind::Tesseract),
            other => Err(Error::InvalidConfig(format!("unknown OCR engine: {}", other))),
        }
    }
}

/// Convert a JSON box (`[[x, y], ...]`) into points.
///
/// The box must be an array of arrays. Coordinates that are missing or not
/// numbers become NaN so the fragment is skipped later during layout analysis.
pub(crate) fn parse_box(value: &Value, index: usize) -> Result<Vec<Point>> {
    let points = value.as_array().ok_or_else(|| Error::InvalidFragment {
        index,
        reason: format!("box is not a list of points: {}", value),
    })?;

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let coords = point.as_array().ok_or_else(|| Error::InvalidFragment {
                index,
                reason: format!("box point {} is not a coordinate pair: {}", i, point),
            })?;
            let coord = |n: usize| {
                coords
                    .get(n)
                    .and_then(Value::as_f64)
                    .map_or(f32::NAN, |v| v as f32)
            };
            Ok(Point::new(coord(0), coord(1)))
        })
        .collect()
}

/// Read a confidence value. Missing or non-numeric values count as 0.0.
pub(crate) fn parse_confidence(value: Option<&Value>, index: usize) -> f32 {
    match value.and_then(Value::as_f64) {
        Some(c) => c as f32,
        None => {
            log::warn!("OCR entry {}: confidence is missing or not a number, using 0", index);
            0.0
        },
    }
}

/// Read a text value. Returns `None` (and the entry is dropped) unless it is a string.
pub(crate) fn parse_text(value: Option<&Value>, index: usize) -> Option<String> {
    let text = value.and_then(Value::as_str).map(str::to_string);
    if text.is_none() {
        log::warn!("Skipping OCR entry {}: text is missing or not a string", index);
    }
    text
}
