//! EasyOCR adapter.

use crate::error::{Error, Result};
use crate::layout::fragment::RecognizedFragment;
use crate::ocr::{parse_box, parse_confidence, parse_text, OcrEngine, RawOcrBackend};
use image::DynamicImage;
use serde_json::Value;

/// Parse `reader.readtext(detail=1)` output serialized as JSON.
///
/// Expected shape: `[[box, text, confidence], ...]` where `box` is a list of
/// `[x, y]` points. Entries that are not lists or whose text is not a string
/// are skipped, and a missing confidence reads as 0.0.
///
/// # Errors
///
/// [`Error::InvalidFragment`] when the output is not a list, or when a box is
/// not a list of points.
///
/// # Examples
///
/// ```
/// use ocr_markdown::ocr::parse_easyocr_json;
///
/// let raw = r#"[[[[0,0],[50,0],[50,20],[0,20]], "Name", 0.98]]"#;
/// let fragments = parse_easyocr_json(raw).unwrap();
/// assert_eq!(fragments[0].text, "Name");
/// ```
pub fn parse_easyocr_json(raw: &str) -> Result<Vec<RecognizedFragment>> {
    let value: Value = serde_json::from_str(raw)?;
    let entries = value.as_array().ok_or_else(|| Error::InvalidFragment {
        index: 0,
        reason: "EasyOCR output is not a list".to_string(),
    })?;

    let mut fragments = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_array() else {
            log::warn!("Skipping OCR entry {}: not a [box, text, confidence] list", index);
            continue;
        };
        let corners = parse_box(fields.first().unwrap_or(&Value::Null), index)?;
        let Some(text) = parse_text(fields.get(1), index) else {
            continue;
        };
        let confidence = parse_confidence(fields.get(2), index);
        fragments.push(RecognizedFragment::new(corners, text, confidence));
    }
    Ok(fragments)
}

/// EasyOCR engine backed by a raw JSON-producing backend.
pub struct EasyOcr<B: RawOcrBackend> {
    backend: B,
}

impl<B: RawOcrBackend> EasyOcr<B> {
    /// Wrap a backend returning EasyOCR JSON.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: RawOcrBackend> OcrEngine for EasyOcr<B> {
    fn name(&self) -> &'static str {
        "easyocr"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>> {
        parse_easyocr_json(&self.backend.run(image)?)
    }
}
