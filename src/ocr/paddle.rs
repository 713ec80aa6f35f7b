//! PaddleOCR adapter.

use crate::error::{Error, Result};
use crate::layout::fragment::RecognizedFragment;
use crate::ocr::{parse_box, parse_confidence, parse_text, OcrEngine, RawOcrBackend};
use image::DynamicImage;
use serde_json::Value;

/// Parse PaddleOCR `ocr()` output serialized as JSON.
///
/// Each entry is `[box, [text, confidence]]`. PaddleOCR returns one list per
/// input image; when the outer list wraps such per-image lists the first one
/// is used. A `null` page (no text detected) yields no fragments. Entries
/// without a `[text, confidence]` pair or with non-string text are skipped,
/// and a missing confidence reads as 0.0.
///
/// # Errors
///
/// [`Error::InvalidFragment`] when the output is not a list, or when a box is
/// not a list of points.
///
/// # Examples
///
/// ```
/// use ocr_markdown::ocr::parse_paddle_json;
///
/// let raw = r#"[[[[[0,0],[50,0],[50,20],[0,20]], ["مرحبا", 0.91]]]]"#;
/// let fragments = parse_paddle_json(raw).unwrap();
/// assert_eq!(fragments[0].text, "مرحبا");
/// ```
pub fn parse_paddle_json(raw: &str) -> Result<Vec<RecognizedFragment>> {
    let value: Value = serde_json::from_str(raw)?;
    let outer = value.as_array().ok_or_else(|| Error::InvalidFragment {
        index: 0,
        reason: "PaddleOCR output is not a list".to_string(),
    })?;

    let entries = match outer.first() {
        None => return Ok(Vec::new()),
        Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(first)) if !is_entry(first) => first,
        Some(_) => outer,
    };

    let mut fragments = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_array() else {
            log::warn!("Skipping OCR entry {}: not a [box, [text, confidence]] list", index);
            continue;
        };
        let corners = parse_box(fields.first().unwrap_or(&Value::Null), index)?;
        let Some(recognition) = fields.get(1).and_then(Value::as_array) else {
            log::warn!("Skipping OCR entry {}: missing [text, confidence] pair", index);
            continue;
        };
        let Some(text) = parse_text(recognition.first(), index) else {
            continue;
        };
        let confidence = parse_confidence(recognition.get(1), index);
        fragments.push(RecognizedFragment::new(corners, text, confidence));
    }
    Ok(fragments)
}

/// Whether `fields` looks like a single `[box, [text, conf]]` entry.
fn is_entry(fields: &[Value]) -> bool {
    fields
        .get(1)
        .and_then(Value::as_array)
        .and_then(|pair| pair.first())
        .is_some_and(Value::is_string)
}

/// PaddleOCR engine backed by a raw JSON-producing backend.
pub struct PaddleOcr<B: RawOcrBackend> {
    backend: B,
}

impl<B: RawOcrBackend> PaddleOcr<B> {
    /// Wrap a backend returning PaddleOCR JSON.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: RawOcrBackend> OcrEngine for PaddleOcr<B> {
    fn name(&self) -> &'static str {
        "paddle"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>> {
        parse_paddle_json(&self.backend.run(image)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY_A: &str = r#"[[[0,0],[40,0],[40,20],[0,20]], ["Name", 0.9]]"#;
    const ENTRY_B: &str = r#"[[[80,0],[110,0],[110,20],[80,20]], ["Age", 0.8]]"#;

    #[test]
    fn test_flat_list() {
        let raw = format!("[{}, {}]", ENTRY_A, ENTRY_B);
        let fragments = parse_paddle_json(&raw).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Name");
        assert!((fragments[1].confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_wrapped_list_uses_first_image() {
        let raw = format!("[[{}, {}], [{}]]", ENTRY_A, ENTRY_B, ENTRY_A);
        let fragments = parse_paddle_json(&raw).unwrap();
        assert_eq!(fragments.len(), 2);
    }

    #[test]
    fn test_bad_entry_does_not_drop_page() {
        let raw = format!(
            r#"[{}, [[[0,40],[9,40],[9,60],[0,60]], ["score", "high"]], [[[0,70],[9,70],[9,90],[0,90]], [null, 0.4]], {}]"#,
            ENTRY_A, ENTRY_B
        );
        let fragments = parse_paddle_json(&raw).unwrap();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["Name", "score", "Age"]);
        assert_eq!(fragments[1].confidence, 0.0);
    }

    #[test]
    fn test_empty_pages() {
        assert!(parse_paddle_json("[]").unwrap().is_empty());
        assert!(parse_paddle_json("[null]").unwrap().is_empty());
        assert!(parse_paddle_json("[[]]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_entries() {
        assert!(parse_paddle_json(r#"[[[[0,0],[1,0],[1,1],[0,1]], "no pair"]]"#)
            .unwrap()
            .is_empty());
        assert!(matches!(
            parse_paddle_json(r#"[["bad box", ["x", 0.5]]]"#),
            Err(Error::InvalidFragment { index: 0, .. })
        ));
    }
}
