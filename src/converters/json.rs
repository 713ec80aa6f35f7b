//! JSON rendering of structured documents.
//!
//! Output is pretty-printed with 2-space indentation and keeps non-ASCII text
//! as UTF-8 rather than `\u` escapes.

use crate::document::{Pages, StructuredDocument};
use crate::error::Result;

/// Render one page as `{"title": ..., "sections": [...]}`.
///
/// # Examples
///
/// ```
/// use ocr_markdown::converters::json::to_json;
/// use ocr_markdown::document::StructuredDocument;
///
/// let json = to_json(&StructuredDocument::new()).unwrap();
/// assert_eq!(json, "{\n  \"title\": \"\",\n  \"sections\": []\n}");
/// ```
pub fn to_json(doc: &StructuredDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Render several pages as `{"pages": [...]}`.
pub fn to_json_multi(pages: &[StructuredDocument]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Pages { pages })?)
}
