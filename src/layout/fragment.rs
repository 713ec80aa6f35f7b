//! Recognized fragments: the engine-neutral OCR output consumed by layout analysis.

use crate::geometry::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// Minimum number of corners a fragment polygon needs.
pub const MIN_CORNERS: usize = 4;

/// One span of text as reported by an OCR engine.
///
/// Engines report boxes as quadrilaterals that need not be axis-aligned
/// (rotated or skewed scans). Fragments arrive in engine order, which says
/// nothing about reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFragment {
    /// Polygon corners, normally 4, in image pixel space
    #[serde(rename = "box")]
    pub corners: Vec<Point>,
    /// Raw recognized text, possibly empty or whitespace-only
    pub text: String,
    /// Recognition confidence in `[0, 1]`
    pub confidence: f32,
}

impl RecognizedFragment {
    /// Create a fragment from its polygon.
    pub fn new(corners: Vec<Point>, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            corners,
            text: text.into(),
            confidence,
        }
    }

    /// Create a fragment from an axis-aligned rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::layout::RecognizedFragment;
    ///
    /// let frag = RecognizedFragment::from_rect(10.0, 20.0, 110.0, 44.0, "Invoice", 0.97);
    /// assert_eq!(frag.corners.len(), 4);
    /// assert!(frag.has_text());
    /// ```
    pub fn from_rect(
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        text: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self::new(
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            text,
            confidence,
        )
    }

    /// Whether the text has any non-whitespace content.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether the polygon has enough finite corners to project.
    pub fn has_valid_geometry(&self) -> bool {
        self.corners.len() >= MIN_CORNERS && self.corners.iter().all(Point::is_finite)
    }

    /// Axis-aligned projection of the polygon, if the geometry is valid.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if !self.has_valid_geometry() {
            return None;
        }
        BoundingBox::from_points(&self.corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text() {
        assert!(RecognizedFragment::from_rect(0.0, 0.0, 1.0, 1.0, " a ", 0.5).has_text());
        assert!(!RecognizedFragment::from_rect(0.0, 0.0, 1.0, 1.0, " \t\n", 0.5).has_text());
        assert!(!RecognizedFragment::from_rect(0.0, 0.0, 1.0, 1.0, "", 0.5).has_text());
    }

    #[test]
    fn test_geometry_validation() {
        let ok = RecognizedFragment::from_rect(0.0, 0.0, 10.0, 5.0, "x", 1.0);
        assert!(ok.has_valid_geometry());
        assert_eq!(ok.bounding_box(), Some(BoundingBox::new(0, 0, 10, 5)));

        let short = RecognizedFragment::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            "x",
            1.0,
        );
        assert!(!short.has_valid_geometry());
        assert_eq!(short.bounding_box(), None);

        let mut nan = ok.clone();
        nan.corners[2].x = f32::NAN;
        assert!(!nan.has_valid_geometry());
    }

    #[test]
    fn test_serde_uses_box_key() {
        let frag = RecognizedFragment::from_rect(0.0, 0.0, 1.0, 1.0, "x", 0.9);
        let json = serde_json::to_value(&frag).unwrap();
        assert!(json.get("box").is_some());
        assert_eq!(json["text"], "x");
    }
}
