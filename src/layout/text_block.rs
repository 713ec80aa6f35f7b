//! Text blocks and lines.
//!
//! A [`TextBlock`] is a fragment after normalization and axis-aligned
//! projection. A [`Line`] is a run of blocks judged to share a text row.

use crate::error::{Error, Result};
use crate::geometry::{point_extent, BoundingBox};
use crate::layout::fragment::RecognizedFragment;
use crate::layout::normalizer::normalize;

/// A normalized fragment with axis-aligned geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Normalized text, never empty
    pub text: String,
    /// Confidence carried over from the fragment
    pub confidence: f32,
    /// Integer bounding box
    pub bbox: BoundingBox,
    /// Horizontal midpoint of the unrounded extent (ordering only)
    pub center_x: f32,
    /// Vertical midpoint of the unrounded extent (ordering only)
    pub center_y: f32,
}

impl TextBlock {
    /// Build a block from a recognized fragment.
    ///
    /// Returns `Ok(None)` when the fragment has no text after stripping, and
    /// [`Error::InvalidGeometry`] when its polygon has fewer than four corners
    /// or non-finite coordinates. When `normalize_text` is set the stripped text
    /// is passed through the token normalizer.
    pub fn from_fragment(
        fragment: &RecognizedFragment,
        normalize_text: bool,
    ) -> Result<Option<TextBlock>> {
        let stripped = fragment.text.trim();
        if stripped.is_empty() {
            return Ok(None);
        }

        if !fragment.has_valid_geometry() {
            return Err(Error::InvalidGeometry(format!(
                "fragment {:?} has {} corner(s), need 4 finite points",
                stripped,
                fragment.corners.len()
            )));
        }
        let (x0, y0, x1, y1) = point_extent(&fragment.corners)
            .ok_or_else(|| Error::InvalidGeometry(format!("fragment {:?}", stripped)))?;

        let text = if normalize_text {
            normalize(stripped).trim().to_string()
        } else {
            stripped.to_string()
        };
        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(TextBlock {
            text,
            confidence: fragment.confidence,
            bbox: BoundingBox::new(x0 as i32, y0 as i32, x1 as i32, y1 as i32),
            center_x: (x0 + x1) / 2.0,
            center_y: (y0 + y1) / 2.0,
        }))
    }

    /// Create a block directly from an integer box (tests, synthetic input).
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            center_x: (bbox.min_x + bbox.max_x) as f32 / 2.0,
            center_y: (bbox.min_y + bbox.max_y) as f32 / 2.0,
            bbox,
        }
    }
}

/// Blocks sharing one text row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    blocks: Vec<TextBlock>,
}

impl Line {
    /// Wrap blocks into a line, keeping their order.
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Blocks in their current order.
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Consume the line and return its blocks.
    pub fn into_blocks(self) -> Vec<TextBlock> {
        self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the line has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block texts in order.
    pub fn texts(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.text.clone()).collect()
    }

    /// Block texts joined by single spaces.
    pub fn joined_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<TextBlock> {
        &mut self.blocks
    }
}
