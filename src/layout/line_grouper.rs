//! Group blocks into text lines by vertical proximity.

use crate::layout::text_block::{Line, TextBlock};

/// Cluster blocks into lines with a single scan.
///
/// `blocks` must already be sorted by ascending `center_y`
/// (see [`sort_top_to_bottom`](crate::layout::reading_order::sort_top_to_bottom)).
/// A block joins the current line when its `center_y` is strictly within
/// `y_threshold` of the *previous block's* `center_y`; otherwise the current
/// line is closed and a new one starts. Comparing against the previous block
/// rather than a line centroid lets a long line drift by up to `y_threshold`
/// per step.
///
/// Every input block ends up in exactly one line and no line is empty.
///
/// # Examples
///
/// ```
/// use ocr_markdown::geometry::BoundingBox;
/// use ocr_markdown::layout::{group_by_lines, TextBlock};
///
/// let blocks = vec![
///     TextBlock::new("Name", BoundingBox::new(0, 0, 40, 20), 1.0),
///     TextBlock::new("Age", BoundingBox::new(80, 4, 110, 24), 1.0),
///     TextBlock::new("Ali", BoundingBox::new(0, 60, 30, 80), 1.0),
/// ];
/// let lines = group_by_lines(blocks, 24.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].texts(), vec!["Name", "Age"]);
/// ```
pub fn group_by_lines(blocks: Vec<TextBlock>, y_threshold: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current_line: Vec<TextBlock> = Vec::new();
    let mut previous_y: Option<f32> = None;

    for block in blocks {
        let y = block.center_y;
        let same_line = match previous_y {
            None => true,
            Some(prev) => (y - prev).abs() < y_threshold,
        };

        if !same_line {
            lines.push(Line::new(std::mem::take(&mut current_line)));
        }
        current_line.push(block);
        previous_y = Some(y);
    }

    if !current_line.is_empty() {
        lines.push(Line::new(current_line));
    }

    log::trace!("Grouped blocks into {} line(s)", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    /// Block whose center_y is exactly `cy`.
    fn block_at(text: &str, x: i32, cy: i32) -> TextBlock {
        TextBlock::new(text, BoundingBox::new(x, cy - 10, x + 30, cy + 10), 1.0)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_lines(vec![], 24.0).is_empty());
    }

    #[test]
    fn test_single_block() {
        let lines = group_by_lines(vec![block_at("only", 0, 10)], 24.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].texts(), vec!["only"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Difference of exactly 24 starts a new line
        let lines = group_by_lines(vec![block_at("a", 0, 10), block_at("b", 0, 34)], 24.0);
        assert_eq!(lines.len(), 2);

        let lines = group_by_lines(vec![block_at("a", 0, 10), block_at("b", 0, 33)], 24.0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_drift_follows_previous_block() {
        // Each step is 20px apart: under the threshold pairwise, 60px end to end
        let blocks = vec![
            block_at("a", 0, 0),
            block_at("b", 40, 20),
            block_at("c", 80, 40),
            block_at("d", 120, 60),
        ];
        let lines = group_by_lines(blocks, 24.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
    }

    #[test]
    fn test_preserves_block_order_within_line() {
        let blocks = vec![block_at("right", 200, 10), block_at("left", 0, 12)];
        let lines = group_by_lines(blocks, 24.0);
        // Grouping does not reorder; left-to-right sorting is a separate pass
        assert_eq!(lines[0].texts(), vec!["right", "left"]);
    }

    #[test]
    fn test_multiple_lines() {
        let blocks = vec![
            block_at("t1", 0, 10),
            block_at("t2", 50, 15),
            block_at("m", 0, 100),
            block_at("b1", 0, 200),
            block_at("b2", 60, 205),
        ];
        let lines = group_by_lines(blocks, 24.0);
        let sizes: Vec<_> = lines.iter().map(Line::len).collect();
        assert_eq!(sizes, vec![2, 1, 2]);
    }
}
