//! Reading order: lines top-to-bottom, blocks within a line left-to-right.
//!
//! Both passes use stable sorts so that ties keep the engine's relative order
//! and repeated runs produce identical output.

use crate::layout::text_block::{Line, TextBlock};
use crate::utils::cmp_coord;

/// Sort blocks by ascending vertical center.
///
/// Blocks with equal `center_y` keep their input order.
pub fn sort_top_to_bottom(blocks: &mut [TextBlock]) {
    blocks.sort_by(|a, b| cmp_coord(a.center_y, b.center_y));
}

/// Sort the blocks of one line by ascending left edge.
pub fn sort_left_to_right(line: &mut Line) {
    line.blocks_mut().sort_by_key(|b| b.bbox.min_x);
}

/// Apply left-to-right ordering to every line.
pub fn order_lines(mut lines: Vec<Line>) -> Vec<Line> {
    for line in &mut lines {
        sort_left_to_right(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn make_block(text: &str, x: i32, y: i32) -> TextBlock {
        TextBlock::new(text, BoundingBox::new(x, y, x + 40, y + 20), 1.0)
    }

    #[test]
    fn test_top_to_bottom() {
        let mut blocks = vec![
            make_block("Bottom", 0, 200),
            make_block("Top", 0, 10),
            make_block("Middle", 0, 100),
        ];
        sort_top_to_bottom(&mut blocks);
        let texts: Vec<_> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Top", "Middle", "Bottom"]);
    }

    #[test]
    fn test_equal_centers_keep_input_order() {
        let mut blocks = vec![
            make_block("first", 300, 50),
            make_block("second", 0, 50),
            make_block("third", 150, 50),
        ];
        sort_top_to_bottom(&mut blocks);
        let texts: Vec<_> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_left_to_right_on_same_line() {
        let mut line = Line::new(vec![
            make_block("Right", 200, 0),
            make_block("Left", 0, 3),
            make_block("Center", 100, 1),
        ]);
        sort_left_to_right(&mut line);
        assert_eq!(line.texts(), vec!["Left", "Center", "Right"]);
    }

    #[test]
    fn test_order_lines_sorts_every_line() {
        let lines = vec![
            Line::new(vec![make_block("b", 50, 0), make_block("a", 0, 0)]),
            Line::new(vec![make_block("d", 90, 40), make_block("c", 10, 40)]),
        ];
        let ordered = order_lines(lines);
        assert_eq!(ordered[0].texts(), vec!["a", "b"]);
        assert_eq!(ordered[1].texts(), vec!["c", "d"]);
    }
}
