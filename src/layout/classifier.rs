//! Line classification into title, table rows and paragraphs.
//!
//! Classification is greedy and single-pass. Each line is tested against the
//! rules in a fixed order and the first match wins:
//!
//! 1. **Title**: no title yet and the space-joined text is longer than
//!    `title_min_chars` characters. The line is consumed.
//! 2. **Table row**: the line has at least `table_min_columns` blocks. The row
//!    extends a trailing table section or opens a new one.
//! 3. **Paragraph**: anything else.
//!
//! There is no lookahead. Paragraphs are never merged and a table closed by a
//! paragraph is never re-opened.

use crate::config::LayoutConfig;
use crate::document::StructuredDocument;
use crate::layout::text_block::Line;

/// Outcome of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The line became the document title
    Title,
    /// The line was appended as a table row
    TableRow,
    /// The line became a paragraph section
    Paragraph,
}

/// Per-page classification state.
///
/// A fresh state is created for each page; nothing is shared between pages.
#[derive(Debug, Default)]
pub struct ClassificationState {
    title_set: bool,
    document: StructuredDocument,
}

impl ClassificationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a title has been assigned.
    pub fn title_set(&self) -> bool {
        self.title_set
    }

    /// Document built so far.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }

    /// Finish and return the document.
    pub fn into_document(self) -> StructuredDocument {
        self.document
    }
}

/// Rule-based line classifier.
#[derive(Debug, Clone, Default)]
pub struct LayoutClassifier {
    config: LayoutConfig,
}

impl LayoutClassifier {
    /// Create a classifier using the thresholds from `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Classify ordered lines into a document.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_markdown::geometry::BoundingBox;
    /// use ocr_markdown::layout::{LayoutClassifier, Line, TextBlock};
    /// use ocr_markdown::document::Section;
    ///
    /// let block = |t: &str, x: i32| TextBlock::new(t, BoundingBox::new(x, 0, x + 40, 20), 1.0);
    /// let lines = vec![
    ///     Line::new(vec![block("Quarterly", 0)]),
    ///     Line::new(vec![block("Name", 0), block("Age", 100)]),
    ///     Line::new(vec![block("Ali", 0), block("10", 100)]),
    /// ];
    /// let doc = LayoutClassifier::default().classify(&lines);
    /// assert_eq!(doc.title, "Quarterly");
    /// assert_eq!(doc.sections.len(), 1);
    /// assert!(matches!(&doc.sections[0], Section::Table(rows) if rows.len() == 2));
    /// ```
    pub fn classify(&self, lines: &[Line]) -> StructuredDocument {
        let mut state = ClassificationState::new();
        for line in lines {
            self.classify_line(&mut state, line);
        }
        state.into_document()
    }

    /// Classify one line, updating `state`.
    ///
    /// Returns `None` for an empty line, which contributes nothing.
    pub fn classify_line(&self, state: &mut ClassificationState, line: &Line) -> Option<LineKind> {
        if line.is_empty() {
            return None;
        }

        let texts = line.texts();
        let joined = texts.join(" ");

        let kind = if !state.title_set && joined.chars().count() > self.config.title_min_chars {
            state.document.title = joined;
            state.title_set = true;
            LineKind::Title
        } else if line.len() >= self.config.table_min_columns {
            state.document.push_table_row(texts);
            LineKind::TableRow
        } else {
            state.document.push_paragraph(joined);
            LineKind::Paragraph
        };

        log::trace!("Line with {} block(s) classified as {:?}", line.len(), kind);
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Section;
    use crate::geometry::BoundingBox;
    use crate::layout::text_block::TextBlock;

    fn make_line(texts: &[&str]) -> Line {
        Line::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let x = i as i32 * 100;
                    TextBlock::new(*t, BoundingBox::new(x, 0, x + 50, 20), 0.9)
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_input() {
        let doc = LayoutClassifier::default().classify(&[]);
        assert_eq!(doc, StructuredDocument::new());
    }

    #[test]
    fn test_title_then_growing_table() {
        let classifier = LayoutClassifier::default();
        let mut state = ClassificationState::new();

        classifier.classify_line(&mut state, &make_line(&["Document Title Here"]));
        assert_eq!(state.document().title, "Document Title Here");
        assert!(state.document().sections.is_empty());

        classifier.classify_line(&mut state, &make_line(&["Name", "Age"]));
        assert_eq!(
            state.document().sections,
            vec![Section::Table(vec![vec!["Name".into(), "Age".into()]])]
        );

        classifier.classify_line(&mut state, &make_line(&["Ali", "10"]));
        assert_eq!(
            state.into_document().sections,
            vec![Section::Table(vec![
                vec!["Name".into(), "Age".into()],
                vec!["Ali".into(), "10".into()],
            ])]
        );
    }

    #[test]
    fn test_single_block_after_title() {
        let doc = LayoutClassifier::default().classify(&[
            make_line(&["Document Title Here"]),
            make_line(&["Just a paragraph."]),
        ]);
        assert_eq!(doc.title, "Document Title Here");
        assert_eq!(doc.sections, vec![Section::Paragraph("Just a paragraph.".into())]);
    }

    #[test]
    fn test_title_requires_more_than_five_chars() {
        let classifier = LayoutClassifier::default();
        let doc = classifier.classify(&[make_line(&["Hello"])]);
        assert_eq!(doc.title, "");
        assert_eq!(doc.sections, vec![Section::Paragraph("Hello".into())]);

        let doc = classifier.classify(&[make_line(&["Hello!"])]);
        assert_eq!(doc.title, "Hello!");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        // 5 Arabic letters are 10 bytes but only 5 characters
        let doc = LayoutClassifier::default().classify(&[make_line(&["مرحبا"])]);
        assert_eq!(doc.title, "");
    }

    #[test]
    fn test_multi_block_line_can_be_title() {
        let doc = LayoutClassifier::default().classify(&[make_line(&["Annual", "Report"])]);
        assert_eq!(doc.title, "Annual Report");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_title_is_set_only_once() {
        let doc = LayoutClassifier::default().classify(&[
            make_line(&["First title"]),
            make_line(&["Second long line"]),
        ]);
        assert_eq!(doc.title, "First title");
        assert_eq!(doc.sections, vec![Section::Paragraph("Second long line".into())]);
    }

    #[test]
    fn test_short_two_block_line_before_title_is_table() {
        // "a b" is too short for a title and falls through to the table rule
        let doc = LayoutClassifier::default().classify(&[make_line(&["a", "b"])]);
        assert_eq!(doc.title, "");
        assert_eq!(
            doc.sections,
            vec![Section::Table(vec![vec!["a".into(), "b".into()]])]
        );
    }

    #[test]
    fn test_table_run_and_break() {
        let doc = LayoutClassifier::default().classify(&[
            make_line(&["Document"]),
            make_line(&["Name", "Age"]),
            make_line(&["Ali", "10"]),
            make_line(&["note"]),
            make_line(&["x", "y"]),
        ]);
        assert_eq!(doc.title, "Document");
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].rows().map(<[_]>::len), Some(2));
        assert_eq!(doc.sections[1], Section::Paragraph("note".into()));
        assert_eq!(doc.sections[2].rows().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_line_kinds_are_reported() {
        let classifier = LayoutClassifier::default();
        let mut state = ClassificationState::new();
        assert_eq!(
            classifier.classify_line(&mut state, &make_line(&["Heading"])),
            Some(LineKind::Title)
        );
        assert!(state.title_set());
        assert_eq!(
            classifier.classify_line(&mut state, &make_line(&["a", "b"])),
            Some(LineKind::TableRow)
        );
        assert_eq!(
            classifier.classify_line(&mut state, &make_line(&["c"])),
            Some(LineKind::Paragraph)
        );
        assert_eq!(classifier.classify_line(&mut state, &Line::default()), None);
        assert_eq!(state.document().sections.len(), 2);
    }

    #[test]
    fn test_configurable_thresholds() {
        let config = LayoutConfig::new()
            .with_title_min_chars(20)
            .with_table_min_columns(3);
        let doc = LayoutClassifier::new(config).classify(&[
            make_line(&["Short title"]),
            make_line(&["two", "cells"]),
            make_line(&["one", "two", "three"]),
        ]);
        assert_eq!(doc.title, "");
        assert_eq!(doc.sections[0], Section::Paragraph("Short title".into()));
        assert_eq!(doc.sections[1], Section::Paragraph("two cells".into()));
        assert!(doc.sections[2].is_table());
    }
}
