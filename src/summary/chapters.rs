//! Split Markdown into chapters on ATX headings.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ATX heading with non-empty text; optional closing hashes are dropped
    static ref RE_ATX_HEADING: Regex = Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)[ \t]*#*[ \t]*$").unwrap();

    /// Start or end of a fenced code block
    static ref RE_FENCE: Regex = Regex::new(r"^ {0,3}(```|~~~)").unwrap();
}

/// One chapter of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Heading level (1-6), or 0 for text before the first heading
    pub level: usize,
    /// Heading text, empty for the preamble
    pub title: String,
    /// Content between this heading and the next chapter heading
    pub body: String,
}

impl Chapter {
    /// Whether this chapter holds text found before any heading.
    pub fn is_preamble(&self) -> bool {
        self.level == 0
    }
}

/// Split `markdown` into chapters at headings of level `max_level` or lower.
///
/// Deeper headings stay inside the body of the enclosing chapter, as do page
/// separators. Headings inside fenced code blocks are ignored. Text before the
/// first heading becomes a preamble chapter when it is not blank, and
/// headings with no text (a bare `#`) are treated as body text.
///
/// # Examples
///
/// ```
/// use ocr_markdown::summary::split_chapters;
///
/// let md = "intro\n# One\nalpha\n## Detail\nbeta\n# Two\ngamma";
/// let chapters = split_chapters(md, 1);
/// assert_eq!(chapters.len(), 3);
/// assert!(chapters[0].is_preamble());
/// assert_eq!(chapters[1].title, "One");
/// assert_eq!(chapters[1].body, "alpha\n## Detail\nbeta");
/// ```
pub fn split_chapters(markdown: &str, max_level: usize) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    let mut current = Chapter {
        level: 0,
        title: String::new(),
        body: String::new(),
    };
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        if RE_FENCE.is_match(line) {
            in_fence = !in_fence;
            body_lines.push(line);
            continue;
        }

        let heading = if in_fence {
            None
        } else {
            RE_ATX_HEADING.captures(line).and_then(|caps| {
                let level = caps[1].len();
                let title = caps[2].trim();
                (level <= max_level && !title.is_empty()).then(|| (level, title.to_string()))
            })
        };

        match heading {
            Some((level, title)) => {
                current.body = join_body(&body_lines);
                if !current.is_preamble() || !current.body.trim().is_empty() {
                    chapters.push(current);
                }
                current = Chapter {
                    level,
                    title,
                    body: String::new(),
                };
                body_lines.clear();
            },
            None => body_lines.push(line),
        }
    }

    current.body = join_body(&body_lines);
    if !current.is_preamble() || !current.body.trim().is_empty() {
        chapters.push(current);
    }

    chapters
}

/// Join lines and drop leading/trailing blank lines.
fn join_body(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}
