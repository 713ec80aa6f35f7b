//! Tesseract adapter.
//!
//! Tesseract reports words, not lines. [`parse_tesseract_tsv`] reads the
//! `image_to_data` TSV table and [`merge_words_into_lines`] folds words that
//! share a `(page, block, paragraph, line)` key into one fragment per line.

use crate::config::parse_language_list;
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::layout::fragment::RecognizedFragment;
use crate::ocr::{OcrEngine, RawOcrBackend};
use image::{DynamicImage, ImageFormat};
use indexmap::IndexMap;
use std::io::{Cursor, Write};
use std::process::{Command, Stdio};

/// Number of leading numeric columns in a TSV row.
const NUMERIC_COLUMNS: usize = 11;

/// One word from Tesseract TSV output.
#[derive(Debug, Clone, PartialEq)]
pub struct TesseractWord {
    /// Page number
    pub page: u32,
    /// Block number within the page
    pub block: u32,
    /// Paragraph number within the block
    pub paragraph: u32,
    /// Line number within the paragraph
    pub line: u32,
    /// Word box
    pub bbox: BoundingBox,
    /// Confidence scaled to `[0, 1]`; Tesseract's `-1` maps to 0
    pub confidence: f32,
    /// Word text, already trimmed
    pub text: String,
}

impl TesseractWord {
    /// Grouping key identifying the word's line.
    pub fn line_key(&self) -> (u32, u32, u32, u32) {
        (self.page, self.block, self.paragraph, self.line)
    }
}

/// Parse `image_to_data` TSV output.
///
/// Columns: `level page_num block_num par_num line_num word_num left top width
/// height conf text`. The header row and blank lines are skipped, and so are
/// rows whose text is blank (page, block, paragraph and line records).
///
/// # Errors
///
/// Returns [`Error::Parse`] with the 1-based line number when a row has too
/// few columns or a non-numeric field.
pub fn parse_tesseract_tsv(raw: &str) -> Result<Vec<TesseractWord>> {
    let mut words = Vec::new();

    for (idx, row) in raw.lines().enumerate() {
        let line_no = idx + 1;
        if row.trim().is_empty() || row.starts_with("level") {
            continue;
        }

        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < NUMERIC_COLUMNS {
            return Err(Error::Parse {
                line: line_no,
                reason: format!("expected at least {} columns, got {}", NUMERIC_COLUMNS, fields.len()),
            });
        }

        let text = fields.get(NUMERIC_COLUMNS).map_or("", |t| t.trim());
        if text.is_empty() {
            continue;
        }

        let int = |i: usize| -> Result<i64> {
            fields[i].trim().parse::<i64>().map_err(|e| Error::Parse {
                line: line_no,
                reason: format!("column {}: {}", i + 1, e),
            })
        };
        let conf: f32 = fields[10].trim().parse().map_err(|e| Error::Parse {
            line: line_no,
            reason: format!("confidence: {}", e),
        })?;

        let (left, top, width, height) = (int(6)?, int(7)?, int(8)?, int(9)?);
        words.push(TesseractWord {
            page: int(1)? as u32,
            block: int(2)? as u32,
            paragraph: int(3)? as u32,
            line: int(4)? as u32,
            bbox: BoundingBox::new(
                left as i32,
                top as i32,
                (left + width) as i32,
                (top + height) as i32,
            ),
            confidence: (conf / 100.0).clamp(0.0, 1.0),
            text: text.to_string(),
        });
    }

    Ok(words)
}

/// Merge words into one fragment per Tesseract line.
///
/// Lines are emitted in the order their first word appears. Each fragment
/// carries the union box of its words, the space-joined text and the mean
/// word confidence.
///
/// # Examples
///
/// ```
/// use ocr_markdown::ocr::{merge_words_into_lines, parse_tesseract_tsv};
///
/// let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
///            5\t1\t1\t1\t1\t1\t10\t10\t40\t20\t90\tHello\n\
///            5\t1\t1\t1\t1\t2\t60\t10\t50\t20\t80\tworld\n";
/// let lines = merge_words_into_lines(&parse_tesseract_tsv(tsv).unwrap());
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].text, "Hello world");
/// ```
pub fn merge_words_into_lines(words: &[TesseractWord]) -> Vec<RecognizedFragment> {
    let mut groups: IndexMap<(u32, u32, u32, u32), Vec<&TesseractWord>> = IndexMap::new();
    for word in words {
        groups.entry(word.line_key()).or_default().push(word);
    }

    groups
        .into_values()
        .filter_map(|group| {
            let first = group.first()?;
            let bbox = group.iter().skip(1).fold(first.bbox, |acc, w| acc.union(&w.bbox));
            let text = group
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let confidence = group.iter().map(|w| w.confidence).sum::<f32>() / group.len() as f32;
            Some(RecognizedFragment::new(bbox.corners().to_vec(), text, confidence))
        })
        .collect()
}

/// Tesseract engine backed by a raw TSV-producing backend.
pub struct Tesseract<B: RawOcrBackend> {
    backend: B,
    merge_lines: bool,
}

impl<B: RawOcrBackend> Tesseract<B> {
    /// Wrap a backend returning `image_to_data` TSV.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            merge_lines: true,
        }
    }

    /// Emit word-level fragments instead of merged lines.
    pub fn with_word_fragments(mut self) -> Self {
        self.merge_lines = false;
        self
    }
}

impl<B: RawOcrBackend> OcrEngine for Tesseract<B> {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<Vec<RecognizedFragment>> {
        let words = parse_tesseract_tsv(&self.backend.run(image)?)?;
        if self.merge_lines {
            Ok(merge_words_into_lines(&words))
        } else {
            Ok(words
                .into_iter()
                .map(|w| RecognizedFragment::new(w.bbox.corners().to_vec(), w.text, w.confidence))
                .collect())
        }
    }
}

/// Runs the `tesseract` command-line tool, feeding the image as PNG on stdin.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    /// Path to the binary (default `tesseract`, resolved through `PATH`)
    pub binary: String,
    /// Language codes joined with `+` on the command line
    pub languages: Vec<String>,
    /// Page segmentation mode (default 6: a single uniform block of text)
    pub psm: u8,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            languages: vec!["eng".to_string()],
            psm: 6,
        }
    }
}

impl TesseractCli {
    /// Create a runner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recognition languages from a `+`, comma or space separated
    /// list such as `"eng+fra+ara"`. An empty list keeps the current languages.
    pub fn with_languages(mut self, languages: &str) -> Self {
        let parsed = parse_language_list(languages);
        if !parsed.is_empty() {
            self.languages = parsed;
        }
        self
    }

    /// Command-line arguments, excluding the binary.
    pub fn args(&self) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.languages.join("+"),
            "--oem".to_string(),
            "3".to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
            "tsv".to_string(),
        ]
    }
}

impl RawOcrBackend for TesseractCli {
    fn run(&self, image: &DynamicImage) -> Result<String> {
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;

        let mut child = Command::new(&self.binary)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Ocr(format!("failed to run {}: {}", self.binary, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(png.get_ref())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::Ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        log::debug!("tesseract produced {} bytes of TSV", output.stdout.len());
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn make_tsv(rows: &[&str]) -> String {
        let mut tsv = HEADER.to_string();
        for row in rows {
            tsv.push('\n');
            tsv.push_str(row);
        }
        tsv
    }

    #[test]
    fn test_parse_skips_structural_rows() {
        let tsv = make_tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t800\t600\t-1\t",
            "4\t1\t1\t1\t1\t0\t10\t10\t200\t20\t-1\t",
            "5\t1\t1\t1\t1\t1\t10\t10\t40\t20\t96.5\tTotal",
        ]);
        let words = parse_tesseract_tsv(&tsv).unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Total");
        assert_eq!(words[0].bbox, BoundingBox::new(10, 10, 50, 30));
        assert!((words[0].confidence - 0.965).abs() < 1e-5);
    }

    #[test]
    fn test_negative_confidence_maps_to_zero() {
        let tsv = make_tsv(&["5\t1\t1\t1\t1\t1\t0\t0\t5\t5\t-1\tx"]);
        assert_eq!(parse_tesseract_tsv(&tsv).unwrap()[0].confidence, 0.0);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let tsv = make_tsv(&["5\t1\t1"]);
        assert!(matches!(
            parse_tesseract_tsv(&tsv),
            Err(Error::Parse { line: 2, .. })
        ));

        let tsv = make_tsv(&["5\t1\t1\t1\t1\t1\tleft\t0\t5\t5\t90\tx"]);
        assert!(matches!(
            parse_tesseract_tsv(&tsv),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let tsv = make_tsv(&[
            "5\t1\t1\t1\t2\t1\t10\t50\t30\t20\t80\tsecond",
            "5\t1\t1\t1\t1\t1\t10\t10\t30\t20\t90\tfirst",
            "5\t1\t1\t1\t2\t2\t50\t52\t30\t20\t60\tline",
        ]);
        let fragments = merge_words_into_lines(&parse_tesseract_tsv(&tsv).unwrap());
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "second line");
        assert_eq!(fragments[1].text, "first");
        assert!((fragments[0].confidence - 0.7).abs() < 1e-5);
        assert_eq!(fragments[0].bounding_box(), Some(BoundingBox::new(10, 50, 80, 72)));
    }

    #[test]
    fn test_engine_word_mode() {
        let tsv = make_tsv(&[
            "5\t1\t1\t1\t1\t1\t10\t10\t30\t20\t90\ta",
            "5\t1\t1\t1\t1\t2\t50\t10\t30\t20\t90\tb",
        ]);
        let image = DynamicImage::new_luma8(2, 2);

        let backend = {
            let tsv = tsv.clone();
            move |_: &DynamicImage| -> Result<String> { Ok(tsv.clone()) }
        };
        let merged = Tesseract::new(backend).recognize(&image).unwrap();
        assert_eq!(merged.len(), 1);

        let words = Tesseract::new(move |_: &DynamicImage| -> Result<String> { Ok(tsv.clone()) })
            .with_word_fragments()
            .recognize(&image)
            .unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_cli_args() {
        let cli = TesseractCli::new().with_languages("eng, ara");
        let args = cli.args();
        assert_eq!(args[0], "stdin");
        assert!(args.contains(&"eng+ara".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("tsv"));

        let cli = TesseractCli::new().with_languages("  ");
        assert_eq!(cli.languages, vec!["eng"]);
    }
}
