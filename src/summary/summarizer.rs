//! Chapter summarization through a pluggable text-generation backend.

use crate::error::Result;
use crate::summary::chapters::{split_chapters, Chapter};
use crate::summary::language::{detect_language_or, DEFAULT_LANGUAGE};
use std::fs;
use std::path::{Path, PathBuf};

/// Instructions sent ahead of every chapter.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "\
You are an expert AI trained in summarizing academic and educational documents.

Your task is to read and summarize the provided Markdown chapter content into a **detailed and comprehensive summary**, keeping the same language as the original content.

### Guidelines:
- Use the **same language** as the original text.
- Create a **longer summary with multiple paragraphs**.
- Explain key points, important definitions, and concepts.
- Maintain logical flow and structure.
- Do **not** include headings or page numbers.
- Do **not** bullet or number anything; use paragraph form.
- Make the result easy to study from.

Only return clean, properly spaced, multi-paragraph **Markdown-formatted** text.";

/// Returned when the backend produces only whitespace.
pub const EMPTY_SUMMARY: &str = "*No summary generated.*";

/// Build the full prompt for one chapter.
pub fn build_summary_prompt(markdown: &str, lang: &str) -> String {
    format!(
        "{}\n\nLanguage: {}\n\nChapter Content:\n\n{}",
        SUMMARY_PROMPT_TEMPLATE, lang, markdown
    )
}

/// Text-generation backend (an LLM API client, a local model, a test double).
pub trait Summarizer {
    /// Generate a completion for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<F> Summarizer for F
where
    F: Fn(&str) -> Result<String>,
{
    fn generate(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

/// Chapter name reduced to characters safe in a file name.
///
/// Keeps alphanumerics, spaces, `_` and `-`, then trims trailing whitespace.
/// Falls back to `summary` when nothing is left.
pub fn safe_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let safe = safe.trim_end();
    if safe.is_empty() {
        "summary".to_string()
    } else {
        safe.to_string()
    }
}

/// Summarizes Markdown chapters and stores the results.
///
/// # Examples
///
/// ```
/// use ocr_markdown::summary::ChapterSummarizer;
/// use ocr_markdown::Result;
///
/// let backend = |prompt: &str| -> Result<String> {
///     assert!(prompt.contains("Language: en"));
///     Ok("  A short summary.  ".to_string())
/// };
/// let summarizer = ChapterSummarizer::new(backend);
/// let summary = summarizer.summarize("The cell is the unit of life.", "Biology 1").unwrap();
/// assert_eq!(summary, "A short summary.");
/// ```
pub struct ChapterSummarizer<S: Summarizer> {
    backend: S,
    default_language: &'static str,
}

impl<S: Summarizer> ChapterSummarizer<S> {
    /// Wrap a generation backend.
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            default_language: DEFAULT_LANGUAGE,
        }
    }

    /// Language reported when detection is undecidable.
    pub fn with_default_language(mut self, lang: &'static str) -> Self {
        self.default_language = lang;
        self
    }

    /// Summarize one chapter.
    ///
    /// The output is trimmed; a blank completion becomes [`EMPTY_SUMMARY`].
    pub fn summarize(&self, markdown: &str, chapter_name: &str) -> Result<String> {
        let lang = detect_language_or(markdown, self.default_language);
        log::info!("Summarizing chapter {:?} (language: {})", chapter_name, lang);

        let prompt = build_summary_prompt(markdown, lang);
        let output = self.backend.generate(&prompt)?;
        let summary = output.trim();
        if summary.is_empty() {
            log::warn!("Backend returned an empty summary for {:?}", chapter_name);
            return Ok(EMPTY_SUMMARY.to_string());
        }
        Ok(summary.to_string())
    }

    /// Split `markdown` at headings of level `max_level` or lower and summarize
    /// every chapter.
    ///
    /// The preamble chapter is named `Introduction`.
    pub fn summarize_chapters(
        &self,
        markdown: &str,
        max_level: usize,
    ) -> Result<Vec<(Chapter, String)>> {
        split_chapters(markdown, max_level)
            .into_iter()
            .map(|chapter| {
                let name = if chapter.is_preamble() {
                    "Introduction"
                } else {
                    chapter.title.as_str()
                };
                let summary = self.summarize(&chapter.body, name)?;
                Ok((chapter, summary))
            })
            .collect()
    }

    /// Write `text` to `{dir}/{safe_name}_summary.md`, creating `dir` if needed.
    pub fn save(&self, dir: impl AsRef<Path>, chapter_name: &str, text: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_summary.md", safe_filename(chapter_name)));
        fs::write(&path, text)?;
        log::debug!("Saved summary to {}", path.display());
        Ok(path)
    }
}
