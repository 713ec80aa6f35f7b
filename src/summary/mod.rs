//! Chapter splitting and summaries of extracted Markdown.
//!
//! Long documents are split on ATX headings, each chapter's language is
//! detected, and a [`Summarizer`] backend produces the summary text.

pub mod chapters;
pub mod language;
pub mod summarizer;

pub use chapters::{split_chapters, Chapter};
pub use language::{detect_language, detect_language_or, DEFAULT_LANGUAGE};
pub use summarizer::{
    build_summary_prompt, safe_filename, ChapterSummarizer, Summarizer, EMPTY_SUMMARY,
    SUMMARY_PROMPT_TEMPLATE,
};
