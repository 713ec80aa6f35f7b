//! Vision-model OCR.
//!
//! Instead of geometric fragments, a multimodal model returns Markdown for the
//! whole page. Pages are collected under `### Page: {name}` headers.

use crate::error::{Error, Result};
use image::DynamicImage;

/// Instructions sent with every page image.
pub const OCR_PROMPT: &str = "\
### SYSTEM PROMPT ###
You are a cutting-edge OCR and Document Layout Analysis Engine designed to process scanned educational content in multiple languages, including Arabic, English, and French.

### CORE OBJECTIVE ###
Automatically detect the primary language(s) in the image and extract all text with perfect fidelity to its original visual and linguistic format.
Preserve text direction (Arabic and other RTL languages must remain RTL; English and other LTR languages remain LTR).

### DETAILED INSTRUCTIONS ###
1. Detect and recognize the language(s) automatically.
2. Extract text exactly as it appears (no translation, no correction).
3. Preserve formatting, diacritics, punctuation, bullets, lists, and structure.
4. Output only in Markdown format (GitHub-flavored).
5. For RTL text, use `<div align=\"right\">`.
6. Use borderless HTML `<table>` for multi-column layouts.
7. Replace unreadable text with `[Unreadable]`.
8. Preserve math formulas as-is using LaTeX and `$...$` / `$$...$$`.
9. Mark theorems, lemmas, proofs in bold (e.g., `**Theorem 1:**`).
10. No extra explanations or translations.
";

/// Multimodal backend turning a page image and a prompt into Markdown.
pub trait VisionOcrBackend {
    /// Transcribe `image` following `prompt`.
    fn transcribe(&self, image: &DynamicImage, prompt: &str) -> Result<String>;
}

impl<F> VisionOcrBackend for F
where
    F: Fn(&DynamicImage, &str) -> Result<String>,
{
    fn transcribe(&self, image: &DynamicImage, prompt: &str) -> Result<String> {
        self(image, prompt)
    }
}

/// Format one page's transcription under its header.
pub fn page_section(name: &str, markdown: &str) -> String {
    format!("### Page: {}\n{}\n\n", name, markdown)
}

/// Page loop over a [`VisionOcrBackend`].
///
/// # Examples
///
/// ```
/// use image::DynamicImage;
/// use ocr_markdown::ocr::VisionExtractor;
/// use ocr_markdown::Result;
///
/// let backend = |_: &DynamicImage, _: &str| -> Result<String> { Ok("## 1\nText".into()) };
/// let pages = vec![("page_1.png".to_string(), DynamicImage::new_luma8(2, 2))];
/// let md = VisionExtractor::new(backend).extract(&pages).unwrap();
/// assert_eq!(md, "### Page: page_1.png\n## 1\nText\n\n");
/// ```
pub struct VisionExtractor<B: VisionOcrBackend> {
    backend: B,
    prompt: String,
}

impl<B: VisionOcrBackend> VisionExtractor<B> {
    /// Wrap a backend using [`OCR_PROMPT`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            prompt: OCR_PROMPT.to_string(),
        }
    }

    /// Replace the prompt sent with each page.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The prompt sent with each page.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Transcribe a single page, trimming surrounding whitespace.
    pub fn extract_page(&self, image: &DynamicImage) -> Result<String> {
        Ok(self.backend.transcribe(image, &self.prompt)?.trim().to_string())
    }

    /// Transcribe named pages in order and concatenate their sections.
    ///
    /// # Errors
    ///
    /// Stops at the first failing page with [`Error::Page`].
    pub fn extract(&self, pages: &[(String, DynamicImage)]) -> Result<String> {
        let mut output = String::new();
        for (i, (name, image)) in pages.iter().enumerate() {
            log::info!("Transcribing {} ({}/{})", name, i + 1, pages.len());
            let text = self.extract_page(image).map_err(|e| Error::Page {
                page: i + 1,
                source: Box::new(e),
            })?;
            output.push_str(&page_section(name, &text));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn pages(names: &[&str]) -> Vec<(String, DynamicImage)> {
        names
            .iter()
            .map(|n| (n.to_string(), DynamicImage::new_luma8(3, 3)))
            .collect()
    }

    #[test]
    fn test_prompt_is_sent() {
        let backend = |_: &DynamicImage, prompt: &str| -> Result<String> {
            assert!(prompt.starts_with("### SYSTEM PROMPT ###"));
            assert!(prompt.contains("[Unreadable]"));
            Ok("ok".into())
        };
        VisionExtractor::new(backend).extract(&pages(&["a.png"])).unwrap();
    }

    #[test]
    fn test_pages_accumulate_in_order() {
        let calls = Cell::new(0);
        let backend = |_: &DynamicImage, _: &str| -> Result<String> {
            calls.set(calls.get() + 1);
            Ok(format!("  body {}\n", calls.get()))
        };
        let md = VisionExtractor::new(backend)
            .extract(&pages(&["p1.png", "p2.png"]))
            .unwrap();
        assert_eq!(md, "### Page: p1.png\nbody 1\n\n### Page: p2.png\nbody 2\n\n");
    }

    #[test]
    fn test_custom_prompt() {
        let backend = |_: &DynamicImage, prompt: &str| -> Result<String> { Ok(prompt.to_string()) };
        let extractor = VisionExtractor::new(backend).with_prompt("read it");
        assert_eq!(extractor.prompt(), "read it");
        assert_eq!(extractor.extract_page(&DynamicImage::new_luma8(1, 1)).unwrap(), "read it");
    }

    #[test]
    fn test_failure_names_page() {
        let backend = |image: &DynamicImage, _: &str| -> Result<String> {
            if image.width() > 5 {
                Err(Error::Ocr("rate limited".into()))
            } else {
                Ok("fine".into())
            }
        };
        let input = vec![
            ("small.png".to_string(), DynamicImage::new_luma8(2, 2)),
            ("big.png".to_string(), DynamicImage::new_luma8(10, 2)),
        ];
        let err = VisionExtractor::new(backend).extract(&input).unwrap_err();
        match err {
            Error::Page { page, source } => {
                assert_eq!(page, 2);
                assert!(matches!(*source, Error::Ocr(_)));
            },
            other => panic!("expected a page error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_pages() {
        let backend = |_: &DynamicImage, _: &str| -> Result<String> { Ok("x".into()) };
        assert_eq!(VisionExtractor::new(backend).extract(&[]).unwrap(), "");
    }
}
