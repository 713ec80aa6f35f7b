//! Multi-page extraction: OCR engine + layout pipeline + output format.

#[cfg(feature = "preprocess")]
use crate::config::PreprocessConfig;
use crate::converters::{to_json_multi, MarkdownConverter};
use crate::document::StructuredDocument;
use crate::error::{Error, Result};
use crate::ocr::OcrEngine;
use crate::pipeline::LayoutPipeline;
use image::DynamicImage;
use std::fmt;
use std::str::FromStr;

/// Drives an OCR engine over page rasters.
pub struct DocumentExtractor<E: OcrEngine> {
    engine: E,
    pipeline: LayoutPipeline,
    #[cfg(feature = "preprocess")]
    preprocess: Option<PreprocessConfig>,
}

impl<E: OcrEngine> DocumentExtractor<E> {
    /// Create an extractor with the default layout pipeline.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            pipeline: LayoutPipeline::new(),
            #[cfg(feature = "preprocess")]
            preprocess: None,
        }
    }

    /// Use a custom layout pipeline.
    pub fn with_pipeline(mut self, pipeline: LayoutPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Preprocess each raster before recognition.
    #[cfg(feature = "preprocess")]
    pub fn with_preprocessing(mut self, config: PreprocessConfig) -> Self {
        self.preprocess = Some(config);
        self
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Recognize and reconstruct a single page.
    pub fn extract_page(&self, image: &DynamicImage) -> Result<StructuredDocument> {
        #[cfg(feature = "preprocess")]
        let prepared = match &self.preprocess {
            Some(config) => Some(crate::raster::preprocess(image, config)?),
            None => None,
        };
        #[cfg(feature = "preprocess")]
        let image = prepared.as_ref().unwrap_or(image);

        let fragments = self.engine.recognize(image)?;
        Ok(self.pipeline.process_page(&fragments))
    }

    /// Recognize and reconstruct every page, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing page and returns [`Error::Page`] carrying the
    /// 1-based page number and the original error.
    pub fn extract(&self, pages: &[DynamicImage]) -> Result<Vec<StructuredDocument>> {
        let mut documents = Vec::with_capacity(pages.len());
        for (i, image) in pages.iter().enumerate() {
            let page_no = i + 1;
            log::info!(
                "Processing page {}/{} with {}",
                page_no,
                pages.len(),
                self.engine.name()
            );
            let doc = self
                .extract_page(image)
                .map_err(|e| Error::Page {
                    page: page_no,
                    source: Box::new(e),
                })?;
            documents.push(doc);
        }
        Ok(documents)
    }
}

/// Final output format for a set of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Markdown pages joined by `---` separators
    #[default]
    Markdown,
    /// `{"pages": [...]}` JSON
    Json,
}

impl OutputFormat {
    /// Render pages with default Markdown options.
    pub fn render(&self, pages: &[StructuredDocument]) -> Result<String> {
        self.render_with(pages, &MarkdownConverter::new())
    }

    /// Render pages, using `converter` for Markdown output.
    pub fn render_with(
        &self,
        pages: &[StructuredDocument],
        converter: &MarkdownConverter,
    ) -> Result<String> {
        match self {
            OutputFormat::Markdown => Ok(converter.convert_pages(pages)),
            OutputFormat::Json => to_json_multi(pages),
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    /// Default download file name.
    pub fn default_file_name(&self) -> String {
        format!("ocr_output.{}", self.extension())
    }

    /// MIME type of the rendered output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => f.write_str("markdown"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::InvalidConfig(format!("unknown output format: {}", other))),
        }
    }
}
