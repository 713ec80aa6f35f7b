//! Rebuild document structure from saved OCR results.
//!
//! Each input file holds the raw output of one OCR engine run for one page:
//! EasyOCR or PaddleOCR JSON, or Tesseract `image_to_data` TSV. Pages are
//! reconstructed in argument order and written as Markdown or JSON.
//!
//! Usage:
//!   cargo run --release --bin ocr_to_markdown -- page1.json page2.json
//!   cargo run --release --bin ocr_to_markdown -- --engine tesseract --format json scan.tsv
//!   cargo run --release --bin ocr_to_markdown -- --output out.md --single-column bare page.json

use ocr_markdown::config::{LayoutConfig, MarkdownOptions, SingleColumnTableMode};
use ocr_markdown::converters::MarkdownConverter;
use ocr_markdown::ocr::EngineKind;
use ocr_markdown::{Error, LayoutPipeline, OutputFormat, Result};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: ocr_to_markdown [OPTIONS] <FILE>...

Options:
  --engine <easyocr|paddle|tesseract>  Format of the input files (default: easyocr)
  --format <markdown|json>             Output format (default: markdown)
  --output <PATH>                      Write to PATH instead of stdout
  --y-threshold <PIXELS>               Line grouping threshold (default: 24)
  --single-column <pipe|bare>          Rendering of one-column tables (default: pipe)
  --no-normalize                       Keep fragment text as recognized
  --verbose, -v                        Print per-page progress
  --help, -h                           Show this message";

struct CliConfig {
    inputs: Vec<PathBuf>,
    engine: EngineKind,
    format: OutputFormat,
    output: Option<PathBuf>,
    layout: LayoutConfig,
    single_column: SingleColumnTableMode,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Option<Self>> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            inputs: Vec::new(),
            engine: EngineKind::EasyOcr,
            format: OutputFormat::Markdown,
            output: None,
            layout: LayoutConfig::default(),
            single_column: SingleColumnTableMode::default(),
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--engine" => {
                    config.engine = value_of(&args, &mut i)?.parse()?;
                },
                "--format" => {
                    config.format = value_of(&args, &mut i)?.parse()?;
                },
                "--output" | "-o" => {
                    config.output = Some(PathBuf::from(value_of(&args, &mut i)?));
                },
                "--y-threshold" => {
                    let raw = value_of(&args, &mut i)?;
                    let threshold: f32 = raw.parse().map_err(|_| {
                        Error::InvalidConfig(format!("--y-threshold expects a number, got {}", raw))
                    })?;
                    config.layout = config.layout.with_y_threshold(threshold);
                },
                "--single-column" => {
                    config.single_column = match value_of(&args, &mut i)? {
                        "pipe" => SingleColumnTableMode::PipeTable,
                        "bare" => SingleColumnTableMode::BareLine,
                        other => {
                            return Err(Error::InvalidConfig(format!(
                                "--single-column expects pipe or bare, got {}",
                                other
                            )));
                        },
                    };
                },
                "--no-normalize" => {
                    config.layout = config.layout.with_text_normalization(false);
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                "--help" | "-h" => {
                    return Ok(None);
                },
                flag if flag.starts_with("--") => {
                    return Err(Error::InvalidConfig(format!("unknown option {}", flag)));
                },
                path => {
                    config.inputs.push(PathBuf::from(path));
                },
            }
            i += 1;
        }

        if config.inputs.is_empty() {
            return Err(Error::InvalidConfig("no input files".to_string()));
        }
        config.layout.validate()?;
        Ok(Some(config))
    }
}

/// Advance past a flag and return its value.
fn value_of<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidConfig(format!("{} requires a value", flag)))
}

fn run(config: &CliConfig) -> Result<()> {
    let pipeline = LayoutPipeline::with_config(config.layout.clone());
    let mut pages = Vec::with_capacity(config.inputs.len());

    for (idx, path) in config.inputs.iter().enumerate() {
        let raw = fs::read_to_string(path)?;
        let fragments = config.engine.parse_output(&raw)?;
        let doc = pipeline.process_page(&fragments);
        if config.verbose {
            eprintln!(
                "[{}/{}] {}: {} fragment(s) -> {} section(s)",
                idx + 1,
                config.inputs.len(),
                path.display(),
                fragments.len(),
                doc.sections.len()
            );
        }
        pages.push(doc);
    }

    let converter = MarkdownConverter::with_options(
        MarkdownOptions::default().with_single_column_tables(config.single_column),
    );
    let rendered = config.format.render_with(&pages, &converter)?;

    match &config.output {
        Some(path) => {
            fs::write(path, rendered)?;
            if config.verbose {
                eprintln!("Wrote {} page(s) to {}", pages.len(), path.display());
            }
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        },
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
