use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use super::convert::PdfConverter;
use super::parser::{CompositeParser, DocumentFormat, ParseError, ParsedDocument, Parser};
use crate::extract::ReportExtractor;
use crate::record::ExtractedEntities;
use crate::report::{DocumentInfo, ExtractionReport};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Setting this environment variable (to any non-empty value) skips the
/// best-effort PDF conversion step.
pub const SKIP_PDF_ENV: &str = "SKIP_PDF_CONVERSION";

/// Document-to-report pipeline: obtain text, run the extractor, assemble the
/// report. PDF conversion rides along but can never fail the run.
pub struct ExtractionPipeline {
    parser: Box<dyn Parser>,
    extractor: ReportExtractor,
    converter: PdfConverter,
}

impl ExtractionPipeline {
    /// # Errors
    ///
    /// Fails only when the fixed extraction pattern tables do not compile.
    pub fn new() -> IngestResult<Self> {
        Ok(Self {
            parser: Box::new(CompositeParser::default()),
            extractor: ReportExtractor::new()?,
            converter: PdfConverter::discover(),
        })
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    /// Runs the full pipeline over `input`, consulting `fallback` when the
    /// primary document cannot be read.
    ///
    /// # Errors
    ///
    /// Fails only when document text cannot be obtained from either source.
    pub async fn run(
        &self,
        input: &Path,
        fallback: Option<&Path>,
    ) -> IngestResult<ExtractionReport> {
        let document = self.document_text(input, fallback).await?;

        if pdf_conversion_enabled() {
            if self.converter.is_available() {
                match self.converter.convert(input).await {
                    Ok(path) => debug!(output = %path.display(), "PDF conversion finished"),
                    Err(e) => warn!(error = %e, "PDF conversion failed"),
                }
            } else {
                debug!("no PDF converter on PATH, skipping conversion");
            }
        }

        let entities = self.extractor.extract(&document.full_text);
        debug!(total = entities.total_entities(), "extraction finished");

        let filename = input.file_name().map_or_else(
            || input.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        Ok(ExtractionReport::new(DocumentInfo::new(filename), entities))
    }

    /// Extraction only, for callers that already hold document text.
    #[must_use]
    pub fn extract_text(&self, text: &str) -> ExtractedEntities {
        self.extractor.extract(text)
    }

    async fn document_text(
        &self,
        input: &Path,
        fallback: Option<&Path>,
    ) -> IngestResult<ParsedDocument> {
        match self.parser.parse_file(input).await {
            Ok(document) => Ok(document),
            Err(primary_err) => {
                if let Some(fallback) = fallback {
                    if fallback.exists() {
                        warn!(
                            error = %primary_err,
                            fallback = %fallback.display(),
                            "primary document unavailable, using fallback"
                        );
                        let data = tokio::fs::read(fallback).await?;
                        let document = self
                            .parser
                            .parse_bytes(&data, DocumentFormat::Markdown)
                            .await?;
                        return Ok(document);
                    }
                }
                Err(primary_err.into())
            }
        }
    }
}

fn pdf_conversion_enabled() -> bool {
    !std::env::var(SKIP_PDF_ENV).is_ok_and(|value| !value.is_empty())
}
