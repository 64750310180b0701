use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Docx,
}

impl DocumentFormat {
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub format: DocumentFormat,
    pub full_text: String,
}

impl ParsedDocument {
    #[must_use]
    pub fn new(format: DocumentFormat, full_text: String) -> Self {
        Self { format, full_text }
    }
}

#[async_trait::async_trait]
pub trait Parser: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_parse(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat)
        -> ParseResult<ParsedDocument>;

    async fn parse_file(&self, path: &Path) -> ParseResult<ParsedDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ParseError::UnsupportedFormat("no extension".into()))?;

        let format = DocumentFormat::from_extension(ext)
            .ok_or_else(|| ParseError::UnsupportedFormat(ext.into()))?;

        if !self.can_parse(format) {
            return Err(ParseError::UnsupportedFormat(format!("{format:?}")));
        }

        let data = tokio::fs::read(path).await?;
        self.parse_bytes(&data, format).await
    }
}

pub struct PlainTextParser;

impl PlainTextParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Parser for PlainTextParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText, DocumentFormat::Markdown]
    }

    async fn parse_bytes(
        &self,
        data: &[u8],
        format: DocumentFormat,
    ) -> ParseResult<ParsedDocument> {
        let text =
            String::from_utf8(data.to_vec()).map_err(|e| ParseError::Encoding(e.to_string()))?;

        Ok(ParsedDocument::new(format, text))
    }
}

/// Reads the main document part out of the OOXML zip container and collects
/// the text runs: paragraphs become lines, explicit tabs and breaks are kept.
pub struct DocxParser;

impl DocxParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Parser for DocxParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Docx]
    }

    async fn parse_bytes(
        &self,
        data: &[u8],
        _format: DocumentFormat,
    ) -> ParseResult<ParsedDocument> {
        let text = docx_text(data)?;
        Ok(ParsedDocument::new(DocumentFormat::Docx, text))
    }
}

fn docx_text(data: &[u8]) -> ParseResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_run_text => {
                let chunk = t.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(text)
}

pub struct CompositeParser {
    parsers: Vec<Box<dyn Parser>>,
}

impl CompositeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parsers.push(parser);
        self
    }

    fn find_parser(&self, format: DocumentFormat) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(format))
            .map(|p| p.as_ref())
    }
}

impl Default for CompositeParser {
    fn default() -> Self {
        Self::new()
            .with_parser(Box::new(PlainTextParser::new()))
            .with_parser(Box::new(DocxParser::new()))
    }
}

#[async_trait::async_trait]
impl Parser for CompositeParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[
            DocumentFormat::PlainText,
            DocumentFormat::Markdown,
            DocumentFormat::Docx,
        ]
    }

    fn can_parse(&self, format: DocumentFormat) -> bool {
        self.find_parser(format).is_some()
    }

    async fn parse_bytes(
        &self,
        data: &[u8],
        format: DocumentFormat,
    ) -> ParseResult<ParsedDocument> {
        let parser = self
            .find_parser(format)
            .ok_or_else(|| ParseError::UnsupportedFormat(format!("{format:?}")))?;

        parser.parse_bytes(data, format).await
    }
}
