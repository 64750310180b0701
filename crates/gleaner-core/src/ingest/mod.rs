mod convert;
mod parser;
mod pipeline;

pub use convert::{ConvertError, ConvertResult, PdfConverter};
pub use parser::{
    CompositeParser, DocumentFormat, DocxParser, ParseError, ParseResult, ParsedDocument, Parser,
    PlainTextParser,
};
pub use pipeline::{ExtractionPipeline, IngestError, IngestResult, SKIP_PDF_ENV};
