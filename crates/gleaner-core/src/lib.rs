pub mod extract;
pub mod ingest;
pub mod record;
pub mod report;

pub use extract::{find_best_line, normalize, similarity, ReportExtractor};
pub use ingest::{
    CompositeParser, ConvertError, ConvertResult, DocumentFormat, DocxParser, ExtractionPipeline,
    IngestError, IngestResult, ParseError, ParseResult, ParsedDocument, Parser, PdfConverter,
    PlainTextParser, SKIP_PDF_ENV,
};
pub use record::{
    DateKind, DateRecord, ExtractedEntities, KpiRecord, KpiValue, OrgKind, OrgRecord,
};
pub use report::{DocumentInfo, ExtractionReport, ExtractionStats};
