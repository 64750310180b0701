use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::ExtractedEntities;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    /// ISO-8601, UTC.
    pub extraction_timestamp: String,
}

impl DocumentInfo {
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            extraction_timestamp: Utc::now().to_rfc3339(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.extraction_timestamp = timestamp.to_rfc3339();
        self
    }
}

/// Counts derived from the entity lists; never tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_entities: usize,
    pub kpi_count: usize,
    pub date_count: usize,
    pub org_count: usize,
}

impl ExtractionStats {
    #[must_use]
    pub fn from_entities(entities: &ExtractedEntities) -> Self {
        Self {
            total_entities: entities.total_entities(),
            kpi_count: entities.kpi_count(),
            date_count: entities.date_count(),
            org_count: entities.org_count(),
        }
    }
}

/// The serialized output document: metadata, the three entity lists, and
/// summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub document: DocumentInfo,
    pub entities: ExtractedEntities,
    pub statistics: ExtractionStats,
}

impl ExtractionReport {
    #[must_use]
    pub fn new(document: DocumentInfo, entities: ExtractedEntities) -> Self {
        let statistics = ExtractionStats::from_entities(&entities);
        Self {
            document,
            entities,
            statistics,
        }
    }
}
