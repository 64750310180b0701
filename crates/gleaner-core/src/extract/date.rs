use regex::Regex;

use crate::record::{DateKind, DateRecord};

/// Detection table, in emission order. Each search contributes at most one
/// record: the first occurrence in the document.
const DATE_PATTERNS: &[(DateKind, f64, &str)] = &[
    // an alphabetic token after "week" keeps misspelled ordinals like
    // "Fourty-Five"
    (DateKind::Week, 0.80, r"(?i)\bweek\s+([a-z-]+|\d{1,2})\b"),
    (
        DateKind::DateRange,
        0.90,
        r"(?i)\b(?:November|December|January|February|March|April|May|June|July|August|September|October)\s+\d{1,2}\s*-\s*\d{1,2},\s*\d{4}\b",
    ),
    (DateKind::FiscalYear, 0.85, r"(?i)\bFY\s*\d{4}\b"),
    (DateKind::Quarter, 0.85, r"(?i)\bQ[1-4]\s+\d{4}\b"),
];

pub(crate) struct DatePattern {
    kind: DateKind,
    confidence: f64,
    regex: Regex,
}

pub(crate) fn patterns() -> Result<Vec<DatePattern>, regex::Error> {
    DATE_PATTERNS
        .iter()
        .map(|&(kind, confidence, pattern)| {
            Ok(DatePattern {
                kind,
                confidence,
                regex: Regex::new(pattern)?,
            })
        })
        .collect()
}

pub(crate) fn extract_dates(patterns: &[DatePattern], text: &str) -> Vec<DateRecord> {
    patterns
        .iter()
        .filter_map(|pattern| {
            pattern.regex.find(text).map(|m| DateRecord {
                text: m.as_str().to_string(),
                kind: pattern.kind,
                confidence: pattern.confidence,
            })
        })
        .collect()
}
