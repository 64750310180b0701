use serde::{Deserialize, Serialize};

/// Numeric KPI value. Count-style metrics carry integers, percentages and
/// currency amounts carry floats; both serialize as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Integer(i64),
    Float(f64),
}

impl KpiValue {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }
}

impl std::fmt::Display for KpiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRecord {
    pub name: String,
    pub value: KpiValue,
    pub unit: String,
    pub context: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKind {
    Week,
    DateRange,
    FiscalYear,
    Quarter,
}

impl DateKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::DateRange => "date_range",
            Self::FiscalYear => "fiscal_year",
            Self::Quarter => "quarter",
        }
    }
}

impl std::fmt::Display for DateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date or time reference found in the document, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRecord {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: DateKind,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgKind {
    Company,
    Supplier,
}

impl OrgKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Supplier => "supplier",
        }
    }
}

impl std::fmt::Display for OrgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An organization mention, reported under its canonical spelling no matter
/// how the source text spelled it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OrgKind,
    pub confidence: f64,
}

/// The three entity lists produced by a single extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub kpis: Vec<KpiRecord>,
    pub dates: Vec<DateRecord>,
    pub organizations: Vec<OrgRecord>,
}

impl ExtractedEntities {
    #[must_use]
    pub fn kpi_count(&self) -> usize {
        self.kpis.len()
    }

    #[must_use]
    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn org_count(&self) -> usize {
        self.organizations.len()
    }

    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.kpi_count() + self.date_count() + self.org_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_value_serializes_as_bare_number() {
        let int = serde_json::to_string(&KpiValue::Integer(2847)).unwrap();
        let float = serde_json::to_string(&KpiValue::Float(32.4)).unwrap();

        assert_eq!(int, "2847");
        assert_eq!(float, "32.4");
    }

    #[test]
    fn date_kind_serializes_snake_case() {
        let record = DateRecord {
            text: "November 4 - 8, 2023".into(),
            kind: DateKind::DateRange,
            confidence: 0.9,
        };

        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains(r#""type":"date_range""#));
        assert!(json.contains(r#""text":"November 4 - 8, 2023""#));
    }

    #[test]
    fn org_record_uses_type_key() {
        let record = OrgRecord {
            name: "Pacific Components Ltd.".into(),
            kind: OrgKind::Supplier,
            confidence: 0.8,
        };

        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains(r#""type":"supplier""#));
    }

    #[test]
    fn entity_counts_sum() {
        let entities = ExtractedEntities {
            kpis: vec![KpiRecord {
                name: "OEE".into(),
                value: KpiValue::Float(82.0),
                unit: "%".into(),
                context: "Overall Equipment Effectiveness".into(),
                confidence: 0.9,
            }],
            dates: vec![
                DateRecord {
                    text: "week 45".into(),
                    kind: DateKind::Week,
                    confidence: 0.8,
                },
                DateRecord {
                    text: "FY2023".into(),
                    kind: DateKind::FiscalYear,
                    confidence: 0.85,
                },
            ],
            organizations: vec![],
        };

        assert_eq!(entities.kpi_count(), 1);
        assert_eq!(entities.date_count(), 2);
        assert_eq!(entities.org_count(), 0);
        assert_eq!(entities.total_entities(), 3);
    }
}
