use tracing::debug;

use super::{date, kpi, org};
use crate::record::ExtractedEntities;

/// Deterministic regex-plus-similarity extractor for the weekly operations
/// report template.
///
/// Pattern tables compile once at construction; extraction itself is pure,
/// total over any input text, and allocates only local state, so one
/// extractor may serve concurrent callers.
pub struct ReportExtractor {
    kpis: kpi::KpiPatterns,
    dates: Vec<date::DatePattern>,
}

impl ReportExtractor {
    /// Compiles the fixed pattern tables.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] if a table pattern fails to
    /// compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            kpis: kpi::KpiPatterns::new()?,
            dates: date::patterns()?,
        })
    }

    /// Extract KPIs, date references, and organization mentions from raw
    /// document text. Never fails; categories without matches come back as
    /// empty lists.
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let entities = ExtractedEntities {
            kpis: self.kpis.extract(text, &lines),
            dates: date::extract_dates(&self.dates, text),
            organizations: org::extract_organizations(&lines),
        };

        debug!(
            kpis = entities.kpi_count(),
            dates = entities.date_count(),
            organizations = entities.org_count(),
            "extraction pass finished"
        );

        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::KpiValue;

    fn extractor() -> ReportExtractor {
        ReportExtractor::new().unwrap()
    }

    #[test]
    fn finds_percent_kpis_across_report_styles() {
        let text = "\
            OEE (Overall Equipment Effectiveness) | 82% | 78.5% | Below Target\n\
            Our On-Time Delivery rate has fallen to 49.9% this week\n\
            The Return Rate stands at 24.96%";

        let entities = extractor().extract(text);

        let names: Vec<String> = entities
            .kpis
            .iter()
            .map(|kpi| kpi.name.to_lowercase())
            .collect();
        assert!(names.iter().any(|n| n.contains("oee")));
        assert!(names.iter().any(|n| n.contains("delivery")));
        assert!(names.iter().any(|n| n.contains("return")));
    }

    #[test]
    fn confidence_always_within_unit_interval() {
        let texts = [
            "Gross Margin: 32.4%",
            "Gearhead Cycle - Week Fourty-Five, FY2023",
            "Units Produced | 3,000 | 2,847 | Weekly Revenue: $142,350",
            "random noise 17% $4 week 9 Q2 2024",
        ];

        let ex = extractor();
        for text in texts {
            let entities = ex.extract(text);
            for confidence in entities
                .kpis
                .iter()
                .map(|k| k.confidence)
                .chain(entities.dates.iter().map(|d| d.confidence))
                .chain(entities.organizations.iter().map(|o| o.confidence))
            {
                assert!((0.0..=1.0).contains(&confidence), "bad confidence {confidence} for {text:?}");
            }
        }
    }

    #[test]
    fn kpi_names_are_unique_after_normalization() {
        let text = "\
            Gearhead Cycles - Weekly Operations Report\n\
            Units Produced | 3,000 | 2,847 | Below Target\n\
            OEE: 78.5%\n\
            On-Time Delivery: 87.2%\n\
            Gross Margin: 32.4%\n\
            Weekly Revenue: $142,350\n\
            Cost per Unit: $49.88";

        let entities = extractor().extract(text);

        let mut keys: Vec<String> = entities
            .kpis
            .iter()
            .map(|kpi| crate::extract::normalize(&kpi.name))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn typo_scenario_recovers_week_and_company() {
        let entities = extractor().extract("Gearhead Cycle - Week Fourty-Five, FY2023");

        assert!(!entities.dates.is_empty());
        assert!(entities
            .dates
            .iter()
            .any(|date| date.text.to_lowercase().contains("week")));
        let company = entities
            .organizations
            .iter()
            .find(|org| org.name == "Gearhead Cycles")
            .expect("recovered company");
        assert!((company.confidence - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_empty_lists() {
        let ex = extractor();

        for text in ["", "   \n\t  \n"] {
            let entities = ex.extract(text);
            assert!(entities.kpis.is_empty());
            assert!(entities.dates.is_empty());
            assert!(entities.organizations.is_empty());
            assert_eq!(entities.total_entities(), 0);
        }
    }

    #[test]
    fn direct_tier_outranks_fallback_tier() {
        let direct = extractor().extract("OEE held at 90% for the period");
        let oee = direct.kpis.iter().find(|k| k.name == "OEE").unwrap();
        assert_eq!(oee.value, KpiValue::Float(90.0));
        assert!((oee.confidence - 0.90).abs() < f64::EPSILON);

        // the percentage precedes the anchor, so the anchored search never
        // fires and the best-line fallback supplies the value instead
        let fallback = extractor().extract("Current 81% on OEE");
        let oee = fallback
            .kpis
            .iter()
            .find(|k| k.name == "OEE")
            .expect("fallback record");
        let expected = 0.40f64.mul_add(
            crate::extract::similarity("OEE", "Current 81% on OEE"),
            0.55,
        );
        assert_eq!(oee.value, KpiValue::Float(81.0));
        assert!((oee.confidence - expected).abs() < 1e-12);
        assert!(oee.confidence < 0.90);
    }
}
