use std::collections::HashSet;

use regex::Regex;

use super::text::{find_best_line, normalize, parse_number};
use crate::record::{KpiRecord, KpiValue};

/// Confidence for a direct whole-document anchor match.
const DIRECT_CONFIDENCE: f64 = 0.90;
/// Fallback confidence is `BASE + SCALE * line_similarity`.
const FALLBACK_BASE: f64 = 0.55;
const FALLBACK_SCALE: f64 = 0.40;
/// Absolute-pattern KPIs carry one fixed confidence; their anchors are
/// unambiguous labels.
const ABSOLUTE_CONFIDENCE: f64 = 0.85;
/// Emitted confidence never leaves `[0.1, 1.0]`.
const MIN_CONFIDENCE: f64 = 0.1;

/// Percent KPI vocabulary, in emission order. The anchor phrase and the
/// percentage may be separated by arbitrary text, line breaks included.
const PERCENT_KPIS: &[(&str, &str, &str)] = &[
    (
        "OEE",
        r"(?is)\bOEE\b.*?(\d+(?:\.\d+)?)\s*%",
        "Overall Equipment Effectiveness",
    ),
    (
        "On-Time Delivery",
        r"(?is)\bon[\s-]*time\s+delivery\b.*?(\d+(?:\.\d+)?)\s*%",
        "Delivery Performance",
    ),
    (
        "Return Rate",
        r"(?is)\breturn\s+rate\b.*?(\d+(?:\.\d+)?)\s*%",
        "Quality Metric",
    ),
    (
        "Defect Rate",
        r"(?is)\bdefect\s+rate\b.*?(\d+(?:\.\d+)?)\s*%",
        "Quality Metric",
    ),
    (
        "Gross Margin",
        r"(?is)\bgross\s+margin\b.*?(\d+(?:\.\d+)?)\s*%",
        "Financial Metric",
    ),
];

struct PercentKpi {
    name: &'static str,
    context: &'static str,
    pattern: Regex,
}

pub(crate) struct KpiPatterns {
    percent: Vec<PercentKpi>,
    percent_on_line: Regex,
    units_actual: Regex,
    units_table: Regex,
    weekly_revenue: Regex,
    cost_per_unit: Regex,
}

impl KpiPatterns {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        let percent = PERCENT_KPIS
            .iter()
            .map(|&(name, pattern, context)| {
                Ok(PercentKpi {
                    name,
                    context,
                    pattern: Regex::new(pattern)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            percent,
            percent_on_line: Regex::new(r"(\d+(?:\.\d+)?)\s*%")?,
            units_actual: Regex::new(
                r"(?is)\bUnits Produced\b.*?\bActual\b.*?(\d{1,3}(?:,\d{3})*|\d+)",
            )?,
            // table rows keep the whole metric on one line
            units_table: Regex::new(r"(?i)\bUnits Produced\b.*?\|\s*\d[\d,]*\s*\|\s*(\d[\d,]*)\b")?,
            weekly_revenue: Regex::new(r"(?i)\bWeekly Revenue:\s*\$([\d,]+)")?,
            cost_per_unit: Regex::new(r"(?i)\bCost per Unit:\s*\$([\d,]+(?:\.\d+)?)")?,
        })
    }

    pub(crate) fn extract(&self, text: &str, lines: &[&str]) -> Vec<KpiRecord> {
        let mut kpis = Vec::new();

        for kpi in &self.percent {
            // Tier one: anchored search over the whole document. The fallback
            // is only consulted when the anchor never fires.
            let (value, confidence) = if let Some(caps) = kpi.pattern.captures(text) {
                (
                    caps.get(1).and_then(|m| parse_number(m.as_str())),
                    DIRECT_CONFIDENCE,
                )
            } else {
                let (best_line, best_sim) = find_best_line(kpi.name, lines);
                match best_line.and_then(|line| self.percent_on_line.captures(line)) {
                    Some(caps) => (
                        caps.get(1).and_then(|m| parse_number(m.as_str())),
                        FALLBACK_SCALE.mul_add(best_sim, FALLBACK_BASE),
                    ),
                    None => (None, 0.0),
                }
            };

            if let Some(value) = value {
                kpis.push(KpiRecord {
                    name: kpi.name.to_string(),
                    value: KpiValue::Float(value),
                    unit: "%".to_string(),
                    context: kpi.context.to_string(),
                    confidence: confidence.clamp(MIN_CONFIDENCE, 1.0),
                });
            }
        }

        let units = self
            .units_actual
            .captures(text)
            .or_else(|| self.units_table.captures(text));
        if let Some(value) = units
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_number(m.as_str()))
        {
            kpis.push(KpiRecord {
                name: "Units Produced".to_string(),
                value: KpiValue::Integer(value as i64),
                unit: "units".to_string(),
                context: "Production volume".to_string(),
                confidence: ABSOLUTE_CONFIDENCE,
            });
        }

        if let Some(value) = self
            .weekly_revenue
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_number(m.as_str()))
        {
            kpis.push(KpiRecord {
                name: "Weekly Revenue".to_string(),
                value: KpiValue::Float(value),
                unit: "$".to_string(),
                context: "Financial Summary".to_string(),
                confidence: ABSOLUTE_CONFIDENCE,
            });
        }

        if let Some(value) = self
            .cost_per_unit
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_number(m.as_str()))
        {
            kpis.push(KpiRecord {
                name: "Cost per Unit".to_string(),
                value: KpiValue::Float(value),
                unit: "$".to_string(),
                context: "Financial Summary".to_string(),
                confidence: ABSOLUTE_CONFIDENCE,
            });
        }

        dedupe(kpis)
    }
}

/// First-seen-wins dedup on the normalized KPI name. Entries whose names
/// normalize to nothing are dropped.
fn dedupe(kpis: Vec<KpiRecord>) -> Vec<KpiRecord> {
    let mut seen = HashSet::new();
    kpis.into_iter()
        .filter(|kpi| {
            let key = normalize(&kpi.name);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
