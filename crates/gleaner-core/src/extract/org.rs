use super::text::{find_best_line, normalize};
use crate::record::{OrgKind, OrgRecord};

/// Known organizations, canonical spelling first.
const KNOWN_ORGS: &[(&str, OrgKind)] = &[
    ("Gearhead Cycles", OrgKind::Company),
    ("Pacific Components Ltd.", OrgKind::Supplier),
];

/// Minimum best-line similarity for the table pass.
const MATCH_THRESHOLD: f64 = 0.55;
/// Confidence is `BASE + SCALE * similarity`, capped at 1.0.
const SIM_BASE: f64 = 0.55;
const SIM_SCALE: f64 = 0.45;
/// Substring signal for the company-recovery pass.
const COMPANY_SIGNAL: &str = "gearhead";
const COMPANY_NAME: &str = "Gearhead Cycles";
const RECOVERY_CONFIDENCE: f64 = 0.75;

pub(crate) fn extract_organizations(lines: &[&str]) -> Vec<OrgRecord> {
    let mut orgs = Vec::new();

    for &(canonical, kind) in KNOWN_ORGS {
        let (best_line, best_sim) = find_best_line(canonical, lines);
        if best_line.is_some() && best_sim >= MATCH_THRESHOLD {
            orgs.push(OrgRecord {
                name: canonical.to_string(),
                kind,
                confidence: SIM_SCALE.mul_add(best_sim, SIM_BASE).min(1.0),
            });
        }
    }

    // Recovery pass for the company only: pluralization typos and partial
    // mentions can fall under the similarity threshold while the normalized
    // text still carries an unmistakable substring signal.
    let company_present = orgs
        .iter()
        .any(|org| org.name.to_lowercase().contains(COMPANY_SIGNAL));
    if !company_present
        && lines
            .iter()
            .any(|line| normalize(line).contains(COMPANY_SIGNAL))
    {
        orgs.push(OrgRecord {
            name: COMPANY_NAME.to_string(),
            kind: OrgKind::Company,
            confidence: RECOVERY_CONFIDENCE,
        });
    }

    orgs
}
