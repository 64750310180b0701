//! Text canonicalization and fuzzy scoring used by every extraction pass.

/// Canonical lowercase form used for similarity comparison.
///
/// Lowercases, folds Unicode dash variants to `-`, treats `-`/`_`/`/` as
/// separators, keeps only `[a-z0-9%.$,]` and whitespace, collapses whitespace
/// runs, and trims. Idempotent: normalizing an already-normalized string is a
/// no-op.
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.to_lowercase().chars() {
        let ch = match ch {
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => '-',
            other => other,
        };
        match ch {
            'a'..='z' | '0'..='9' | '%' | '.' | '$' | ',' => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(ch);
            }
            // separators and anything outside the kept set
            _ => pending_space = true,
        }
    }

    out
}

/// Sequence similarity ratio in `[0, 1]` over the normalized forms.
///
/// Ratcliff/Obershelp: `2 * M / T` where `M` is the total character count of
/// recursively-found longest matching blocks and `T` is the combined length.
/// Two empty strings are identical, so they score 1.0.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_len(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matched as f64 / total as f64
}

/// Longest contiguous matching block within `a[alo..ahi]` and `b[blo..bhi]`.
/// Ties resolve to the earliest block in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    use std::collections::HashMap;

    let mut best = (alo, blo, 0);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut row: HashMap<usize, usize> = HashMap::new();
        for j in blo..bhi {
            if a[i] == b[j] {
                let len = if j == blo {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                row.insert(j, len);
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        j2len = row;
    }

    best
}

/// Total matched character count across all matching blocks.
fn matching_len(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, len) = longest_match(a, b, alo, ahi, blo, bhi);
    if len == 0 {
        return 0;
    }
    len + matching_len(a, b, alo, i, blo, j) + matching_len(a, b, i + len, ahi, j + len, bhi)
}

/// The candidate line scoring highest against `query`, with its score.
///
/// First match wins on ties (strictly-greater comparison); an empty candidate
/// list, or one where nothing matches at all, yields `(None, 0.0)`.
#[must_use]
pub fn find_best_line<'a>(query: &str, lines: &[&'a str]) -> (Option<&'a str>, f64) {
    let mut best_line = None;
    let mut best = 0.0_f64;

    for line in lines {
        let score = similarity(query, line);
        if score > best {
            best = score;
            best_line = Some(*line);
        }
    }

    (best_line, best)
}

/// Parse a number allowing comma thousands separators. Failure means "no
/// candidate", never an error.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dashes_and_separators() {
        assert_eq!(normalize("Week-45"), "week 45");
        assert_eq!(normalize("Week\u{2013}45"), "week 45");
        assert_eq!(normalize("on_time/delivery"), "on time delivery");
    }

    #[test]
    fn normalize_strips_unknown_characters() {
        assert_eq!(normalize("OEE (Overall)"), "oee overall");
        assert_eq!(normalize("Revenue: $142,350"), "revenue $142,350");
    }

    #[test]
    fn normalize_collapses_and_trims_whitespace() {
        assert_eq!(normalize("  a \t b\n c  "), "a b c");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for sample in [
            "Gearhead Cycle - Week Fourty-Five, FY2023",
            "On-Time Delivery: 87.2%",
            "  mixed \u{2014} Content / here_",
            "",
        ] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn similarity_identical_is_one() {
        assert!((similarity("Gross Margin", "gross-margin") - 1.0).abs() < f64::EPSILON);
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_disjoint_is_zero() {
        assert!(similarity("abc", "xyz").abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_matches_sequence_ratio() {
        // longest block "bcd" (3 of 8 total chars) -> 2*3/8
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn similarity_counts_all_matching_blocks() {
        // blocks "ab" and "cd" around a substitution: 2*4/10
        assert!((similarity("abxcd", "abycd") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn find_best_line_picks_highest() {
        let lines = ["Production summary", "Gross Margin: 32.4%", "Notes"];
        let (line, score) = find_best_line("Gross Margin", &lines);

        assert_eq!(line, Some("Gross Margin: 32.4%"));
        assert!(score > 0.5);
    }

    #[test]
    fn find_best_line_empty_input() {
        let (line, score) = find_best_line("anything", &[]);

        assert_eq!(line, None);
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn find_best_line_ignores_zero_scores() {
        let (line, score) = find_best_line("qqq", &["xyz", "vw"]);

        assert_eq!(line, None);
        assert!(score.abs() < f64::EPSILON);
    }

    #[test]
    fn parse_number_strips_separators() {
        assert_eq!(parse_number("2,847"), Some(2847.0));
        assert_eq!(parse_number(" 32.4 "), Some(32.4));
        assert_eq!(parse_number("n/a"), None);
    }
}
