//! Keyword and pattern matching over free text.
//!
//! All keyword matching is case-insensitive substring containment.
//! Occurrence counting is a naive substring count: overlapping matches of
//! the same keyword are counted independently. That behavior is part of
//! the scoring contract, so callers can rely on
//! `count_occurrences("aaa", "aa") == 2`.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a pharmacokinetic parameter abbreviation with an attached
/// numeric value, optionally separated by `:` or `=` and followed by a
/// unit, e.g. "Vd = 42.5 L", "CL: 3.1 L/h", "ka 0.7 1/h".
static PARAM_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(vd|cl|ka|tlag|mtt|clearance|half-life)\s*[:=]?\s*\d+(\.\d+)?\s*(l/h|ml/min|mg/l|1/h|l|ml|h)?\b",
    )
    .unwrap()
});

/// Matches a bare volume-of-distribution abbreviation ("Vd" or "V_d").
static VD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bv_?d\b").unwrap());

/// True if any keyword occurs in `text` (case-insensitive substring).
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

/// Count occurrences of `keyword` in `text`, case-insensitive.
///
/// Overlapping matches are counted: the scan advances one character past
/// each match start, not past the whole match.
pub fn count_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    let text = text.to_lowercase();
    let keyword = keyword.to_lowercase();
    let step = keyword.chars().next().map_or(1, char::len_utf8);
    let mut count = 0;
    let mut from = 0;
    while let Some(pos) = text[from..].find(&keyword) {
        count += 1;
        from += pos + step;
    }
    count
}

/// Sum of `count_occurrences` over every keyword.
pub fn total_occurrences(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|k| count_occurrences(text, k))
        .sum()
}

/// True if the pattern matches anywhere in `text`.
pub fn matches_pattern(text: &str, pattern: &Regex) -> bool {
    pattern.is_match(text)
}

/// True if `text` carries a parameter abbreviation with a numeric value.
pub fn has_parameter_value(text: &str) -> bool {
    matches_pattern(text, &PARAM_VALUE_RE)
}

/// True if `text` mentions a volume-of-distribution abbreviation.
pub fn has_vd_mention(text: &str) -> bool {
    matches_pattern(text, &VD_RE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any_case_insensitive() {
        assert!(contains_any("Population PK of vancomycin", &["population pk"]));
        assert!(contains_any("NONMEM analysis", &["nonmem", "monolix"]));
        assert!(!contains_any("unrelated text", &["pharmacokinetics"]));
    }

    #[test]
    fn test_count_occurrences_overlapping() {
        // Naive substring contract: overlapping matches both count.
        assert_eq!(count_occurrences("aaa", "aa"), 2);
        assert_eq!(count_occurrences("abababa", "aba"), 3);
    }

    #[test]
    fn test_count_occurrences_basic() {
        assert_eq!(count_occurrences("PK model and pk analysis", "pk"), 2);
        assert_eq!(count_occurrences("no hits here", "clearance"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_total_occurrences_sums_all_keywords() {
        let keywords = vec!["antibiotic".to_string(), "icu".to_string()];
        assert_eq!(
            total_occurrences("Antibiotic PK in ICU patients", &keywords),
            2
        );
    }

    #[test]
    fn test_has_parameter_value() {
        assert!(has_parameter_value("estimated Vd = 42.5 L in adults"));
        assert!(has_parameter_value("CL: 3.1 L/h"));
        assert!(has_parameter_value("ka 0.7 1/h after oral dosing"));
        assert!(!has_parameter_value("clearance was not reported"));
    }

    #[test]
    fn test_has_vd_mention() {
        assert!(has_vd_mention("apparent Vd was large"));
        assert!(has_vd_mention("V_d in obese patients"));
        assert!(!has_vd_mention("avdeling")); // word boundary, not substring
    }
}
