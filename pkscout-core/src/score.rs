//! Relevance scoring from keyword density and publication recency.

use serde::{Deserialize, Serialize};

use crate::matcher::total_occurrences;

/// Recency penalty policy.
///
/// `reference_year` is a fixed configured constant, not the wall-clock
/// year; scores drift as the configuration ages. This is a known
/// staleness limitation, kept configurable instead of silently switching
/// to the current date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecencyPolicy {
    pub enabled: bool,
    pub reference_year: i32,
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            reference_year: 2025,
        }
    }
}

impl RecencyPolicy {
    /// Penalty for a free-text publication date.
    ///
    /// Only a space-separated structured date ("2023 Apr 01") is
    /// penalized, by `max(0, reference_year - year)`. A date without a
    /// space, or one whose leading token is not a year, contributes
    /// zero. Articles newer than the reference year are never rewarded.
    pub fn penalty(&self, pub_date: &str) -> i64 {
        if !self.enabled || !pub_date.contains(' ') {
            return 0;
        }
        match pub_date.split(' ').next().and_then(|t| t.parse::<i32>().ok()) {
            Some(year) => i64::from((self.reference_year - year).max(0)),
            None => 0,
        }
    }
}

/// Score an article: total keyword occurrences over title and summary,
/// minus the recency penalty. Unbounded, may be negative.
pub fn relevance_score(
    title: &str,
    summary: &str,
    keywords: &[String],
    recency: &RecencyPolicy,
    pub_date: &str,
) -> i64 {
    let text = format!("{title} {summary}");
    let base = total_occurrences(&text, keywords) as i64;
    base - recency.penalty(pub_date)
}
