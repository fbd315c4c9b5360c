//! The result pipeline: classify+score, filter, sort, truncate.
//!
//! Stage order is fixed. Filtering always precedes truncation, so a
//! limit applies to the matching set rather than the raw fetch set. The
//! sort is stable: records with equal keys keep their relative fetch
//! order. The input slice is never mutated; every run returns a new
//! vector.

use std::cmp::Ordering;

use crate::classify::classify;
use crate::score::{relevance_score, RecencyPolicy};
use crate::types::{ArticleRecord, ArticleSummary};

/// Boolean filter predicates over derived attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPredicate {
    HasPkModel,
    HasEstimatedParameters,
    HasDistributionVolume,
}

impl FilterPredicate {
    pub fn matches(&self, record: &ArticleRecord) -> bool {
        match self {
            FilterPredicate::HasPkModel => record.has_pk_model,
            FilterPredicate::HasEstimatedParameters => record.has_estimated_parameters,
            FilterPredicate::HasDistributionVolume => record.has_distribution_volume,
        }
    }
}

/// Sortable record attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    RelevanceScore,
    HasPkModel,
    Title,
    Journal,
    /// Lexicographic over the raw free-text date. The field is loosely
    /// structured, so this is an approximation, same as the source data.
    PublicationDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

fn compare_by(a: &ArticleRecord, b: &ArticleRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::RelevanceScore => a.relevance_score.cmp(&b.relevance_score),
        SortKey::HasPkModel => a.has_pk_model.cmp(&b.has_pk_model),
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Journal => a.journal.cmp(&b.journal),
        SortKey::PublicationDate => a.pub_date.cmp(&b.pub_date),
    }
}

fn compare(a: &ArticleRecord, b: &ArticleRecord, keys: &[(SortKey, SortDirection)]) -> Ordering {
    for (key, direction) in keys {
        let ord = match direction {
            SortDirection::Ascending => compare_by(a, b, *key),
            SortDirection::Descending => compare_by(b, a, *key),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Filter, stable-sort, and truncate already-classified records.
///
/// Exposed separately from [`Pipeline::run`] so a refine pass can reuse
/// an existing record set without re-classifying it.
pub fn apply(
    records: &[ArticleRecord],
    filters: &[FilterPredicate],
    sort_keys: &[(SortKey, SortDirection)],
    limit: usize,
) -> Vec<ArticleRecord> {
    let mut out: Vec<ArticleRecord> = records
        .iter()
        .filter(|r| filters.iter().all(|f| f.matches(r)))
        .cloned()
        .collect();
    out.sort_by(|a, b| compare(a, b, sort_keys));
    out.truncate(limit);
    out
}

/// One configured classify/score/filter/sort pipeline.
///
/// Variants of the tool differ only in keywords, recency policy, and
/// filter/sort configuration, so they are profiles of this one type
/// rather than separate code paths.
#[derive(Debug, Clone)]
pub struct Pipeline {
    keywords: Vec<String>,
    recency: RecencyPolicy,
}

impl Pipeline {
    pub fn new(keywords: Vec<String>, recency: RecencyPolicy) -> Self {
        Self { keywords, recency }
    }

    /// Classify and score each fetched summary, preserving input order.
    pub fn classify_and_score(&self, summaries: &[ArticleSummary]) -> Vec<ArticleRecord> {
        summaries
            .iter()
            .map(|s| {
                let c = classify(&s.title, &s.summary);
                let score = relevance_score(
                    &s.title,
                    &s.summary,
                    &self.keywords,
                    &self.recency,
                    &s.pub_date,
                );
                ArticleRecord {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    pub_date: s.pub_date.clone(),
                    journal: s.journal.clone(),
                    summary: s.summary.clone(),
                    link: s.link.clone(),
                    model_type: c.model_type,
                    population: c.population,
                    has_pk_model: c.has_pk_model,
                    has_estimated_parameters: c.has_estimated_parameters,
                    has_distribution_volume: c.has_distribution_volume,
                    relevance_score: score,
                }
            })
            .collect()
    }

    /// Run the full pipeline over fetched summaries.
    pub fn run(
        &self,
        summaries: &[ArticleSummary],
        filters: &[FilterPredicate],
        sort_keys: &[(SortKey, SortDirection)],
        limit: usize,
    ) -> Vec<ArticleRecord> {
        let records = self.classify_and_score(summaries);
        let out = apply(&records, filters, sort_keys, limit);
        tracing::debug!(
            fetched = summaries.len(),
            kept = out.len(),
            "pipeline run complete"
        );
        out
    }
}
