//! Refine context for a completed search.
//!
//! A session owns the immutable classified record set from one fetch and
//! the filters currently applied to it. Refining re-runs the
//! filter/sort/truncate stages over the held records; it never goes back
//! to the search transport.

use crate::pipeline::{apply, FilterPredicate, SortDirection, SortKey};
use crate::types::ArticleRecord;

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    records: Vec<ArticleRecord>,
    current_filters: Vec<FilterPredicate>,
}

impl SearchSession {
    /// Start a session from the classified records of a pipeline run.
    pub fn new(query: String, records: Vec<ArticleRecord>) -> Self {
        Self {
            query,
            records,
            current_filters: Vec::new(),
        }
    }

    /// The query string this session's records were fetched with.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full fetched record set, unfiltered.
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Filters applied by the most recent refine.
    pub fn current_filters(&self) -> &[FilterPredicate] {
        &self.current_filters
    }

    /// Re-filter, re-sort, and truncate the held records.
    pub fn refine(
        &mut self,
        filters: Vec<FilterPredicate>,
        sort_keys: &[(SortKey, SortDirection)],
        limit: usize,
    ) -> Vec<ArticleRecord> {
        self.current_filters = filters;
        apply(&self.records, &self.current_filters, sort_keys, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use crate::score::RecencyPolicy;
    use crate::types::ArticleSummary;

    fn session_with_fixture() -> SearchSession {
        let summaries = vec![
            ArticleSummary {
                id: "1".into(),
                title: "Two-compartment PK model with estimated parameters".into(),
                pub_date: "2024 Feb 02".into(),
                journal: "J Pharmacokinet".into(),
                summary: "Two-compartment PK model with estimated parameters".into(),
                link: "https://pubmed.ncbi.nlm.nih.gov/1/".into(),
            },
            ArticleSummary {
                id: "2".into(),
                title: "Narrative review of antibiotic stewardship".into(),
                pub_date: "2019 Jun 10".into(),
                journal: "Clin Micro Rev".into(),
                summary: "Narrative review of antibiotic stewardship".into(),
                link: "https://pubmed.ncbi.nlm.nih.gov/2/".into(),
            },
        ];
        let pipeline = Pipeline::new(vec!["pk".into()], RecencyPolicy::default());
        let records = pipeline.classify_and_score(&summaries);
        SearchSession::new("(antibiotic) AND (PK model)".into(), records)
    }

    #[test]
    fn test_refine_reuses_fetched_records() {
        let mut session = session_with_fixture();
        assert_eq!(session.records().len(), 2);

        let refined = session.refine(
            vec![FilterPredicate::HasEstimatedParameters],
            &[(SortKey::RelevanceScore, SortDirection::Descending)],
            10,
        );
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].id, "1");
        // The held set is untouched; a later refine can widen again.
        assert_eq!(session.records().len(), 2);
    }

    #[test]
    fn test_refine_tracks_current_filters() {
        let mut session = session_with_fixture();
        session.refine(
            vec![FilterPredicate::HasPkModel],
            &[(SortKey::Title, SortDirection::Ascending)],
            10,
        );
        assert_eq!(session.current_filters(), &[FilterPredicate::HasPkModel][..]);

        let widened = session.refine(
            Vec::new(),
            &[(SortKey::Title, SortDirection::Ascending)],
            10,
        );
        assert_eq!(widened.len(), 2);
        assert!(session.current_filters().is_empty());
    }
}
