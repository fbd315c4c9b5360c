//! Record types shared between the transport and the result pipeline.

use serde::{Deserialize, Serialize};

/// A raw article as returned by the detail transport, before
/// classification and scoring.
///
/// `summary` duplicates `title`: the esummary endpoint carries no
/// abstract, so the title stands in for it. Scoring and classification
/// operate on this field as-is, which is a known reliability limitation
/// of summary-dependent heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    /// Free-text publication date, e.g. "2023 Apr 01" or just "2010".
    pub pub_date: String,
    pub journal: String,
    pub summary: String,
    pub link: String,
}

/// Pharmacokinetic model classification, first match wins in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    MonoCompartmental,
    BiCompartmental,
    WithLagTime,
    TransitModel,
    /// The bare token "pk" appeared but no specific phrase matched.
    GenericPk,
    Unspecified,
}

impl ModelType {
    pub fn as_label(&self) -> &'static str {
        match self {
            ModelType::MonoCompartmental => "mono-compartimental",
            ModelType::BiCompartmental => "bi-compartimental",
            ModelType::WithLagTime => "with Tlag",
            ModelType::TransitModel => "transit model",
            ModelType::GenericPk => "PK model",
            ModelType::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Study population classification, first match wins in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Population {
    Mice,
    Rats,
    Humans,
    Children,
    Adults,
    Unspecified,
}

impl Population {
    pub fn as_label(&self) -> &'static str {
        match self {
            Population::Mice => "Mice",
            Population::Rats => "Rats",
            Population::Humans => "Humans",
            Population::Children => "Children",
            Population::Adults => "Adults",
            Population::Unspecified => "Unspecified",
        }
    }
}

impl std::fmt::Display for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A fully classified and scored article, ready for filtering, sorting,
/// and export. Never mutated after the pipeline's classify stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub pub_date: String,
    pub journal: String,
    pub summary: String,
    pub link: String,
    pub model_type: ModelType,
    pub population: Population,
    pub has_pk_model: bool,
    pub has_estimated_parameters: bool,
    pub has_distribution_volume: bool,
    pub relevance_score: i64,
}
