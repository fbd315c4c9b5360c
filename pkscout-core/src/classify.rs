//! Article classification from title and summary text.
//!
//! All categorical attributes come from ordered keyword scans: the first
//! matching vocabulary entry wins, and the orders below are fixed. The
//! boolean flags are independent of each other and of the model type.

use serde::{Deserialize, Serialize};

use crate::matcher::{contains_any, has_parameter_value, has_vd_mention};
use crate::types::{ModelType, Population};

/// Model-type phrases in priority order. First match wins; there is no
/// scoring among model types.
const MODEL_TYPE_RULES: &[(ModelType, &[&str])] = &[
    (
        ModelType::MonoCompartmental,
        &["mono-compartimental", "monocompartimental", "one-compartment"],
    ),
    (
        ModelType::BiCompartmental,
        &["bi-compartimental", "bicompartimental", "two-compartment"],
    ),
    (ModelType::WithLagTime, &["tlag", "lag time"]),
    (
        ModelType::TransitModel,
        &["transit model", "transit compartment"],
    ),
];

/// Population terms in priority order, compared against whitespace
/// tokens rather than raw substrings.
const POPULATION_RULES: &[(Population, &str)] = &[
    (Population::Mice, "mice"),
    (Population::Rats, "rats"),
    (Population::Humans, "humans"),
    (Population::Children, "children"),
    (Population::Adults, "adults"),
];

/// PK-model mention vocabulary, Monolix-inspired.
const PK_MODEL_KEYWORDS: &[&str] = &[
    "pk model",
    "population pk",
    "nonlinear mixed effects",
    "one-compartment",
    "two-compartment",
    "multi-compartment",
    "compartmental",
    "pk",
];

const ESTIMATED_PARAM_KEYWORDS: &[&str] = &[
    "estimated parameters",
    "parameter estimation",
    "parameter estimates",
    "parameter variability",
];

const DISTRIBUTION_VOLUME_KEYWORDS: &[&str] = &[
    "distribution volume",
    "volume of distribution",
    "compartment volume",
];

/// Derived categorical attributes for one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub model_type: ModelType,
    pub population: Population,
    pub has_pk_model: bool,
    pub has_estimated_parameters: bool,
    pub has_distribution_volume: bool,
}

/// Classify an article from its title and summary.
///
/// Missing or empty text yields the all-fallback classification.
pub fn classify(title: &str, summary: &str) -> Classification {
    let combined = format!("{title} {summary}").to_lowercase();

    Classification {
        model_type: model_type(&combined),
        population: population(&combined),
        has_pk_model: contains_any(&combined, PK_MODEL_KEYWORDS),
        has_estimated_parameters: contains_any(&combined, ESTIMATED_PARAM_KEYWORDS)
            || has_parameter_value(&combined),
        has_distribution_volume: contains_any(&combined, DISTRIBUTION_VOLUME_KEYWORDS)
            || has_vd_mention(&combined),
    }
}

fn model_type(combined: &str) -> ModelType {
    for (model, phrases) in MODEL_TYPE_RULES {
        if phrases.iter().any(|p| combined.contains(p)) {
            return *model;
        }
    }
    // No specific phrase: a bare "pk" token still signals a generic model.
    if tokens(combined).any(|t| t == "pk") {
        return ModelType::GenericPk;
    }
    ModelType::Unspecified
}

fn population(combined: &str) -> Population {
    let tokens: Vec<&str> = tokens(combined).collect();
    for (population, term) in POPULATION_RULES {
        if tokens.contains(term) {
            return *population;
        }
    }
    Population::Unspecified
}

/// Whitespace tokens with surrounding punctuation trimmed.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
}
