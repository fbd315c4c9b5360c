//! Configuration system for pkscout.
//!
//! Uses `figment` for layered configuration: defaults -> user config ->
//! workspace config -> environment. Configuration is loaded from
//! `~/.config/pkscout/config.toml` and/or `.pkscout/config.toml` in the
//! working directory, with `PKSCOUT_`-prefixed environment variables on
//! top.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::query::InclusionPolicy;
use crate::score::RecencyPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    pub search: SearchConfig,
    pub query: QueryConfig,
    pub scoring: ScoringConfig,
}

impl ScoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.fraction_percent == 0 || self.query.fraction_percent > 100 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "query.fraction_percent must be 1..=100, got {}",
                    self.query.fraction_percent
                ),
            });
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                message: "search.max_results must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Search transport limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum identifiers requested from the search transport.
    pub max_results: usize,
    /// Maximum rows kept after filtering and sorting.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            limit: 20,
        }
    }
}

/// Query enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Inclusion policy name: "all", "fraction", or "none".
    pub inclusion: String,
    /// Percentage of the vocabulary used when inclusion is "fraction".
    pub fraction_percent: u8,
    /// Ordered domain vocabulary; fraction subsets keep the first terms.
    pub vocabulary: Vec<String>,
}

impl QueryConfig {
    pub fn policy(&self) -> InclusionPolicy {
        InclusionPolicy::from_str_loose(&self.inclusion, self.fraction_percent)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            inclusion: "fraction".to_string(),
            fraction_percent: 33,
            vocabulary: default_vocabulary(),
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub recency: RecencyPolicy,
}

/// Built-in pharmacometric vocabulary, in priority order.
pub fn default_vocabulary() -> Vec<String> {
    [
        "PK model",
        "bicompartimental",
        "monocompartimental",
        "pharmacokinetics",
        "pharmacodynamics",
        "estimated parameters",
        "clearance",
        "absorption",
        "distribution volume",
        "central compartment",
        "Monolix",
        "NONMEM",
        "Mrgsolve",
        "Lixoft",
        "population modeling",
        "parameter variability",
        "elimination rate",
        "half-life",
        "bioavailability",
        "rate of absorption",
        "compartment volume",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `PKSCOUT_`)
/// 3. Workspace-local config (`.pkscout/config.toml`)
/// 4. User config (`~/.config/pkscout/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&ScoutConfig>,
) -> Result<ScoutConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(ScoutConfig::default()));

    if let Some(config_dir) = directories::ProjectDirs::from("dev", "pkscout", "pkscout") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".pkscout").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Environment variables (PKSCOUT_SEARCH__MAX_RESULTS, etc.)
    figment = figment.merge(Env::prefixed("PKSCOUT_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoutConfig::default();
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.query.fraction_percent, 33);
        assert_eq!(config.query.vocabulary.len(), 21);
        assert!(config.scoring.recency.enabled);
        assert_eq!(config.scoring.recency.reference_year, 2025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = ScoutConfig::default();
        assert_eq!(config.query.policy(), InclusionPolicy::Fraction(33));
        config.query.inclusion = "all".into();
        assert_eq!(config.query.policy(), InclusionPolicy::All);
        config.query.inclusion = "none".into();
        assert_eq!(config.query.policy(), InclusionPolicy::None);
    }

    #[test]
    fn test_validate_rejects_bad_fraction() {
        let mut config = ScoutConfig::default();
        config.query.fraction_percent = 0;
        assert!(config.validate().is_err());
        config.query.fraction_percent = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ScoutConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: ScoutConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored.search.limit, config.search.limit);
        assert_eq!(restored.query.vocabulary, config.query.vocabulary);
    }

    #[test]
    fn test_workspace_config_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_dir = dir.path().join(".pkscout");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[search]\nmax_results = 50\nlimit = 5\n",
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.search.max_results, 50);
        assert_eq!(config.search.limit, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.query.fraction_percent, 33);
    }

    #[test]
    fn test_explicit_overrides_win() {
        let mut overrides = ScoutConfig::default();
        overrides.search.max_results = 7;
        let config = load_config(None, Some(&overrides)).unwrap();
        assert_eq!(config.search.max_results, 7);
    }
}
