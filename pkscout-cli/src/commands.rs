//! CLI subcommand handlers.

use std::path::{Path, PathBuf};

use pkscout_core::config::{load_config, ScoutConfig};
use pkscout_core::export::to_csv;
use pkscout_core::pipeline::{FilterPredicate, Pipeline, SortDirection, SortKey};
use pkscout_core::query::build_query;
use pkscout_core::session::SearchSession;
use pkscout_pubmed::PubMedClient;

use crate::table::render_table;
use crate::{Commands, ConfigAction, FilterArg, SortArg};

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands, workspace: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            terms,
            max_results,
            limit,
            inclusion,
            fraction,
            filters,
            refine_filters,
            sort,
            ascending,
            export,
            show_query,
        } => {
            let args = SearchArgs {
                terms,
                max_results,
                limit,
                inclusion,
                fraction,
                filters,
                refine_filters,
                sort,
                ascending,
                export,
                show_query,
            };
            handle_search(args, workspace).await
        }
        Commands::Config { action } => handle_config(action, workspace),
    }
}

struct SearchArgs {
    terms: Vec<String>,
    max_results: Option<usize>,
    limit: Option<usize>,
    inclusion: Option<String>,
    fraction: Option<u8>,
    filters: Vec<FilterArg>,
    refine_filters: Vec<FilterArg>,
    sort: SortArg,
    ascending: bool,
    export: Option<PathBuf>,
    show_query: bool,
}

async fn handle_search(args: SearchArgs, workspace: &Path) -> anyhow::Result<()> {
    let mut config = load_config(Some(workspace), None)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let query = build_query(&args.terms, &config.query.vocabulary, config.query.policy());
    if args.show_query {
        println!("Query: {query}");
    } else {
        tracing::info!(query = %query, "constructed PubMed query");
    }

    let client = PubMedClient::new().map_err(|e| anyhow::anyhow!("{}", e))?;

    let ids = match client.search_ids(&query, config.search.max_results).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "PubMed search failed");
            println!("PubMed search failed: {e}. No results.");
            return Ok(());
        }
    };
    println!("{} articles found.", ids.len());
    if ids.is_empty() {
        println!("No matching articles. Try broadening the search.");
        return Ok(());
    }

    let summaries = match client.fetch_summaries(&ids).await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!(error = %e, "PubMed detail fetch failed");
            println!("PubMed detail fetch failed: {e}. No results.");
            return Ok(());
        }
    };

    // Relevance scoring runs over the user's required terms, not the
    // enrichment vocabulary.
    let pipeline = Pipeline::new(args.terms.clone(), config.scoring.recency);
    let filters = filter_predicates(&args.filters);
    let sort_keys = sort_keys(args.sort, args.ascending);
    let records = pipeline.run(&summaries, &filters, &sort_keys, config.search.limit);

    if records.is_empty() {
        println!("No records left after filtering.");
        return Ok(());
    }
    println!("{}", render_table(&records));

    if !args.refine_filters.is_empty() {
        let mut session = SearchSession::new(query, pipeline.classify_and_score(&summaries));
        let refined = session.refine(
            filter_predicates(&args.refine_filters),
            &sort_keys,
            config.search.limit,
        );
        println!(
            "Refined to {} of {} fetched records (no re-fetch):",
            refined.len(),
            session.records().len()
        );
        if !refined.is_empty() {
            println!("{}", render_table(&refined));
        }
    }

    if let Some(path) = &args.export {
        std::fs::write(path, to_csv(&records))?;
        println!("Exported {} rows to {}", records.len(), path.display());
    }
    Ok(())
}

fn handle_config(action: ConfigAction, workspace: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_dir = workspace.join(".pkscout");
            std::fs::create_dir_all(&config_dir)?;

            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            let default_config = ScoutConfig::default();
            let toml_str = toml::to_string_pretty(&default_config)?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(Some(workspace), None)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut ScoutConfig, args: &SearchArgs) {
    if let Some(max_results) = args.max_results {
        config.search.max_results = max_results;
    }
    if let Some(limit) = args.limit {
        config.search.limit = limit;
    }
    if let Some(inclusion) = &args.inclusion {
        config.query.inclusion = inclusion.clone();
    }
    if let Some(fraction) = args.fraction {
        config.query.fraction_percent = fraction;
    }
}

fn filter_predicates(filters: &[FilterArg]) -> Vec<FilterPredicate> {
    filters
        .iter()
        .map(|f| match f {
            FilterArg::PkModel => FilterPredicate::HasPkModel,
            FilterArg::EstimatedParameters => FilterPredicate::HasEstimatedParameters,
            FilterArg::DistributionVolume => FilterPredicate::HasDistributionVolume,
        })
        .collect()
}

fn sort_keys(sort: SortArg, ascending: bool) -> Vec<(SortKey, SortDirection)> {
    let direction = if ascending {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    match sort {
        // Fixed composite: modeling papers first, best score on top.
        SortArg::PkFirst => vec![
            (SortKey::HasPkModel, SortDirection::Descending),
            (SortKey::RelevanceScore, SortDirection::Descending),
        ],
        SortArg::Relevance => vec![(SortKey::RelevanceScore, direction)],
        SortArg::Journal => vec![(SortKey::Journal, direction)],
        SortArg::Date => vec![(SortKey::PublicationDate, direction)],
        SortArg::Title => vec![(SortKey::Title, direction)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkscout_core::query::InclusionPolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_overrides() {
        let mut config = ScoutConfig::default();
        let args = SearchArgs {
            terms: vec!["antibiotic".into()],
            max_results: Some(50),
            limit: Some(5),
            inclusion: Some("none".into()),
            fraction: None,
            filters: Vec::new(),
            refine_filters: Vec::new(),
            sort: SortArg::PkFirst,
            ascending: false,
            export: None,
            show_query: false,
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.search.max_results, 50);
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.query.policy(), InclusionPolicy::None);
        // Untouched values keep the config defaults.
        assert_eq!(config.query.fraction_percent, 33);
    }

    #[test]
    fn test_filter_predicates_mapping() {
        let predicates = filter_predicates(&[
            FilterArg::PkModel,
            FilterArg::DistributionVolume,
        ]);
        assert_eq!(
            predicates,
            vec![
                FilterPredicate::HasPkModel,
                FilterPredicate::HasDistributionVolume
            ]
        );
    }

    #[test]
    fn test_sort_keys_pk_first_ignores_direction_flag() {
        let keys = sort_keys(SortArg::PkFirst, true);
        assert_eq!(
            keys,
            vec![
                (SortKey::HasPkModel, SortDirection::Descending),
                (SortKey::RelevanceScore, SortDirection::Descending),
            ]
        );
    }

    #[test]
    fn test_sort_keys_single_key_direction() {
        assert_eq!(
            sort_keys(SortArg::Journal, true),
            vec![(SortKey::Journal, SortDirection::Ascending)]
        );
        assert_eq!(
            sort_keys(SortArg::Date, false),
            vec![(SortKey::PublicationDate, SortDirection::Descending)]
        );
    }

    #[test]
    fn test_config_init_and_show_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        handle_config(ConfigAction::Init, dir.path()).unwrap();
        let written = dir.path().join(".pkscout").join("config.toml");
        assert!(written.exists());

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.search.max_results, 20);

        // Init is idempotent: a second run leaves the file alone.
        handle_config(ConfigAction::Init, dir.path()).unwrap();
    }
}
