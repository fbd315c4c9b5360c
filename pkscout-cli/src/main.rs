//! pkscout CLI: search PubMed, rank pharmacokinetic-modeling papers,
//! and export the result table.

mod commands;
mod table;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// pkscout: PubMed literature triage for PK modeling
#[derive(Parser, Debug)]
#[command(name = "pkscout", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (location of `.pkscout/config.toml`)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search PubMed and print the ranked result table
    Search {
        /// Required search terms, all must match
        #[arg(required = true)]
        terms: Vec<String>,

        /// Maximum identifiers to fetch from PubMed
        #[arg(long)]
        max_results: Option<usize>,

        /// Maximum rows to keep after filtering and sorting
        #[arg(long)]
        limit: Option<usize>,

        /// Vocabulary inclusion policy: all, fraction, none
        #[arg(long)]
        inclusion: Option<String>,

        /// Vocabulary percentage when inclusion is "fraction"
        #[arg(long)]
        fraction: Option<u8>,

        /// Keep only records matching these flags (repeatable)
        #[arg(long = "filter", value_enum)]
        filters: Vec<FilterArg>,

        /// After the main table, run a refine pass over the already
        /// fetched records with these flags (repeatable, no re-fetch)
        #[arg(long = "refine-filter", value_enum)]
        refine_filters: Vec<FilterArg>,

        /// Sort order for the result table
        #[arg(long, value_enum, default_value = "pk-first")]
        sort: SortArg,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Write the full result set to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the constructed PubMed query before searching
        #[arg(long)]
        show_query: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Write a default config file to the workspace
    Init,
    /// Print the effective merged configuration
    Show,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FilterArg {
    PkModel,
    EstimatedParameters,
    DistributionVolume,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortArg {
    /// PK-model papers first, then by relevance score
    PkFirst,
    Relevance,
    Journal,
    Date,
    Title,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "pkscout", "pkscout")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "pkscout.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_flags() {
        let cli = Cli::parse_from([
            "pkscout",
            "search",
            "antibiotic",
            "ICU",
            "--max-results",
            "30",
            "--filter",
            "pk-model",
            "--filter",
            "estimated-parameters",
            "--sort",
            "relevance",
            "--show-query",
        ]);
        match cli.command {
            Commands::Search {
                terms,
                max_results,
                filters,
                sort,
                show_query,
                ..
            } => {
                assert_eq!(terms, vec!["antibiotic", "ICU"]);
                assert_eq!(max_results, Some(30));
                assert_eq!(
                    filters,
                    vec![FilterArg::PkModel, FilterArg::EstimatedParameters]
                );
                assert_eq!(sort, SortArg::Relevance);
                assert!(show_query);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::parse_from(["pkscout", "config", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }
}
