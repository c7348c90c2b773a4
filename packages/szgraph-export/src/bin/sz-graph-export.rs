//! Entity Resolution Graph Export CLI
//!
//! # Usage
//!
//! ```bash
//! # Resolved entities and derived relationships only
//! sz-graph-export -o /tmp/export/
//!
//! # Add source records and disclosed relationships
//! sz-graph-export -o /tmp/export/run1_ -S
//! ```
//!
//! The repository location comes from `SENZING_ENGINE_CONFIGURATION_JSON` or
//! `SENZING_CONFIG_FILE`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use szgraph_export::config::{resolve_output_base, EngineSettings, ExportConfig, MissingTargetPolicy};
use szgraph_export::features::graph_builder::GraphStats;
use szgraph_export::pipeline::{elapsed_minutes, DocumentWriter, ExportDriver};
use szgraph_export::{AttributeCatalog, Result};
use szgraph_storage::SqliteRepository;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sz-graph-export")]
#[command(about = "Export resolved entities and their relationships as node-link graph JSON", long_about = None)]
struct Cli {
    /// Path to the output files, including a base file name if desired
    #[arg(short = 'o', long = "output_path", visible_alias = "output-path")]
    output_path: Option<String>,

    /// Also export source record nodes and disclosed relationships
    #[arg(short = 'S', long = "include_source_nodes", visible_alias = "include-source-nodes")]
    include_source_nodes: bool,

    /// Turn debug logging on
    #[arg(short = 'D', long)]
    debug: bool,

    /// Engine configuration JSON to read the attribute dictionary from
    /// instead of the repository
    #[arg(long)]
    config_json: Option<PathBuf>,

    /// Export settings file (YAML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Warn for every disclosed relationship whose target record is missing
    #[arg(long)]
    warn_missing_targets: bool,

    /// Entity ids per range query
    #[arg(long)]
    chunk_size: Option<i64>,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Settings file first, then command line flags on top
fn export_config(cli: &Cli) -> Result<ExportConfig> {
    let mut config = match &cli.settings {
        Some(path) => ExportConfig::from_yaml(path)?,
        None => ExportConfig::default(),
    };
    if cli.include_source_nodes {
        config = config.include_source_nodes(true);
    }
    if cli.warn_missing_targets {
        config = config.missing_target_policy(MissingTargetPolicy::Warn);
    }
    if let Some(chunk_size) = cli.chunk_size {
        config = config.chunk_size(chunk_size);
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, output_path: &str) -> Result<GraphStats> {
    let config = export_config(cli)?;

    let settings = EngineSettings::from_env()?;
    let db_path = settings.database_path()?;
    let repository = SqliteRepository::open(&db_path)?;

    let catalog = match &cli.config_json {
        Some(path) => AttributeCatalog::from_json_file(path)?,
        None => AttributeCatalog::load(&repository)?,
    };

    let graphs = ExportDriver::new(&repository, &catalog, config).run()?;
    DocumentWriter::new(resolve_output_base(output_path)).write(&graphs)?;
    Ok(graphs.stats)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let Some(output_path) = cli.output_path.clone() else {
        error!("an output path is required");
        return ExitCode::FAILURE;
    };

    let start = Instant::now();
    match run(&cli, &output_path) {
        Ok(stats) => {
            info!(
                entities = stats.entities,
                records = stats.records,
                derived_edges = stats.derived_edges,
                disclosed_edges = stats.disclosed_edges,
                missing_pointer_targets = stats.missing_pointer_targets,
                "processed completed in {} minutes",
                elapsed_minutes(start)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
