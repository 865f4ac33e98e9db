//! Stele daemon: replays governor events into the index and queries it.

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stele_governance::CreationPolicy;
use stele_indexer::{init_logging, Indexer, IndexerConfig, IndexerMetrics, JsonLinesSource};
use stele_store::{EventLogStore, ProposalStatusStore, SettingsStore, VoteResultStore, VoteStore};
use stele_store_lmdb::LmdbStore;
use stele_types::ProposalId;

#[derive(Parser)]
#[command(name = "stele-daemon", about = "Governor event indexer")]
struct Cli {
    /// Directory of the LMDB environment.
    #[arg(long, env = "STELE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// LMDB map size in MiB.
    #[arg(long, env = "STELE_MAP_SIZE_MB")]
    map_size_mb: Option<usize>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "STELE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STELE_LOG_FORMAT")]
    log_format: Option<String>,

    /// What a second creation event does to an existing tally:
    /// "reset" or "keep_existing".
    #[arg(long, env = "STELE_CREATION_POLICY", value_parser = parse_policy)]
    creation_policy: Option<CreationPolicy>,

    /// Write Prometheus metrics in text format to this file after indexing.
    #[arg(long, env = "STELE_METRICS_FILE")]
    metrics_file: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "STELE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a newline-delimited JSON event file into the index.
    Index {
        /// Event file, one envelope per line.
        events: PathBuf,
    },
    /// Show a proposal's creation record, status and vote tally.
    Proposal { id: ProposalId },
    /// List the latest vote of every voter on a proposal.
    Votes { id: ProposalId },
    /// Show the governor-wide settings.
    Settings,
    /// Print the effective configuration as TOML.
    Config,
}

fn parse_policy(s: &str) -> Result<CreationPolicy, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "reset" => Ok(CreationPolicy::Reset),
        "keep_existing" => Ok(CreationPolicy::KeepExisting),
        other => Err(format!(
            "unknown creation policy {other:?} (expected \"reset\" or \"keep_existing\")"
        )),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => Some(IndexerConfig::from_toml_file(path)?),
        None => None,
    };
    let base = file_config.unwrap_or_default();

    let config = IndexerConfig {
        data_dir: cli.data_dir.unwrap_or(base.data_dir),
        map_size_mb: cli.map_size_mb.unwrap_or(base.map_size_mb),
        log_format: cli.log_format.unwrap_or(base.log_format),
        log_level: cli.log_level.unwrap_or(base.log_level),
        creation_policy: cli.creation_policy.unwrap_or(base.creation_policy),
        metrics_file: cli.metrics_file.or(base.metrics_file),
    };

    init_logging(config.log_format()?, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Index { events } => index(&config, &events)?,
        Command::Proposal { id } => {
            let store = open_store(&config)?;
            let record = store.find_proposal_record(&id)?;
            let status = store.get_status(&id)?;
            let tally = store.get_vote_result(&id)?;
            if record.is_none() && status.is_none() && tally.is_none() {
                anyhow::bail!("proposal {id} not found");
            }
            print_json(&json!({
                "proposal": record,
                "status": status,
                "tally": tally,
            }))?;
        }
        Command::Votes { id } => {
            let store = open_store(&config)?;
            print_json(&store.get_votes(&id)?)?;
        }
        Command::Settings => {
            let store = open_store(&config)?;
            print_json(&store.get_settings()?)?;
        }
        Command::Config => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

fn open_store(config: &IndexerConfig) -> anyhow::Result<LmdbStore> {
    LmdbStore::open(&config.data_dir, config.map_size())
        .with_context(|| format!("failed to open store at {}", config.data_dir.display()))
}

fn index(config: &IndexerConfig, events: &Path) -> anyhow::Result<()> {
    tracing::info!(
        "Indexing {} into {} (creation policy: {:?})",
        events.display(),
        config.data_dir.display(),
        config.creation_policy,
    );

    let store = Arc::new(open_store(config)?);
    let metrics = Arc::new(IndexerMetrics::new());
    let indexer = Indexer::new(store.clone(), config.creation_policy, metrics.clone());

    let mut source = JsonLinesSource::open(events)
        .with_context(|| format!("failed to open {}", events.display()))?;
    let result = indexer.run(&mut source);

    // Metrics are written even when the run failed part-way.
    if let Some(ref path) = config.metrics_file {
        std::fs::write(path, metrics.encode())
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
        tracing::info!("Metrics written to {}", path.display());
    }

    let summary = result.with_context(|| format!("indexing stopped at line {}", source.line()))?;
    tracing::info!(
        "Indexed {} events (blocks {:?}..={:?}), {} log entries stored",
        summary.events,
        summary.first_block,
        summary.last_block,
        store.log_entry_count()?,
    );
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
