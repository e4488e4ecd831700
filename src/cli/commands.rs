use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Duration;
use clap::{Parser, Subcommand};

use crate::config::IndexerConfig;
use crate::models::RecordKind;
use crate::orchestrator::Indexer;
use crate::parsers::format_duration;
use crate::utils::{enumerate_vault, publish_output, read_document};

#[derive(Parser)]
#[command(name = "vault-tasks")]
#[command(version = "0.1.0")]
#[command(about = "Index markdown tasks and focus sessions into one aggregated note", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rescan the vault and publish the aggregated output
    Scan {
        /// Vault root directory
        #[arg(default_value = ".")]
        vault: PathBuf,
        /// Output file, relative to the vault unless absolute
        #[arg(short, long, default_value = "output.md")]
        output: PathBuf,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show statistics about the indexed vault
    Stats {
        /// Vault root directory
        #[arg(default_value = ".")]
        vault: PathBuf,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Scan { vault, output, config }) => {
            scan(vault, output, config.as_deref())?;
        }
        Some(Commands::Stats { vault, config }) => {
            show_stats(vault, config.as_deref())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<IndexerConfig> {
    match path {
        Some(path) => IndexerConfig::load(path),
        None => Ok(IndexerConfig::default()),
    }
}

/// Rebuild the whole index and run a full rescan, reporting read failures
/// and parse warnings on stderr without aborting the scan.
fn rescan_vault(vault: &Path, exclude: Option<&Path>, config: IndexerConfig) -> Result<Indexer> {
    let max_bytes = config.max_document_bytes;
    let indexer = Indexer::new(config);

    let mut contents = Vec::new();
    let mut unreadable = Vec::new();
    for (key, path) in enumerate_vault(vault, exclude)? {
        match read_document(&path, max_bytes) {
            Ok(text) => contents.push((key, text)),
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", key, e);
                unreadable.push(key);
            }
        }
    }

    let outcome = indexer.full_rescan_with_unreadable(contents, &unreadable)?;
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }
    eprintln!(
        "Indexed {} documents ({} warnings, {} read failures)",
        outcome.document_count,
        outcome.warnings.len(),
        unreadable.len()
    );

    Ok(indexer)
}

fn scan(vault: &Path, output: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let output_path = if output.is_absolute() { output.to_path_buf() } else { vault.join(output) };

    let indexer = rescan_vault(vault, Some(&output_path), config)?;
    let rendered = indexer.render()?;
    publish_output(&output_path, &rendered)?;

    eprintln!("Published {}", output_path.display());
    Ok(())
}

fn show_stats(vault: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let indexer = rescan_vault(vault, None, config)?;

    let snapshot = indexer.snapshot();
    let records: Vec<_> = snapshot.iter().flat_map(|(_, records)| records).collect();

    let open_tasks = records
        .iter()
        .filter(|r| matches!(r.kind, RecordKind::Task { completed: false }))
        .count();
    let done_tasks = records
        .iter()
        .filter(|r| matches!(r.kind, RecordKind::Task { completed: true }))
        .count();
    let sessions = records.iter().filter(|r| r.is_session()).count();
    let total_session_time = records
        .iter()
        .filter_map(|r| r.duration())
        .fold(Duration::zero(), |acc, d| acc.checked_add(&d).unwrap_or(acc));

    println!("Vault Task Statistics");
    println!("================================");
    println!("Documents indexed: {}", snapshot.len());
    println!("Total records: {}", records.len());
    println!("  Open tasks: {}", open_tasks);
    println!("  Done tasks: {}", done_tasks);
    println!("  Sessions: {}", sessions);
    println!(
        "Total session time: {}",
        format_duration(total_session_time.num_seconds().max(0) as u64)
    );

    Ok(())
}
