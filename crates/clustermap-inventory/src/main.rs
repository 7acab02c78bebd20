//! slurm-inventory
//!
//! Generates an Ansible inventory file from a Slurm partition.

use anyhow::Context;
use clap::Parser;
use clustermap_core::ClustermapConfig;
use clustermap_slurm::{write_inventory, SlurmClient};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Generate Ansible inventory file from Slurm partition
#[derive(Parser, Debug)]
#[command(name = "slurm-inventory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Slurm partition name
    #[arg(long)]
    partition: String,

    /// Output inventory file path (defaults to the configured template)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ClustermapConfig::load(args.config.as_deref())?;

    init_logging(args.verbose, &config.logging.level);

    let output = args
        .output
        .unwrap_or_else(|| config.inventory.output_path(&args.partition));

    let client = SlurmClient::from_config(&config.slurm);
    write_inventory(&client, &args.partition, &output).with_context(|| {
        format!(
            "failed to generate inventory for partition {}",
            args.partition
        )
    })?;

    println!("Inventory file generated: {}", output.display());
    Ok(())
}

fn init_logging(verbose: bool, level: &str) {
    let log_level = if verbose {
        Level::DEBUG
    } else {
        match level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
