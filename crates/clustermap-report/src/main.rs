//! gpu-report
//!
//! Renders a static HTML report of GPU occupancy per node from a usage CSV
//! snapshot and an inventory file. With no flags it reads the built-in
//! default paths.

use anyhow::Context;
use clap::Parser;
use clustermap_core::ClustermapConfig;
use clustermap_render::generate_report;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Render GPU allocation per node as a static HTML page
#[derive(Parser, Debug)]
#[command(name = "gpu-report")]
#[command(version, about, long_about = None)]
struct Args {
    /// GPU usage CSV (node, model, GPU list)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Inventory file listing every node
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// HTML output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the occupancy grid as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = ClustermapConfig::load(args.config.as_deref())?;

    init_logging(args.verbose, &config.logging.level);

    if let Some(csv) = args.csv {
        config.report.usage_csv = csv;
    }
    if let Some(inventory) = args.inventory {
        config.report.inventory = inventory;
    }
    if let Some(output) = args.output {
        config.report.output = output;
    }
    if args.json.is_some() {
        config.report.json_output = args.json;
    }

    let report = &config.report;

    let summary = generate_report(report).with_context(|| {
        format!(
            "failed to generate GPU report from {}",
            report.usage_csv.display()
        )
    })?;

    let absolute = std::path::absolute(&summary.output)
        .with_context(|| format!("failed to resolve {}", summary.output.display()))?;
    println!("HTML file generated as '{}'", summary.output.display());
    println!("Absolute path: {}", absolute.display());
    if let Some(json) = &summary.json_output {
        println!("JSON file generated as '{}'", json.display());
    }

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
