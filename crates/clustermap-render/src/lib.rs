//! clustermap-render: GPU occupancy report generation
//!
//! Reads the usage CSV and inventory named by a [`ReportConfig`], builds the
//! occupancy grid and writes it out as a static HTML page.

pub mod html;

pub use html::render;

use clustermap_core::{
    build_grid, read_gpu_data, read_known_nodes, ClustermapResult, OccupancyGrid, ReportConfig,
};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// HTML file that was written
    pub output: PathBuf,
    /// JSON grid dump, if one was requested
    pub json_output: Option<PathBuf>,
    /// Number of nodes in the report
    pub nodes: usize,
    /// Occupied GPU slots
    pub occupied: usize,
    /// Free GPU slots
    pub free: usize,
}

/// Load inputs and build the occupancy grid without writing anything
pub fn load_grid(config: &ReportConfig) -> ClustermapResult<OccupancyGrid> {
    let records = read_gpu_data(&config.usage_csv)?;
    let known_nodes = read_known_nodes(&config.inventory)?;
    info!(
        records = records.len(),
        known_nodes = known_nodes.len(),
        "Loaded report inputs"
    );
    build_grid(&records, &known_nodes)
}

/// Generate the report described by `config`.
///
/// All inputs are parsed before any output is written.
pub fn generate_report(config: &ReportConfig) -> ClustermapResult<ReportSummary> {
    let grid = load_grid(config)?;
    let html = render(&grid);
    let json = match &config.json_output {
        Some(_) => Some(serde_json::to_string_pretty(&grid)?),
        None => None,
    };

    std::fs::write(&config.output, html)?;
    if let (Some(path), Some(json)) = (&config.json_output, json) {
        std::fs::write(path, json)?;
    }

    let summary = ReportSummary {
        output: config.output.clone(),
        json_output: config.json_output.clone(),
        nodes: grid.len(),
        occupied: grid.occupied_count(),
        free: grid.free_count(),
    };
    info!(
        path = %summary.output.display(),
        nodes = summary.nodes,
        occupied = summary.occupied,
        free = summary.free,
        "Wrote GPU report"
    );
    Ok(summary)
}
