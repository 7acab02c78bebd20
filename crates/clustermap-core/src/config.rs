//! Configuration types for clustermap

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the operator's inventory and usage snapshots
pub const DEFAULT_DATA_DIR: &str = "/fsx/ubuntu/matt/cluster_visualization";

/// Placeholder substituted with the partition name in inventory templates
pub const PARTITION_PLACEHOLDER: &str = "{partition}";

/// Top-level configuration shared by both tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClustermapConfig {
    /// Scheduler command configuration
    pub slurm: SlurmConfig,
    /// Inventory generator configuration
    pub inventory: InventoryConfig,
    /// Report generator configuration
    pub report: ReportConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ClustermapConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, crate::ClustermapError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::ClustermapError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| crate::ClustermapError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from `path` when given, otherwise use the built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self, crate::ClustermapError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Scheduler command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlurmConfig {
    /// Path to the `sinfo` binary
    pub sinfo_path: PathBuf,
    /// Path to the `scontrol` binary
    pub scontrol_path: PathBuf,
}

impl Default for SlurmConfig {
    fn default() -> Self {
        Self {
            sinfo_path: PathBuf::from("sinfo"),
            scontrol_path: PathBuf::from("scontrol"),
        }
    }
}

/// Inventory generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Output path template; `{partition}` is replaced with the partition name
    pub output_template: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            output_template: format!("{}/inventory_{}.ini", DEFAULT_DATA_DIR, PARTITION_PLACEHOLDER),
        }
    }
}

impl InventoryConfig {
    /// Resolve the output path for a partition
    pub fn output_path(&self, partition: &str) -> PathBuf {
        PathBuf::from(self.output_template.replace(PARTITION_PLACEHOLDER, partition))
    }
}

/// Report generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// GPU usage CSV snapshot
    pub usage_csv: PathBuf,
    /// Inventory file listing every node, including idle ones
    pub inventory: PathBuf,
    /// HTML report destination
    pub output: PathBuf,
    /// Optional JSON dump of the occupancy grid
    pub json_output: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let data_dir = Path::new(DEFAULT_DATA_DIR);
        Self {
            usage_csv: data_dir.join("gpu_usage_combined.csv"),
            inventory: data_dir.join("inventory_ml.inference.ini"),
            output: PathBuf::from("gpu_allocation.html"),
            json_output: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `--verbose` is not given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
