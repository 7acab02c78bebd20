//! Node descriptors parsed from `scontrol show node -o` output

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State reported when the scheduler output carries no `State` field
pub const UNKNOWN_STATE: &str = "unknown";

/// Per-node details reported by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Scheduler state (e.g. `IDLE`, `MIXED`, `DOWN+DRAIN`)
    pub state: String,
    /// Raw feature string
    pub features: String,
    /// Total CPU count
    pub cpus: u32,
    /// Real memory in megabytes
    pub memory_mb: u64,
}

impl Default for NodeDescriptor {
    fn default() -> Self {
        Self {
            state: UNKNOWN_STATE.to_string(),
            features: String::new(),
            cpus: 0,
            memory_mb: 0,
        }
    }
}

impl NodeDescriptor {
    /// Build a descriptor from one-line `Key=Value` scheduler output.
    ///
    /// Missing, empty or unparsable fields fall back to the defaults.
    pub fn parse(output: &str) -> Self {
        let fields = parse_key_values(output);
        let defaults = Self::default();

        Self {
            state: fields
                .get("State")
                .map(|v| v.to_string())
                .unwrap_or(defaults.state),
            features: fields
                .get("Features")
                .map(|v| v.to_string())
                .unwrap_or(defaults.features),
            cpus: fields
                .get("CPUTot")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cpus),
            memory_mb: fields
                .get("RealMemory")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_mb),
        }
    }
}

/// Split whitespace-separated `Key=Value` tokens into a map.
///
/// The first occurrence of a key wins; tokens without `=` and empty values
/// are ignored.
pub fn parse_key_values(output: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();
    for token in output.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        fields.entry(key).or_insert(value);
    }
    fields
}
