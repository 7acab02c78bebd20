//! GPU usage records and the per-node occupancy grid

use crate::{ClustermapError, ClustermapResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Number of GPU slots on every node
pub const GPUS_PER_NODE: usize = 8;

/// Number of columns in a usage CSV row: node, model, GPU list
const USAGE_COLUMNS: usize = 3;

/// One row of the usage CSV: a model holding some GPUs on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Hostname
    pub node: String,
    /// Model occupying the GPUs (e.g. a GPU SKU or served model name)
    pub model: String,
    /// GPU indices in source order, duplicates kept
    pub gpus: Vec<u32>,
}

impl UsageRecord {
    pub fn new(node: impl Into<String>, model: impl Into<String>, gpus: Vec<u32>) -> Self {
        Self {
            node: node.into(),
            model: model.into(),
            gpus,
        }
    }
}

/// Parse a bracketed, whitespace-separated GPU list such as `[0 1 2 3]`
pub fn parse_gpu_list(raw: &str, line: u64) -> ClustermapResult<Vec<u32>> {
    raw.trim_matches(|c| c == '[' || c == ']')
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| ClustermapError::InvalidGpuToken {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse usage records from CSV input.
///
/// The first row is always treated as a header and skipped. Empty rows are
/// skipped; any other row must have exactly three columns.
pub fn parse_gpu_data<R: Read>(reader: R) -> ClustermapResult<Vec<UsageRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = reader.records();
    match rows.next() {
        Some(header) => {
            header?;
        }
        None => return Err(ClustermapError::MissingHeader),
    }

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        if row.is_empty() {
            continue;
        }
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != USAGE_COLUMNS {
            return Err(ClustermapError::MalformedRow {
                line,
                columns: row.len(),
            });
        }

        records.push(UsageRecord {
            node: row[0].to_string(),
            model: row[1].to_string(),
            gpus: parse_gpu_list(&row[2], line)?,
        });
    }

    Ok(records)
}

/// Read usage records from a CSV file
pub fn read_gpu_data(path: &Path) -> ClustermapResult<Vec<UsageRecord>> {
    let file = std::fs::File::open(path)?;
    let records = parse_gpu_data(file)?;
    debug!(path = %path.display(), records = records.len(), "Read GPU usage data");
    Ok(records)
}

/// State of a single GPU slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum GpuSlot {
    #[default]
    Free,
    Occupied(String),
}

impl GpuSlot {
    /// Slot for a model name; an empty name leaves the slot free
    pub fn for_model(model: &str) -> Self {
        if model.is_empty() {
            GpuSlot::Free
        } else {
            GpuSlot::Occupied(model.to_string())
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, GpuSlot::Free)
    }

    /// Model occupying the slot, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            GpuSlot::Free => None,
            GpuSlot::Occupied(model) => Some(model),
        }
    }
}

impl From<Option<String>> for GpuSlot {
    fn from(model: Option<String>) -> Self {
        model.map_or(GpuSlot::Free, |m| GpuSlot::for_model(&m))
    }
}

impl From<GpuSlot> for Option<String> {
    fn from(slot: GpuSlot) -> Self {
        match slot {
            GpuSlot::Free => None,
            GpuSlot::Occupied(model) => Some(model),
        }
    }
}

/// Slots of one node, indexed by GPU number
pub type NodeSlots = [GpuSlot; GPUS_PER_NODE];

/// Per-node GPU occupancy, ordered by hostname
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccupancyGrid {
    nodes: BTreeMap<String, NodeSlots>,
}

impl OccupancyGrid {
    /// Build the grid for every node named by `records` or `known_nodes`.
    ///
    /// Records are applied in order, so a later record wins a contested
    /// slot. An index outside the node's slots is an error.
    pub fn build(records: &[UsageRecord], known_nodes: &[String]) -> ClustermapResult<Self> {
        let free_slots = || -> NodeSlots { std::array::from_fn(|_| GpuSlot::Free) };

        let mut nodes: BTreeMap<String, NodeSlots> = BTreeMap::new();
        for node in known_nodes {
            nodes.entry(node.clone()).or_insert_with(free_slots);
        }

        for record in records {
            let slots = nodes.entry(record.node.clone()).or_insert_with(free_slots);
            for &index in &record.gpus {
                let slot = slots.get_mut(index as usize).ok_or_else(|| {
                    ClustermapError::GpuIndexOutOfRange {
                        node: record.node.clone(),
                        index,
                    }
                })?;
                *slot = GpuSlot::for_model(&record.model);
            }
        }

        let grid = Self { nodes };
        debug!(
            nodes = grid.len(),
            occupied = grid.occupied_count(),
            "Built occupancy grid"
        );
        Ok(grid)
    }

    /// Hostnames in report order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Slots for a node
    pub fn slots(&self, node: &str) -> Option<&NodeSlots> {
        self.nodes.get(node)
    }

    /// Iterate nodes with their slots in report order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeSlots)> {
        self.nodes.iter().map(|(node, slots)| (node.as_str(), slots))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of occupied slots across all nodes
    pub fn occupied_count(&self) -> usize {
        self.nodes
            .values()
            .flatten()
            .filter(|slot| !slot.is_free())
            .count()
    }

    /// Number of free slots across all nodes
    pub fn free_count(&self) -> usize {
        self.len() * GPUS_PER_NODE - self.occupied_count()
    }
}

/// Build the occupancy grid from usage records and known nodes
pub fn build_grid(records: &[UsageRecord], known_nodes: &[String]) -> ClustermapResult<OccupancyGrid> {
    OccupancyGrid::build(records, known_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_parse_gpu_list() {
        assert_eq!(parse_gpu_list("[0 1 2 3]", 2).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_gpu_list("[]", 2).unwrap(), Vec::<u32>::new());
        assert_eq!(parse_gpu_list("[3  3 1]", 2).unwrap(), vec![3, 3, 1]);
    }

    #[test]
    fn test_parse_gpu_list_invalid_token() {
        let err = parse_gpu_list("[0 x]", 5).unwrap_err();
        match err {
            ClustermapError::InvalidGpuToken { line, token } => {
                assert_eq!(line, 5);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_gpu_data() {
        let input = "node,model,GPUs\nnode1,A100,\"[0 1 2 3]\"\n\nnode2,H100,[0]\n";
        let records = parse_gpu_data(input.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                UsageRecord::new("node1", "A100", vec![0, 1, 2, 3]),
                UsageRecord::new("node2", "H100", vec![0]),
            ]
        );
    }

    #[test]
    fn test_parse_gpu_data_header_only() {
        let records = parse_gpu_data("node,model,GPUs\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_gpu_data_empty_input() {
        let err = parse_gpu_data("".as_bytes()).unwrap_err();
        assert!(matches!(err, ClustermapError::MissingHeader));
    }

    #[test]
    fn test_parse_gpu_data_wrong_column_count() {
        let input = "node,model,GPUs\nnode1,A100\n";
        let err = parse_gpu_data(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ClustermapError::MalformedRow { line: 2, columns: 2 }
        ));
    }

    #[test]
    fn test_parse_gpu_data_non_numeric_gpu() {
        let input = "node,model,GPUs\nnode1,A100,[0 one]\n";
        let err = parse_gpu_data(input.as_bytes()).unwrap_err();
        assert!(matches!(err, ClustermapError::InvalidGpuToken { .. }));
    }

    #[test]
    fn test_read_gpu_data_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_gpu_data(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ClustermapError::Io(_)));
    }

    #[test]
    fn test_build_grid_example() {
        let records = vec![
            UsageRecord::new("node1", "A100", vec![0, 1, 2, 3]),
            UsageRecord::new("node2", "H100", vec![0]),
        ];
        let grid = build_grid(&records, &nodes(&["node1", "node2", "node3"])).unwrap();

        assert_eq!(grid.nodes().collect::<Vec<_>>(), vec!["node1", "node2", "node3"]);

        let node1 = grid.slots("node1").unwrap();
        for slot in &node1[..4] {
            assert_eq!(slot.model(), Some("A100"));
        }
        assert!(node1[4..].iter().all(GpuSlot::is_free));

        let node2 = grid.slots("node2").unwrap();
        assert_eq!(node2[0].model(), Some("H100"));
        assert!(node2[1..].iter().all(GpuSlot::is_free));

        assert!(grid.slots("node3").unwrap().iter().all(GpuSlot::is_free));
        assert_eq!(grid.occupied_count(), 5);
        assert_eq!(grid.free_count(), 19);
    }

    #[test]
    fn test_build_grid_last_record_wins() {
        let records = vec![
            UsageRecord::new("nodeA", "X", vec![0, 1]),
            UsageRecord::new("nodeA", "Y", vec![1]),
        ];
        let grid = build_grid(&records, &[]).unwrap();
        let slots = grid.slots("nodeA").unwrap();
        assert_eq!(slots[0], GpuSlot::Occupied("X".to_string()));
        assert_eq!(slots[1], GpuSlot::Occupied("Y".to_string()));
    }

    #[test]
    fn test_build_grid_sorted_and_deduplicated() {
        let records = vec![UsageRecord::new("b-node", "A100", vec![7])];
        let grid = build_grid(&records, &nodes(&["c-node", "b-node", "a-node", "c-node"])).unwrap();
        assert_eq!(grid.nodes().collect::<Vec<_>>(), vec!["a-node", "b-node", "c-node"]);
        assert_eq!(grid.slots("b-node").unwrap()[7].model(), Some("A100"));
    }

    #[test]
    fn test_build_grid_index_out_of_range() {
        let records = vec![UsageRecord::new("node1", "A100", vec![0, 8])];
        let err = build_grid(&records, &[]).unwrap_err();
        assert!(matches!(
            err,
            ClustermapError::GpuIndexOutOfRange { ref node, index: 8 } if node == "node1"
        ));
    }

    #[test]
    fn test_empty_model_frees_slot() {
        let records = vec![
            UsageRecord::new("node1", "A100", vec![0]),
            UsageRecord::new("node1", "", vec![0]),
        ];
        let grid = build_grid(&records, &[]).unwrap();
        assert!(grid.slots("node1").unwrap()[0].is_free());
    }

    #[test]
    fn test_grid_serializes_as_node_map() {
        let records = vec![UsageRecord::new("node1", "A100", vec![1])];
        let grid = build_grid(&records, &[]).unwrap();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "node1": [null, "A100", null, null, null, null, null, null]
            })
        );
    }
}
