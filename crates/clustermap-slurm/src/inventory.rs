//! Inventory writer: Slurm partition to Ansible inventory

use clustermap_core::{write_inventory_file, ClustermapResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::client::SlurmClient;
use crate::traits::CommandRunner;

/// Outcome of a successful inventory run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReport {
    /// File that was written
    pub path: PathBuf,
    /// Hostnames written, in scheduler expansion order
    pub hosts: Vec<String>,
}

/// Write the inventory for `partition` to `output_path`.
///
/// Every node is described before the file is opened, so a scheduler
/// failure leaves any existing file untouched. Descriptors are logged but
/// not written; the inventory records hostnames only.
pub fn write_inventory<R: CommandRunner>(
    client: &SlurmClient<R>,
    partition: &str,
    output_path: &Path,
) -> ClustermapResult<InventoryReport> {
    let hosts = client.list_partition_nodes(partition)?;

    for host in &hosts {
        let node = client.describe_node(host)?;
        debug!(
            node = %host,
            state = %node.state,
            features = %node.features,
            cpus = node.cpus,
            memory_mb = node.memory_mb,
            "Described node"
        );
    }

    write_inventory_file(output_path, &hosts)?;
    info!(
        partition = partition,
        path = %output_path.display(),
        nodes = hosts.len(),
        "Wrote inventory"
    );

    Ok(InventoryReport {
        path: output_path.to_path_buf(),
        hosts,
    })
}
