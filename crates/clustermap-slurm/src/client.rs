//! Slurm query adapter
//!
//! Resolves a partition to its hostnames and describes individual nodes
//! through `sinfo` and `scontrol`.

use clustermap_core::{ClustermapError, ClustermapResult, NodeDescriptor, SlurmConfig};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::process::ProcessRunner;
use crate::traits::CommandRunner;

/// Client for the Slurm command-line tools
pub struct SlurmClient<R = ProcessRunner> {
    runner: R,
    sinfo_path: PathBuf,
    scontrol_path: PathBuf,
}

impl SlurmClient<ProcessRunner> {
    /// Create a client that runs the configured binaries as child processes
    pub fn from_config(config: &SlurmConfig) -> Self {
        Self::new(ProcessRunner::new(), config)
    }
}

impl<R: CommandRunner> SlurmClient<R> {
    /// Create a client over an arbitrary command runner
    pub fn new(runner: R, config: &SlurmConfig) -> Self {
        Self {
            runner,
            sinfo_path: config.sinfo_path.clone(),
            scontrol_path: config.scontrol_path.clone(),
        }
    }

    /// Get the underlying command runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Get the compressed node list for a partition (e.g. `gpu-[01-04]`)
    pub fn partition_nodelist(&self, partition: &str) -> ClustermapResult<String> {
        let nodelist = self.runner.run(
            self.sinfo_path.as_os_str(),
            &["-p", partition, "-h", "-o", "%N"],
        )?;
        if nodelist.is_empty() {
            return Err(ClustermapError::NoNodes(partition.to_string()));
        }
        debug!(partition = partition, nodelist = %nodelist, "Resolved partition node list");
        Ok(nodelist)
    }

    /// Expand a compressed node list into hostnames.
    ///
    /// Lines are returned as printed, blank lines and duplicates included.
    pub fn expand_nodelist(&self, nodelist: &str) -> ClustermapResult<Vec<String>> {
        let output = self.runner.run(
            self.scontrol_path.as_os_str(),
            &["show", "hostnames", nodelist],
        )?;
        Ok(output.split('\n').map(str::to_string).collect())
    }

    /// List the hostnames of a partition in scheduler expansion order
    pub fn list_partition_nodes(&self, partition: &str) -> ClustermapResult<Vec<String>> {
        let nodelist = self.partition_nodelist(partition)?;
        let hosts = self.expand_nodelist(&nodelist)?;
        info!(
            partition = partition,
            nodes = hosts.len(),
            runner = self.runner.name(),
            "Listed partition nodes"
        );
        Ok(hosts)
    }

    /// Describe a single node; fields the scheduler omits take defaults
    pub fn describe_node(&self, hostname: &str) -> ClustermapResult<NodeDescriptor> {
        let output = self.runner.run(
            self.scontrol_path.as_os_str(),
            &["show", "node", hostname, "-o"],
        )?;
        Ok(NodeDescriptor::parse(&output))
    }
}
