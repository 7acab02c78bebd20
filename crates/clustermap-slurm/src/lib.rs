//! clustermap-slurm: Slurm integration for clustermap
//!
//! This crate provides:
//! - A command runner abstraction with a process-based implementation
//! - The Slurm query adapter (partition listing, hostname expansion, node details)
//! - The inventory writer

pub mod client;
pub mod inventory;
pub mod process;
pub mod traits;

#[cfg(test)]
mod testing;

pub use client::SlurmClient;
pub use inventory::{write_inventory, InventoryReport};
pub use process::ProcessRunner;
pub use traits::CommandRunner;
