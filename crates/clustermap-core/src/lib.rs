//! clustermap-core: Core types for the clustermap tools
//!
//! This crate provides the types shared by the inventory and report tools:
//! - Configuration types
//! - Error handling
//! - Scheduler node descriptors
//! - GPU usage records and occupancy grids
//! - The inventory file format

pub mod config;
pub mod error;
pub mod gpu;
pub mod inventory;
pub mod node;

pub use config::*;
pub use error::*;
pub use gpu::*;
pub use inventory::*;
pub use node::*;
