//! Command runner trait definitions

use clustermap_core::ClustermapResult;
use std::ffi::OsStr;

/// Runs an external command to completion and returns its output
pub trait CommandRunner {
    /// Run `program` with `args`, returning stdout with surrounding
    /// whitespace trimmed. A spawn failure or non-zero exit is an error.
    fn run(&self, program: &OsStr, args: &[&str]) -> ClustermapResult<String>;

    /// Get the runner name
    fn name(&self) -> &'static str;
}
