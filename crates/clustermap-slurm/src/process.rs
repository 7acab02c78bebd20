//! Process-based command runner
//!
//! Runs scheduler commands as blocking child processes. No timeout is
//! applied; a hung command hangs the caller.

use clustermap_core::{ClustermapError, ClustermapResult};
use std::ffi::OsStr;
use std::process::{Command, Output};
use tracing::{debug, error};

use crate::traits::CommandRunner;

/// Command runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner
    pub fn new() -> Self {
        Self
    }

    /// Build the command line shown in diagnostics
    fn describe(program: &OsStr, args: &[&str]) -> String {
        std::iter::once(program.to_string_lossy().into_owned())
            .chain(args.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn check(command: String, output: Output) -> ClustermapResult<String> {
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => output.status.to_string(),
            detail => format!("{}: {}", output.status, detail),
        };
        error!(command = %command, message = %message, "Command failed");
        Err(ClustermapError::Command { command, message })
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &OsStr, args: &[&str]) -> ClustermapResult<String> {
        let command = Self::describe(program, args);
        debug!(command = %command, "Running command");

        let output = Command::new(program).args(args).output().map_err(|e| {
            error!(command = %command, error = %e, "Failed to spawn command");
            ClustermapError::Command {
                command: command.clone(),
                message: e.to_string(),
            }
        })?;

        Self::check(command, output)
    }

    fn name(&self) -> &'static str {
        "process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_command() {
        let line = ProcessRunner::describe(OsStr::new("sinfo"), &["-p", "gpu", "-h", "-o", "%N"]);
        assert_eq!(line, "sinfo -p gpu -h -o %N");
    }

    #[test]
    fn test_missing_program() {
        let runner = ProcessRunner::new();
        let err = runner
            .run(OsStr::new("clustermap-no-such-binary"), &["--version"])
            .unwrap_err();
        assert!(matches!(err, ClustermapError::Command { .. }));
        assert_eq!(runner.name(), "process");
    }

    #[cfg(unix)]
    #[test]
    fn test_trims_stdout() {
        let out = ProcessRunner::new()
            .run(OsStr::new("sh"), &["-c", "printf '  gpu-[1-2]\\n\\n'"])
            .unwrap();
        assert_eq!(out, "gpu-[1-2]");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let err = ProcessRunner::new()
            .run(OsStr::new("sh"), &["-c", "echo 'invalid partition' >&2; exit 1"])
            .unwrap_err();
        match err {
            ClustermapError::Command { command, message } => {
                assert!(command.starts_with("sh -c"));
                assert!(message.contains("invalid partition"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
