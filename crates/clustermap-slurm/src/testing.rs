//! Scripted command runner for tests

use clustermap_core::{ClustermapError, ClustermapResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;

use crate::traits::CommandRunner;

/// Replays canned output keyed by the full command line
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Option<String>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `stdout`
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), Some(stdout.to_string()));
        self
    }

    /// Make `command` exit unsuccessfully
    pub fn fail(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), None);
        self
    }

    /// Command lines run so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &OsStr, args: &[&str]) -> ClustermapResult<String> {
        let mut parts = vec![program.to_string_lossy().into_owned()];
        parts.extend(args.iter().map(|a| a.to_string()));
        let command = parts.join(" ");
        self.calls.borrow_mut().push(command.clone());

        match self.responses.get(&command) {
            Some(Some(stdout)) => Ok(stdout.trim().to_string()),
            Some(None) => Err(ClustermapError::Command {
                command,
                message: "exit status: 1".to_string(),
            }),
            None => panic!("unexpected command: {command}"),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
