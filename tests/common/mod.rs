// ABOUTME: Shared test double recording every command the launcher would run
// Replays queued outputs for captured runs and fails commands matching configured prefixes

#![allow(dead_code)]

use loom::{Executor, ShellCommand, ShellError};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Records invocations instead of spawning processes.
///
/// Captured runs consume `outputs` front to back; the last output is
/// repeated once the queue is down to one entry, and an empty queue yields
/// empty output.
#[derive(Default)]
pub struct RecordingExecutor {
    invocations: RefCell<Vec<ShellCommand>>,
    outputs: RefCell<VecDeque<String>>,
    failures: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outputs(outputs: &[&str]) -> Self {
        Self {
            outputs: RefCell::new(outputs.iter().map(ToString::to_string).collect()),
            ..Self::default()
        }
    }

    /// Fail every command whose rendered line starts with `prefix`.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.failures.push(prefix.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn invocations(&self) -> Vec<ShellCommand> {
        self.invocations.borrow().clone()
    }

    fn record(&self, cmd: &ShellCommand) -> Result<(), ShellError> {
        self.invocations.borrow_mut().push(cmd.clone());
        let line = cmd.to_string();
        if self.failures.iter().any(|prefix| line.starts_with(prefix)) {
            return Err(ShellError::Spawn {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::Other, "simulated failure"),
            });
        }
        Ok(())
    }

    fn next_output(&self) -> String {
        let mut outputs = self.outputs.borrow_mut();
        match outputs.len() {
            0 => String::new(),
            1 => outputs[0].clone(),
            _ => outputs.pop_front().unwrap_or_default(),
        }
    }
}

impl Executor for RecordingExecutor {
    fn execute(&self, cmd: &ShellCommand) -> Result<String, ShellError> {
        self.record(cmd)?;
        Ok(self.next_output())
    }

    fn execute_silently(&self, cmd: &ShellCommand) -> Result<(), ShellError> {
        self.record(cmd)
    }
}

pub fn home() -> String {
    dirs::home_dir()
        .expect("home directory")
        .display()
        .to_string()
}
