use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::process::runner_trait::ProcessRunner;
use crate::utils::{
    error::{ProcessError, StyleError, StyleResult},
    types::{CommandInvocation, ProcessOutcome},
};

/// What the mock does when a command matches a scripted rule
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Finish with the given outcome
    Outcome(ProcessOutcome),
    /// Fail as if the executable could not be started
    SpawnFailure(String),
    /// Trip the cancellation token while "running"
    Interrupt,
}

#[derive(Debug, Clone)]
struct MockRule {
    arguments_contain: String,
    response: MockResponse,
}

/// Process runner for tests with scripted results.
///
/// Commands that match no rule succeed with empty output. Every launched
/// command is recorded and can be inspected through [`MockProcessRunner::invocations`];
/// clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MockProcessRunner {
    rules: Arc<Mutex<Vec<MockRule>>>,
    invocations: Arc<Mutex<Vec<CommandInvocation>>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` to any command whose arguments contain `pattern`
    pub fn respond_to(self, pattern: &str, response: MockResponse) -> Self {
        self.rules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(MockRule {
                arguments_contain: pattern.to_string(),
                response,
            });
        self
    }

    /// Shorthand for a successful command that prints `stdout`
    pub fn succeed_with(self, pattern: &str, stdout: &str) -> Self {
        self.respond_to(pattern, MockResponse::Outcome(ProcessOutcome::success(stdout)))
    }

    /// Shorthand for a command that exits with `exit_code` and prints `stderr`
    pub fn fail_with(self, pattern: &str, exit_code: i32, stderr: &str) -> Self {
        self.respond_to(
            pattern,
            MockResponse::Outcome(ProcessOutcome::new(exit_code, "", stderr)),
        )
    }

    /// Commands launched so far, in order
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Argument lines of the commands launched so far
    pub fn argument_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(CommandInvocation::arguments_line)
            .collect()
    }

    fn response_for(&self, invocation: &CommandInvocation) -> MockResponse {
        let line = invocation.arguments_line();
        self.rules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|rule| line.contains(&rule.arguments_contain))
            .map(|rule| rule.response.clone())
            .unwrap_or_else(|| MockResponse::Outcome(ProcessOutcome::success("")))
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        cancel: &CancellationToken,
    ) -> StyleResult<ProcessOutcome> {
        if cancel.is_cancelled() {
            return Err(StyleError::Cancelled);
        }

        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation.clone());

        match self.response_for(invocation) {
            MockResponse::Outcome(outcome) => Ok(outcome),
            MockResponse::SpawnFailure(message) => Err(ProcessError::Spawn {
                executable: invocation.executable.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            }
            .into()),
            MockResponse::Interrupt => {
                cancel.cancel();
                Err(StyleError::Cancelled)
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
