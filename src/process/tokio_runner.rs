use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::process::runner_trait::ProcessRunner;
use crate::utils::{
    error::{ProcessError, StyleError, StyleResult},
    types::{CommandInvocation, ProcessOutcome},
};

/// Runs commands as child processes on the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        cancel: &CancellationToken,
    ) -> StyleResult<ProcessOutcome> {
        if cancel.is_cancelled() {
            debug!("Not starting '{}': already cancelled", invocation.executable);
            return Err(StyleError::Cancelled);
        }

        debug!(
            "Spawning '{}' with {:?} in {}",
            invocation.executable,
            invocation.arguments,
            invocation.working_directory.display()
        );

        let start = Instant::now();
        // The child is killed if the wait future below is dropped on cancellation.
        let child = Command::new(&invocation.executable)
            .args(&invocation.arguments)
            .current_dir(&invocation.working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                executable: invocation.executable.clone(),
                source,
            })?;

        let output = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!("Cancellation requested, terminating '{}'", invocation.executable);
                return Err(StyleError::Cancelled);
            }
            output = child.wait_with_output() => output.map_err(|source| ProcessError::Wait {
                executable: invocation.executable.clone(),
                source,
            })?,
        };

        let exit_code = match output.status.code() {
            Some(code) => code,
            // Killed by the same interrupt that tripped the token.
            None if cancel.is_cancelled() => return Err(StyleError::Cancelled),
            None => return Err(ProcessError::Terminated(invocation.executable.clone()).into()),
        };

        debug!(
            "'{}' exited with code {} after {:.2?}",
            invocation.executable,
            exit_code,
            start.elapsed()
        );

        Ok(ProcessOutcome::new(
            exit_code,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }

    fn name(&self) -> &str {
        "tokio"
    }
}
