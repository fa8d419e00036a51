use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::utils::{
    error::StyleResult,
    types::{CommandInvocation, ProcessOutcome},
};

/// Launches external commands and buffers their output.
///
/// A non-zero exit code is not an error: it is returned in the
/// [`ProcessOutcome`] and interpreting it is left to the caller. Errors are
/// reserved for commands that could not be run at all, and for
/// cancellation, which must terminate the running process and return
/// [`crate::utils::error::StyleError::Cancelled`].
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion
    async fn run(
        &self,
        invocation: &CommandInvocation,
        cancel: &CancellationToken,
    ) -> StyleResult<ProcessOutcome>;

    /// Short name used in diagnostics
    fn name(&self) -> &str;
}
