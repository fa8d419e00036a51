use std::fmt;
use thiserror::Error;

use crate::utils::types::{Formatter, RunMode, Verbosity};

/// Appended to failure messages when the user could learn more from verbose output.
///
/// The leading space is intentional: the hint is appended to a sentence.
pub const USE_HIGHER_VERBOSITY_MESSAGE: &str =
    " For more information, try running the command again and specify a higher verbosity option.";

/// The hint to raise verbosity, or nothing if output is already verbose
pub fn higher_verbosity_hint(current: Verbosity) -> &'static str {
    if current < Verbosity::Verbose {
        USE_HIGHER_VERBOSITY_MESSAGE
    } else {
        ""
    }
}

/// Main error type for dotnet-style
#[derive(Debug, Error)]
pub enum StyleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ToolFailed(#[from] ToolFailure),

    #[error("The operation was cancelled.")]
    Cancelled,

    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    #[error("Output error: {0}")]
    Report(#[from] ReportError),

    #[error(
        "The following error has occurred:\n  {0}\nDouble-check the command options and try again."
    )]
    Unexpected(String),
}

impl StyleError {
    /// Normalizes an error for display to the user.
    ///
    /// Domain failures are kept as they are; anything else is wrapped once in
    /// [`StyleError::Unexpected`].
    pub fn into_user_facing(self) -> Self {
        match self {
            StyleError::Validation(_)
            | StyleError::ToolFailed(_)
            | StyleError::Cancelled
            | StyleError::Unexpected(_) => self,
            other => StyleError::Unexpected(other.to_string()),
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Invalid combinations of command options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", no_formatter_message(.mode))]
    NoFormatterSelected { mode: RunMode },

    #[error("{}", conflicting_whitespace_message(.mode))]
    ConflictingWhitespaceFormatters { mode: RunMode },
}

fn no_formatter_message(mode: &RunMode) -> String {
    match mode {
        RunMode::Apply => "You must enable at least one formatter to format code with.".to_string(),
        RunMode::Verify => {
            "You must enable at least one formatter to verify the code style with.".to_string()
        }
    }
}

fn conflicting_whitespace_message(mode: &RunMode) -> String {
    let purpose = match mode {
        RunMode::Apply => "format code with",
        RunMode::Verify => "verify code style compliance with",
    };

    format!(
        "You may only enable one whitespace formatter to {} by specifying either the '--{}' \
         option or the '--{}' option to avoid potential conflicts.",
        purpose,
        Formatter::Csharpier.name(),
        Formatter::Whitespace.name()
    )
}

/// An external formatter finished with a non-zero exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    pub formatter: Formatter,
    pub mode: RunMode,
    pub exit_code: i32,
    pub stderr: String,
    pub verbosity: Verbosity,
}

impl ToolFailure {
    fn message(&self) -> String {
        let hint = higher_verbosity_hint(self.verbosity);
        let stderr = self.stderr.trim();

        let headline = match (self.mode, stderr.is_empty()) {
            (RunMode::Apply, _) => "The command returned a non-zero exit code.",
            (RunMode::Verify, true) => "Code does not comply with the defined style standards.",
            (RunMode::Verify, false) => {
                "Code does not comply with the defined style standards or an error occurred."
            }
        };
        let headline = format!(
            "The '{}' formatter failed with exit code {}. {}",
            self.formatter, self.exit_code, headline
        );

        if stderr.is_empty() {
            format!("{}{}", headline, hint)
        } else {
            format!(
                "{}\n\nStandard Error:\n\n {}\n\n{}",
                headline,
                stderr,
                hint.trim_start()
            )
        }
    }
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ToolFailure {}

/// Failures launching or waiting on an external process
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to start '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed while waiting on '{executable}': {source}")]
    Wait {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' was terminated by a signal")]
    Terminated(String),
}

/// Failures writing progress output
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("The parameter must be a non-empty value (parameter '{0}')")]
    EmptyValue(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<std::io::Error> for StyleError {
    fn from(error: std::io::Error) -> Self {
        StyleError::Report(ReportError::Io(error))
    }
}

/// Result type alias for dotnet-style operations
pub type StyleResult<T> = Result<T, StyleError>;
