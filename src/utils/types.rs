use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The .NET CLI executable used when nothing else is configured
pub const DEFAULT_DOTNET_CLI: &str = "dotnet";

/// Output verbosity levels, ordered from least to most detailed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    clap::ValueEnum,
)]
pub enum Verbosity {
    /// Suppress all progress output; the exit code reports the result
    Quiet = 0,
    /// Standard progress updates
    #[default]
    Normal = 1,
    /// Everything, including the output of the external tools
    Verbose = 2,
}

impl Verbosity {
    /// Whether a message tagged with `level` is shown at this verbosity
    pub fn allows(self, level: Verbosity) -> bool {
        self >= level
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Quiet => write!(f, "Quiet"),
            Verbosity::Normal => write!(f, "Normal"),
            Verbosity::Verbose => write!(f, "Verbose"),
        }
    }
}

/// Whether formatters rewrite files or only check them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    Apply,
    Verify,
}

impl RunMode {
    /// Progress line announcing what is about to happen to `target`
    pub fn announcement(self, target: &str) -> String {
        match self {
            RunMode::Apply => format!("Formatting C# files within '{}'", target),
            RunMode::Verify => format!(
                "Verifying that C# files currently comply with defined style standards within '{}'",
                target
            ),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Apply => write!(f, "format"),
            RunMode::Verify => write!(f, "verify"),
        }
    }
}

/// The external formatters, declared in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formatter {
    /// `dotnet format style`
    Style,
    /// `dotnet format analyzers`
    Analyzers,
    /// `dotnet format whitespace`
    Whitespace,
    /// `dotnet csharpier`
    Csharpier,
}

impl Formatter {
    pub const ALL: [Formatter; 4] = [
        Formatter::Style,
        Formatter::Analyzers,
        Formatter::Whitespace,
        Formatter::Csharpier,
    ];

    /// Option name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Formatter::Style => "style",
            Formatter::Analyzers => "analyzers",
            Formatter::Whitespace => "whitespace",
            Formatter::Csharpier => "csharpier",
        }
    }

    /// Arguments passed to the .NET CLI for this formatter
    pub fn arguments(self, mode: RunMode) -> Vec<String> {
        let mut args: Vec<&str> = match self {
            Formatter::Style => vec!["format", "style", "."],
            Formatter::Analyzers => vec!["format", "analyzers", "."],
            Formatter::Whitespace => vec!["format", "whitespace", "."],
            Formatter::Csharpier => vec!["csharpier", "."],
        };

        if mode == RunMode::Verify {
            args.push(match self {
                Formatter::Csharpier => "--check",
                _ => "--verify-no-changes",
            });
        }

        args.into_iter().map(String::from).collect()
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single external command to launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub executable: String,
    pub arguments: Vec<String>,
    pub working_directory: PathBuf,
}

impl CommandInvocation {
    pub fn new(executable: impl Into<String>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            arguments: Vec::new(),
            working_directory: working_directory.into(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments joined with single spaces, as shown to the user
    pub fn arguments_line(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Buffered result of one external command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_allows() {
        let levels = [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose];

        for current in levels {
            for message in levels {
                assert_eq!(current.allows(message), current as u8 >= message as u8);
            }
        }
    }

    #[test]
    fn test_formatter_arguments_apply() {
        let cases = [
            (Formatter::Style, vec!["format", "style", "."]),
            (Formatter::Analyzers, vec!["format", "analyzers", "."]),
            (Formatter::Whitespace, vec!["format", "whitespace", "."]),
            (Formatter::Csharpier, vec!["csharpier", "."]),
        ];

        for (formatter, expected) in cases {
            assert_eq!(formatter.arguments(RunMode::Apply), expected);
        }
    }

    #[test]
    fn test_formatter_arguments_verify() {
        assert_eq!(
            Formatter::Style.arguments(RunMode::Verify),
            vec!["format", "style", ".", "--verify-no-changes"]
        );
        assert_eq!(
            Formatter::Whitespace.arguments(RunMode::Verify),
            vec!["format", "whitespace", ".", "--verify-no-changes"]
        );
        assert_eq!(
            Formatter::Csharpier.arguments(RunMode::Verify),
            vec!["csharpier", ".", "--check"]
        );
    }

    #[test]
    fn test_run_mode_announcement() {
        assert_eq!(
            RunMode::Apply.announcement("/src"),
            "Formatting C# files within '/src'"
        );
        assert!(RunMode::Verify.announcement("/src").starts_with("Verifying that C# files"));
        assert!(RunMode::Verify.announcement("/src").ends_with("within '/src'"));
    }

    #[test]
    fn test_command_invocation_arguments_line() {
        let invocation = CommandInvocation::new("dotnet", "/repo")
            .with_args(Formatter::Csharpier.arguments(RunMode::Verify));

        assert_eq!(invocation.executable, "dotnet");
        assert_eq!(invocation.arguments_line(), "csharpier . --check");
        assert_eq!(invocation.working_directory, PathBuf::from("/repo"));
    }

    #[test]
    fn test_process_outcome_success() {
        assert!(ProcessOutcome::success("ok").is_success());
        assert!(!ProcessOutcome::new(2, "", "boom").is_success());
    }
}
