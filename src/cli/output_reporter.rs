use colored::*;
use std::io::{self, Write};

use crate::utils::error::{ReportError, StyleError};
use crate::utils::types::{ProcessOutcome, Verbosity};

/// Writes progress lines, dropping any above the configured verbosity
#[derive(Debug)]
pub struct OutputReporter<W: Write> {
    out: W,
    verbosity: Verbosity,
    color: bool,
}

impl<W: Write> OutputReporter<W> {
    /// Create a reporter without colored output
    pub fn new(out: W, verbosity: Verbosity) -> Self {
        Self {
            out,
            verbosity,
            color: false,
        }
    }

    /// Color the output of external commands
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write `message` followed by a newline if `level` is shown
    pub fn write_line(&mut self, level: Verbosity, message: &str) -> io::Result<()> {
        if self.verbosity.allows(level) {
            writeln!(self.out, "{}", message)?;
        }
        Ok(())
    }

    pub fn write_quiet_line(&mut self, message: &str) -> io::Result<()> {
        self.write_line(Verbosity::Quiet, message)
    }

    pub fn write_normal_line(&mut self, message: &str) -> io::Result<()> {
        self.write_line(Verbosity::Normal, message)
    }

    pub fn write_verbose_line(&mut self, message: &str) -> io::Result<()> {
        self.write_line(Verbosity::Verbose, message)
    }

    /// Announce the command about to run.
    ///
    /// Both parts are trimmed and blank arguments are left out. Fails if the
    /// executable is blank.
    pub fn report_command_start(
        &mut self,
        executable: &str,
        arguments: &str,
    ) -> Result<(), ReportError> {
        let executable = executable.trim();
        if executable.is_empty() {
            return Err(ReportError::EmptyValue("command"));
        }

        let arguments = arguments.trim();
        let line = if arguments.is_empty() {
            format!("Running the command '{}'", executable)
        } else {
            format!("Running the command '{} {}'", executable, arguments)
        };

        self.write_normal_line(&line)?;
        Ok(())
    }

    /// Show what an external command printed, set apart from our own output
    pub fn report_command_output(&mut self, outcome: &ProcessOutcome) -> io::Result<()> {
        let stdout = outcome.stdout.trim();
        if stdout.is_empty() {
            return Ok(());
        }

        self.write_verbose_line("Command Output:")?;
        self.write_verbose_line("")?;

        if self.color {
            self.write_verbose_line(&stdout.blue().to_string())?;
        } else {
            self.write_verbose_line(stdout)?;
        }

        self.write_verbose_line("")
    }
}

/// Format an error message for CLI display
pub fn format_error(error: &StyleError) -> String {
    format!("{} {}", "Error:".red().bold(), error.to_string().red())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Verbosity; 3] = [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose];

    fn output(reporter: OutputReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_lines_are_gated_by_verbosity() {
        for current in LEVELS {
            for level in LEVELS {
                let mut reporter = OutputReporter::new(Vec::new(), current);
                reporter.write_line(level, "message").unwrap();

                let expected = if current >= level { "message\n" } else { "" };
                assert_eq!(output(reporter), expected, "current {current:?}, level {level:?}");
            }
        }
    }

    #[test]
    fn test_quiet_line_keeps_message_as_is() {
        let messages = ["", "    ", "\t", "multi\nline message"];

        for message in messages {
            let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Quiet);
            reporter.write_quiet_line(message).unwrap();
            assert_eq!(output(reporter), format!("{}\n", message));
        }
    }

    #[test]
    fn test_normal_line_hidden_when_quiet() {
        let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Quiet);
        reporter.write_normal_line("hidden").unwrap();
        reporter.write_verbose_line("hidden").unwrap();
        assert!(output(reporter).is_empty());
    }

    #[test]
    fn test_report_command_start() {
        let cases = [
            ("dotnet", "csharpier", "Running the command 'dotnet csharpier'"),
            ("command", "", "Running the command 'command'"),
            (" command ", " arguments ", "Running the command 'command arguments'"),
            ("command", "    ", "Running the command 'command'"),
            ("command", "\t", "Running the command 'command'"),
            ("command", "\n", "Running the command 'command'"),
            (
                "command",
                "arguments --path-option \"/etc/example\"",
                "Running the command 'command arguments --path-option \"/etc/example\"'",
            ),
            (
                "command",
                "--multiline\narguments",
                "Running the command 'command --multiline\narguments'",
            ),
        ];

        for (command, arguments, expected) in cases {
            for verbosity in [Verbosity::Normal, Verbosity::Verbose] {
                let mut reporter = OutputReporter::new(Vec::new(), verbosity);
                reporter.report_command_start(command, arguments).unwrap();
                assert_eq!(output(reporter), format!("{}\n", expected));
            }
        }
    }

    #[test]
    fn test_report_command_start_hidden_when_quiet() {
        let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Quiet);
        reporter.report_command_start("command", "arguments").unwrap();
        assert!(output(reporter).is_empty());
    }

    #[test]
    fn test_report_command_start_rejects_blank_command() {
        for command in ["", "    ", "\t", "\n"] {
            let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Normal);
            let error = reporter.report_command_start(command, "arguments").unwrap_err();

            assert!(matches!(error, ReportError::EmptyValue("command")));
            assert_eq!(
                error.to_string(),
                "The parameter must be a non-empty value (parameter 'command')"
            );
            assert!(output(reporter).is_empty());
        }
    }

    #[test]
    fn test_report_command_output_verbose() {
        let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Verbose);
        reporter
            .report_command_output(&ProcessOutcome::success("\n  Formatted 3 files.  \n"))
            .unwrap();

        assert_eq!(output(reporter), "Command Output:\n\nFormatted 3 files.\n\n");
    }

    #[test]
    fn test_report_command_output_blank_stdout() {
        for stdout in ["", "   ", "\n\t"] {
            let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Verbose);
            reporter
                .report_command_output(&ProcessOutcome::new(1, stdout, "stderr is ignored"))
                .unwrap();
            assert!(output(reporter).is_empty());
        }
    }

    #[test]
    fn test_report_command_output_below_verbose() {
        for verbosity in [Verbosity::Quiet, Verbosity::Normal] {
            let mut reporter = OutputReporter::new(Vec::new(), verbosity);
            reporter
                .report_command_output(&ProcessOutcome::success("Should not show up"))
                .unwrap();
            assert!(output(reporter).is_empty());
        }
    }

    #[test]
    fn test_report_command_output_colored_keeps_content() {
        let mut reporter = OutputReporter::new(Vec::new(), Verbosity::Verbose).with_color(true);
        reporter
            .report_command_output(&ProcessOutcome::success("Should show up"))
            .unwrap();

        let text = output(reporter);
        assert!(text.starts_with("Command Output:\n\n"));
        assert!(text.contains("Should show up"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_format_error_contains_message() {
        let formatted = format_error(&StyleError::Cancelled);
        assert!(formatted.contains("Error:"));
        assert!(formatted.contains("The operation was cancelled."));
    }
}
