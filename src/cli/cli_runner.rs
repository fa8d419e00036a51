use clap::{CommandFactory, Parser};
use std::io::{IsTerminal, Write};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::output_reporter::{format_error, OutputReporter};
use crate::cli::{CliArgs, FormatterArgs};
use crate::engine::Orchestrator;
use crate::process::{ProcessRunner, TokioProcessRunner};
use crate::utils::{
    config::ToolConfig,
    error::{StyleError, StyleResult},
    types::RunMode,
};

/// Runs format and verify commands against an orchestrator
pub struct CliRunner {
    orchestrator: Orchestrator,
}

impl CliRunner {
    /// Create a runner that launches real processes
    pub fn new(tools: ToolConfig) -> Self {
        Self::with_runner(Box::new(TokioProcessRunner::new()), tools)
    }

    /// Create a runner with a custom process runner
    pub fn with_runner(runner: Box<dyn ProcessRunner>, tools: ToolConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(runner).with_tools(tools),
        }
    }

    /// Resolve the command options and run the formatters, writing progress to `out`
    pub async fn execute<W: Write>(
        &self,
        mode: RunMode,
        args: &FormatterArgs,
        out: W,
        color: bool,
        cancel: &CancellationToken,
    ) -> StyleResult<()> {
        let options = args.to_run_options().map_err(|e| {
            StyleError::Unexpected(format!("Could not resolve the target directory: {}", e))
        })?;

        debug!(
            "Resolved {} options: {}",
            mode,
            serde_json::to_string(&options).unwrap_or_default()
        );

        let mut reporter = OutputReporter::new(out, options.verbosity).with_color(color);
        self.orchestrator
            .execute(&options, mode, &mut reporter, cancel)
            .await
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dotnet_style=warn"));

    // Ignore the error if a subscriber was already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Cancel `token` when the user presses Ctrl+C
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received interrupt signal");
                token.cancel();
            }
            Err(err) => {
                warn!("Error setting up signal handler: {err}");
            }
        }
    });
}

fn print_command_help(mode: RunMode) -> std::io::Result<()> {
    let mut command = CliArgs::command();
    if let Some(subcommand) = command.find_subcommand_mut(mode.to_string()) {
        subcommand.print_help()?;
        println!();
    }
    Ok(())
}

/// Main entry point for CLI execution
pub async fn run_cli() -> anyhow::Result<()> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version requests are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            std::process::exit(code);
        }
    };

    init_tracing();

    let Some(command) = args.command else {
        CliArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let runner = CliRunner::new(ToolConfig::new(args.dotnet_cli));
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();

    let result = runner
        .execute(command.mode(), command.args(), stdout.lock(), color, &cancel)
        .await;

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            let error = e.into_user_facing();
            if matches!(error, StyleError::Validation(_) | StyleError::Unexpected(_)) {
                print_command_help(command.mode())?;
            }
            eprintln!("{}", format_error(&error));
            std::process::exit(error.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use crate::process::MockProcessRunner;

    fn format_args(extra: &[&str]) -> FormatterArgs {
        let args = CliArgs::try_parse_from(
            ["dotnet-style", "format"].into_iter().chain(extra.iter().copied()),
        )
        .unwrap();

        match args.command {
            Some(Commands::Format(args)) => args,
            other => panic!("Expected format command, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_writes_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockProcessRunner::new();
        let runner = CliRunner::with_runner(Box::new(mock.clone()), ToolConfig::default());
        let args = format_args(&["--path", dir.path().to_str().unwrap()]);

        let mut out = Vec::new();
        runner
            .execute(RunMode::Apply, &args, &mut out, false, &CancellationToken::new())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Formatting C# files within '"));
        assert!(text.ends_with("Done\n"));
        assert_eq!(mock.invocations().len(), 3);
        assert!(mock
            .invocations()
            .iter()
            .all(|invocation| invocation.working_directory.is_absolute()));
    }

    #[tokio::test]
    async fn test_execute_surfaces_validation_error() {
        let mock = MockProcessRunner::new();
        let runner = CliRunner::with_runner(Box::new(mock.clone()), ToolConfig::default());
        let args = format_args(&["-s", "false", "-a", "false", "-c", "false"]);

        let mut out = Vec::new();
        let error = runner
            .execute(RunMode::Apply, &args, &mut out, false, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(error, StyleError::Validation(_)));
        assert!(out.is_empty());
        assert!(mock.invocations().is_empty());
    }
}
