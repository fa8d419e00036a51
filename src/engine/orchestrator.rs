use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::output_reporter::OutputReporter;
use crate::engine::validator::validate;
use crate::process::ProcessRunner;
use crate::utils::{
    config::{RunOptions, ToolConfig},
    error::{StyleError, StyleResult, ToolFailure},
    types::{CommandInvocation, Formatter, RunMode},
};

/// Runs the enabled formatters one after another and stops at the first failure
pub struct Orchestrator {
    runner: Box<dyn ProcessRunner>,
    tools: ToolConfig,
}

impl Orchestrator {
    pub fn new(runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            tools: ToolConfig::default(),
        }
    }

    pub fn with_tools(mut self, tools: ToolConfig) -> Self {
        self.tools = tools;
        self
    }

    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    /// Commands for every enabled formatter, in execution order
    pub fn plan(&self, options: &RunOptions, mode: RunMode) -> Vec<(Formatter, CommandInvocation)> {
        options
            .selection
            .enabled()
            .into_iter()
            .map(|formatter| {
                let invocation =
                    CommandInvocation::new(&self.tools.dotnet_cli, &options.target_directory)
                        .with_args(formatter.arguments(mode));
                (formatter, invocation)
            })
            .collect()
    }

    /// Validate the options, then format or verify the target directory
    pub async fn execute<W: Write>(
        &self,
        options: &RunOptions,
        mode: RunMode,
        reporter: &mut OutputReporter<W>,
        cancel: &CancellationToken,
    ) -> StyleResult<()> {
        validate(&options.selection, mode)?;

        let target = options.target_directory.display().to_string();
        reporter.write_normal_line(&mode.announcement(&target))?;

        let plan = self.plan(options, mode);
        info!(
            "Running {} formatter(s) in {} mode with the {} runner",
            plan.len(),
            mode,
            self.runner.name()
        );

        for (formatter, invocation) in &plan {
            self.run_formatter(*formatter, invocation, options, mode, reporter, cancel)
                .await?;
        }

        reporter.write_normal_line("Done")?;
        Ok(())
    }

    async fn run_formatter<W: Write>(
        &self,
        formatter: Formatter,
        invocation: &CommandInvocation,
        options: &RunOptions,
        mode: RunMode,
        reporter: &mut OutputReporter<W>,
        cancel: &CancellationToken,
    ) -> StyleResult<()> {
        if cancel.is_cancelled() {
            debug!("Skipping '{}': cancelled", formatter);
            return Err(StyleError::Cancelled);
        }

        reporter.report_command_start(&invocation.executable, &invocation.arguments_line())?;

        let outcome = self.runner.run(invocation, cancel).await?;

        // An interrupt also reaches the child, which may exit before the token trips.
        if cancel.is_cancelled() {
            debug!("'{}' exited with code {} after cancellation", formatter, outcome.exit_code);
            return Err(StyleError::Cancelled);
        }

        reporter.report_command_output(&outcome)?;

        if !outcome.is_success() {
            debug!("'{}' failed with exit code {}", formatter, outcome.exit_code);
            return Err(ToolFailure {
                formatter,
                mode,
                exit_code: outcome.exit_code,
                stderr: outcome.stderr,
                verbosity: options.verbosity,
            }
            .into());
        }

        reporter.write_normal_line("Success")?;
        Ok(())
    }
}
