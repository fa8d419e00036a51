use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::utils::config::{FormatterSelection, RunOptions};
use crate::utils::types::{RunMode, Verbosity, DEFAULT_DOTNET_CLI};

/// A customizable dotnet tool that helps maintain a consistent C# coding style.
#[derive(Parser, Debug)]
#[command(name = "dotnet-style")]
#[command(version)]
pub struct CliArgs {
    /// The .NET CLI used to run the formatters
    #[arg(
        long,
        global = true,
        env = "DOTNET_STYLE_CLI",
        default_value = DEFAULT_DOTNET_CLI,
        value_name = "PATH",
        value_hint = ValueHint::CommandName
    )]
    pub dotnet_cli: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Formats C# files according to a defined coding style.
    Format(FormatterArgs),

    /// Verifies that C# files comply with a defined coding style without changing them.
    Verify(FormatterArgs),
}

impl Commands {
    pub fn mode(&self) -> RunMode {
        match self {
            Commands::Format(_) => RunMode::Apply,
            Commands::Verify(_) => RunMode::Verify,
        }
    }

    pub fn args(&self) -> &FormatterArgs {
        match self {
            Commands::Format(args) | Commands::Verify(args) => args,
        }
    }
}

/// Options shared by the format and verify commands
#[derive(Args, Debug, Clone)]
pub struct FormatterArgs {
    /// The directory containing files to recursively process [default: current directory]
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Whether to use the 'dotnet format' formatter to run code style analyzers.
    #[arg(short, long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub style: bool,

    /// Whether to use the 'dotnet format' formatter to run third party code style analyzers.
    #[arg(short, long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub analyzers: bool,

    /// Whether to use the 'dotnet format' formatter to run whitespace formatting.
    #[arg(short, long, action = ArgAction::Set, default_value_t = false, value_name = "BOOL")]
    pub whitespace: bool,

    /// Whether to use the 'CSharpier' opinionated formatter. Must be disabled when using
    /// --whitespace, as both handle whitespace formatting.
    #[arg(short, long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub csharpier: bool,

    /// The output verbosity level.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Verbosity::Normal)]
    pub verbosity: Verbosity,
}

impl FormatterArgs {
    pub fn selection(&self) -> FormatterSelection {
        FormatterSelection {
            style: self.style,
            analyzers: self.analyzers,
            whitespace: self.whitespace,
            csharpier: self.csharpier,
        }
    }

    /// Resolve the options for a run, making the target directory absolute
    pub fn to_run_options(&self) -> std::io::Result<RunOptions> {
        let target_directory = match &self.path {
            Some(path) => std::path::absolute(path)?,
            None => std::env::current_dir()?,
        };

        Ok(RunOptions::new(target_directory)
            .with_selection(self.selection())
            .with_verbosity(self.verbosity))
    }
}
