use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::types::{Formatter, Verbosity, DEFAULT_DOTNET_CLI};

/// Which formatters are enabled for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatterSelection {
    pub style: bool,
    pub analyzers: bool,
    pub whitespace: bool,
    pub csharpier: bool,
}

impl FormatterSelection {
    /// A selection with every formatter disabled
    pub fn none() -> Self {
        Self {
            style: false,
            analyzers: false,
            whitespace: false,
            csharpier: false,
        }
    }

    /// Enable or disable a single formatter
    pub fn with(mut self, formatter: Formatter, enabled: bool) -> Self {
        match formatter {
            Formatter::Style => self.style = enabled,
            Formatter::Analyzers => self.analyzers = enabled,
            Formatter::Whitespace => self.whitespace = enabled,
            Formatter::Csharpier => self.csharpier = enabled,
        }
        self
    }

    pub fn is_enabled(&self, formatter: Formatter) -> bool {
        match formatter {
            Formatter::Style => self.style,
            Formatter::Analyzers => self.analyzers,
            Formatter::Whitespace => self.whitespace,
            Formatter::Csharpier => self.csharpier,
        }
    }

    /// Every formatter paired with its toggle, in execution order
    pub fn steps(&self) -> [(Formatter, bool); 4] {
        Formatter::ALL.map(|formatter| (formatter, self.is_enabled(formatter)))
    }

    /// Enabled formatters in execution order
    pub fn enabled(&self) -> Vec<Formatter> {
        self.steps()
            .into_iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(formatter, _)| formatter)
            .collect()
    }
}

impl Default for FormatterSelection {
    fn default() -> Self {
        Self {
            style: true,
            analyzers: true,
            whitespace: false,
            csharpier: true,
        }
    }
}

/// Options for a single format or verify run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunOptions {
    pub target_directory: PathBuf,
    pub selection: FormatterSelection,
    pub verbosity: Verbosity,
}

impl RunOptions {
    pub fn new(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
            selection: FormatterSelection::default(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_selection(mut self, selection: FormatterSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Location of the external tools
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolConfig {
    /// The .NET CLI; CSharpier is run through it as a local tool
    pub dotnet_cli: String,
}

impl ToolConfig {
    pub fn new(dotnet_cli: impl Into<String>) -> Self {
        Self {
            dotnet_cli: dotnet_cli.into(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DOTNET_CLI)
    }
}
