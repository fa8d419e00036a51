// Argument parsing, progress output and the top-level command handler
pub mod cli_args;
pub mod cli_runner;
pub mod output_reporter;

pub use cli_args::*;
pub use cli_runner::*;
pub use output_reporter::*;
