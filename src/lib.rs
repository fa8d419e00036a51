pub mod engine;
pub mod process;
pub mod cli;
pub mod utils;

pub use engine::*;
pub use process::*;
pub use cli::*;
pub use utils::*;
