// External process execution
pub mod runner_trait;
pub mod tokio_runner;
pub mod mock_runner;

pub use runner_trait::*;
pub use tokio_runner::*;
pub use mock_runner::*;
