// Validation and formatter sequencing
pub mod validator;
pub mod orchestrator;

pub use validator::*;
pub use orchestrator::*;
