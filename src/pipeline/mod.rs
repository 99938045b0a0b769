pub mod anonymize;
pub mod filter;
pub mod validate;
pub mod stats;
pub mod orchestrator;

pub use orchestrator::*;
pub use stats::*;
