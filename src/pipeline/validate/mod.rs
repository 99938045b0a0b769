pub mod batch;
pub mod client;
pub mod parser;
pub mod prompt;
pub mod types;

pub use batch::*;
pub use client::*;
pub use parser::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("no API key configured for the remote classifier")]
    MissingApiKey,

    #[error("remote classifier is not reachable at {0}")]
    Connection(String),

    #[error("remote classifier returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("classifier request timed out after {0}s")]
    Timeout(u64),

    #[error("classifier response parsing error: {0}")]
    ResponseParsing(String),
}
