pub mod chunker;
pub mod faker;
pub mod recognizer;
pub mod registry;
pub mod tagger;
pub mod tags;
pub mod types;

pub use chunker::*;
pub use faker::*;
pub use recognizer::*;
pub use registry::*;
pub use tagger::*;
pub use tags::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("analyzer service is not reachable at {0}")]
    Connection(String),

    #[error("analyzer returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("analyzer request timed out after {0}s")]
    Timeout(u64),

    #[error("analyzer response parsing error: {0}")]
    ResponseParsing(String),
}
