pub mod csv_io;
pub mod paragraphs;
pub mod record;

pub use csv_io::*;
pub use paragraphs::*;
pub use record::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input header is missing expected column '{0}'")]
    MissingColumn(String),
}
