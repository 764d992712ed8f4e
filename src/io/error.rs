use std::io;

use thiserror::Error;

use crate::domain::ValidationError;

/// IO-level errors for CSV parsing and stream reading
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid reading: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
