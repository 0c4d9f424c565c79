//! Error types for the ThreadReport reformatter

use thiserror::Error;

/// Result type alias for reformatter operations
pub type Result<T> = std::result::Result<T, ReformatError>;

/// Main error type for reading, parsing and emitting comment workbooks
#[derive(Error, Debug)]
pub enum ReformatError {
    /// The upload did not carry a file
    #[error("No file provided")]
    NoFileProvided,

    /// The upload body could not be read to the end
    #[error("Failed to read upload: {0}")]
    UploadFailed(String),

    /// The input bytes could not be decoded as a spreadsheet
    #[error("Failed to read workbook: {0}")]
    UnreadableWorkbook(String),

    /// A sentinel block's number cell is missing or not an integer
    #[error("Malformed comment record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The output workbook could not be produced
    #[error("Failed to write workbook: {0}")]
    SerializationFailure(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for ReformatError {
    fn from(err: calamine::Error) -> Self {
        ReformatError::UnreadableWorkbook(err.to_string())
    }
}

impl From<zip::result::ZipError> for ReformatError {
    fn from(err: zip::result::ZipError) -> Self {
        ReformatError::SerializationFailure(err.to_string())
    }
}

impl ReformatError {
    /// Whether the caller, not the input or the process, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReformatError::NoFileProvided)
    }
}
