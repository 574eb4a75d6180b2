// Error type shared by the storage layer and the directory operations.

use crate::fields::Field;
use thiserror::Error;

/// Everything that can abort a directory operation.
///
/// Field validation failures are not listed here: they are handled by
/// re-prompting and never leave the operation.
#[derive(Debug, Error)]
pub enum DirectoryError {
    // === Lookup failures ===
    /// No record has the requested surname.
    #[error("record not found: no contact with surname {surname:?}")]
    NotFound { surname: String },

    /// The chosen entry of a multiple-match list does not exist.
    #[error("invalid record number: {0:?}")]
    InvalidSelection(String),

    /// A search label does not name any header column.
    #[error("unknown field {0:?}")]
    UnknownColumn(String),

    // === Input failures ===
    /// The console reached end of input in the middle of an operation.
    #[error("input closed before the operation finished")]
    InputClosed,

    /// The bounded re-prompt loop for a field ran out of attempts.
    #[error("no valid value for {field} after {attempts} attempts")]
    TooManyAttempts { field: Field, attempts: u32 },

    // === Unexpected failures ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The storage file does not have the expected shape.
    #[error("malformed storage file: {0}")]
    Malformed(String),
}

impl DirectoryError {
    /// Lookup failures are ordinary outcomes reported as plain messages;
    /// everything else is an unexpected failure.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            DirectoryError::NotFound { .. }
                | DirectoryError::InvalidSelection(_)
                | DirectoryError::UnknownColumn(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
