use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Student name already exists.")]
    DuplicateName(String),

    #[error("Student name not found.")]
    UnknownStudent(String),

    #[error("{0}")]
    MalformedInput(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Rejected requests leave the ledger untouched; storage failures may not.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Storage(_))
    }
}
