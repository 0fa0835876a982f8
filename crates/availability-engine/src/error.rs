//! Error types for availability-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No calendar day stored for {0}")]
    NotFound(NaiveDate),

    #[error("Storage failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("Invariant violated: {0}")]
    Logic(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
