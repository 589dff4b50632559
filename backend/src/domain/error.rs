//! Error taxonomy shared by every domain operation.

use thiserror::Error;

/// Failure of a ledger operation.
///
/// Every variant is terminal for the request that produced it; nothing in the
/// domain layer retries.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No verified caller identity was supplied
    #[error("you need to sign in first")]
    Authentication,

    /// The write collides with an existing row (duplicate lesson slot, taken login id)
    #[error("{0}")]
    Conflict(String),

    /// Malformed input that slipped past the caller's own validation
    #[error("{0}")]
    Validation(String),

    /// The store rejected or failed the operation
    #[error("storage failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn duplicate_lesson_slot() -> Self {
        LedgerError::Conflict(
            "a lesson is already registered for this date and time slot".to_string(),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
