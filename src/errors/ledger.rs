use thiserror::Error;
use super::store::StoreError;

/// Failures of the ledger operations. The display text is the message
/// handed back to the person using the app.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("User already exists!")]
    AlreadyExists(String),

    // Deliberately identical for unknown users and wrong passwords.
    #[error("Incorrect username or password.")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("User not found.")]
    NotFound(String),

    #[error("Error hashing password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Store(StoreError::Serialization(err))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
