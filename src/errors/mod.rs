// Error types for every layer of the service, built on thiserror.
use thiserror::Error;

pub mod ledger;
pub mod response;
pub mod store;

pub use ledger::{LedgerError, LedgerResult};
pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    // Ledger failures already carry the message shown to the user.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Chart error: {0}")]
    Chart(String),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
