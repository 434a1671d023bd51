use redis::RedisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid store path: {0:?}")]
    InvalidPath(String),

    #[error("Node at {0} is not an object")]
    NotAnObject(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
