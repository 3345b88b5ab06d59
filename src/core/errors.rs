use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoundaryError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        BoundaryError::Internal(err.to_string())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BoundaryError::InvalidArgument(message.into())
    }
}

pub type BoundaryResult<T> = Result<T, BoundaryError>;
