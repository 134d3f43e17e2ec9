use airdrop_protocol::{ErrorCode, StoreError};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur while serving a round
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Protocol(#[from] ErrorCode),

    #[error("Round store error: {0}")]
    Store(#[from] StoreError),

    #[error("Round '{0}' is not registered")]
    RoundNotFound(String),

    #[error("Round '{0}' is already registered")]
    RoundAlreadyExists(String),
}

impl ServiceError {
    /// The protocol error behind this failure, if any.
    pub fn protocol(&self) -> Option<&ErrorCode> {
        match self {
            ServiceError::Protocol(code) => Some(code),
            _ => None,
        }
    }
}
