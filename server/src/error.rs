//! Error types for the service layer.
//! Storage and hashing failures propagate unchanged; "not found" is modelled
//! with `Option` at the lookup boundary and never appears here.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
