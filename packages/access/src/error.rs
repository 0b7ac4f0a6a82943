// ABOUTME: Error taxonomy for access checks and consistency enforcement
// ABOUTME: Every variant is terminal for the request that raised it

use thiserror::Error;
use tracker_core::ValidationError;
use tracker_storage::StorageError;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication credentials were not provided")]
    Unauthenticated,

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AccessError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccessError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AccessError {
    fn from(err: ValidationError) -> Self {
        AccessError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;
