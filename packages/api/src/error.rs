// ABOUTME: Application error type and its HTTP mapping
// ABOUTME: Maps access, validation, and storage failures to status codes and machine-readable codes

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use tracker_projects::{AccessError, ManagerError};

/// Main application error type that all handlers return
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error("Invalid user identity header")]
    InvalidIdentity,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Malformed resource identifier: {0}")]
    UnknownPath(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidIdentity => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnknownPath(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Manager(ManagerError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Manager(ManagerError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            AppError::Manager(ManagerError::Access(access_error)) => match access_error {
                AccessError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                AccessError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
                AccessError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
                AccessError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                AccessError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Get user-facing error message; storage details stay in the logs
    fn to_user_message(&self) -> String {
        match self {
            AppError::InvalidIdentity => "The X-User-Id header must be a user id".to_string(),
            AppError::InvalidBody(reason) => reason.clone(),
            AppError::UnknownPath(_) => "Resource not found".to_string(),
            AppError::Manager(ManagerError::Validation(e)) => e.message.clone(),
            AppError::Manager(ManagerError::Storage(_)) => "Data storage error".to_string(),
            AppError::Manager(ManagerError::Access(access_error)) => match access_error {
                AccessError::NotFound(resource) => format!("{} not found", resource),
                AccessError::PermissionDenied(reason) => reason.clone(),
                AccessError::Unauthenticated => {
                    "Authentication credentials were not provided".to_string()
                }
                AccessError::Validation { message, .. } => message.clone(),
                AccessError::Storage(_) => "Data storage error".to_string(),
            },
        }
    }

    /// The offending input field, for validation failures
    fn field(&self) -> Option<String> {
        match self {
            AppError::Manager(ManagerError::Validation(e)) => Some(e.field.clone()),
            AppError::Manager(ManagerError::Access(AccessError::Validation { field, .. })) => {
                Some(field.clone())
            }
            _ => None,
        }
    }

    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Manager(ManagerError::Storage(_))
                | AppError::Manager(ManagerError::Access(AccessError::Storage(_)))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        // Log internal errors with full context but don't expose details
        if self.is_internal() {
            error!(
                request_id = %request_id,
                storage_error = %self,
                "Storage system error"
            );
        } else {
            info!(
                request_id = %request_id,
                error_code = %error_code,
                error = %self,
                "API error response"
            );
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_user_message(),
                field: self.field(),
            },
            request_id,
        };

        let mut response = Json(error_response).into_response();
        *response.status_mut() = status_code;
        response
    }
}
