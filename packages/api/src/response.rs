// ABOUTME: Shared API response envelope
// ABOUTME: Provides consistent success responses across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` and send it with `status`
    pub fn respond(status: StatusCode, data: T) -> Response {
        (status, ResponseJson(Self::success(data))).into_response()
    }
}
