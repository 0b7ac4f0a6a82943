use axum::{http::StatusCode, response::Response};
use serde_json::json;

use crate::response::ApiResponse;

pub async fn health_check() -> Response {
    ApiResponse::respond(
        StatusCode::OK,
        json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "service": "tracker-api"
        }),
    )
}
