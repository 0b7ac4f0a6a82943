// ABOUTME: Authentication context for API requests
// ABOUTME: Reads the acting user from the X-User-Id header; no header means anonymous

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use tracker_core::Actor;

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller. Whether the user exists is checked by the service layer.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(Self)
    }
}

/// The actor named by the identity header; no header means anonymous
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, AppError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(Actor::Anonymous);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(Actor::User)
        .ok_or(AppError::InvalidIdentity)
}
