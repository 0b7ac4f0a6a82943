// ABOUTME: Path and JSON body extractors that report failures in the API error envelope
// ABOUTME: A malformed request from a caller who is not signed in is rejected as unauthenticated

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use tracker_projects::DbState;

use crate::auth::actor_from_headers;
use crate::error::AppError;

/// Typed path parameters; unparsable ids are reported as missing resources
pub struct ApiPath<T>(pub T);

impl<T> FromRequestParts<DbState> for ApiPath<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &DbState,
    ) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                let actor = actor_from_headers(&parts.headers)?;
                state.manager.verify_actor(actor).await?;
                Err(AppError::UnknownPath(rejection.body_text()))
            }
        }
    }
}

/// JSON request body
pub struct ApiJson<T>(pub T);

impl<T> FromRequest<DbState> for ApiJson<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &DbState) -> Result<Self, Self::Rejection> {
        let actor = actor_from_headers(req.headers())?;

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                state.manager.verify_actor(actor).await?;
                Err(rejection.into())
            }
        }
    }
}
