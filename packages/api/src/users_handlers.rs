// ABOUTME: HTTP request handlers for user accounts
// ABOUTME: Registration plus profile read, update, and delete for the calling user

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use tracker_projects::{DbState, UserCreateInput, UserUpdateInput};

use crate::auth::CurrentActor;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;

/// Register a new user; open to anonymous callers
pub async fn register(
    State(db): State<DbState>,
    payload: Result<Json<UserCreateInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    info!("Registering user: {}", input.username);

    match db.manager.register(input).await {
        Ok(profile) => ApiResponse::respond(StatusCode::CREATED, profile),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Get the calling user's profile
pub async fn get_profile(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
) -> Response {
    info!("Getting profile for {:?}", actor);

    match db.manager.profile(actor).await {
        Ok(profile) => ApiResponse::respond(StatusCode::OK, profile),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Update the calling user's profile (PUT and PATCH)
pub async fn update_profile(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiJson(input): ApiJson<UserUpdateInput>,
) -> Response {
    info!("Updating profile for {:?}", actor);

    match db.manager.update_profile(actor, input).await {
        Ok(profile) => ApiResponse::respond(StatusCode::OK, profile),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Delete the calling user's account
pub async fn delete_profile(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
) -> Response {
    info!("Deleting profile for {:?}", actor);

    match db.manager.delete_profile(actor).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Get another user by ID
pub async fn get_user(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(user_id): ApiPath<i64>,
) -> Response {
    info!("Getting user: {}", user_id);

    match db.manager.get_user(actor, user_id).await {
        Ok(profile) => ApiResponse::respond(StatusCode::OK, profile),
        Err(e) => AppError::from(e).into_response(),
    }
}
