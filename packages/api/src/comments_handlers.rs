// ABOUTME: HTTP request handlers for issue comments
// ABOUTME: Comments are addressed by UUID under their project and issue

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use tracker_projects::{CommentInput, DbState};

use crate::auth::CurrentActor;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;

pub async fn list_comments(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id)): ApiPath<(i64, i64)>,
) -> Response {
    info!("Listing comments of issue: {}", issue_id);

    match db.manager.list_comments(actor, project_id, issue_id).await {
        Ok(comments) => ApiResponse::respond(StatusCode::OK, comments),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn create_comment(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<CommentInput>,
) -> Response {
    info!("Commenting on issue: {}", issue_id);

    match db
        .manager
        .create_comment(actor, project_id, issue_id, input)
        .await
    {
        Ok(comment) => ApiResponse::respond(StatusCode::CREATED, comment),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn get_comment(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id, comment_uuid)): ApiPath<(i64, i64, String)>,
) -> Response {
    info!("Getting comment: {}", comment_uuid);

    match db
        .manager
        .get_comment(actor, project_id, issue_id, &comment_uuid)
        .await
    {
        Ok(comment) => ApiResponse::respond(StatusCode::OK, comment),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn update_comment(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id, comment_uuid)): ApiPath<(i64, i64, String)>,
    ApiJson(input): ApiJson<CommentInput>,
) -> Response {
    info!("Updating comment: {}", comment_uuid);

    match db
        .manager
        .update_comment(actor, project_id, issue_id, &comment_uuid, input)
        .await
    {
        Ok(comment) => ApiResponse::respond(StatusCode::OK, comment),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn delete_comment(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id, comment_uuid)): ApiPath<(i64, i64, String)>,
) -> Response {
    info!("Deleting comment: {}", comment_uuid);

    match db
        .manager
        .delete_comment(actor, project_id, issue_id, &comment_uuid)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
