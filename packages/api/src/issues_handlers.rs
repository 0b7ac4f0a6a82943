// ABOUTME: HTTP request handlers for issues within a project
// ABOUTME: PUT and PATCH both apply partial updates

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use tracker_projects::{DbState, IssueCreateInput, IssueUpdateInput};

use crate::auth::CurrentActor;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;

pub async fn list_issues(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
) -> Response {
    info!("Listing issues of project: {}", project_id);

    match db.manager.list_issues(actor, project_id).await {
        Ok(issues) => ApiResponse::respond(StatusCode::OK, issues),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn create_issue(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<IssueCreateInput>,
) -> Response {
    info!("Creating issue '{}' in project: {}", input.title, project_id);

    match db.manager.create_issue(actor, project_id, input).await {
        Ok(issue) => ApiResponse::respond(StatusCode::CREATED, issue),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn get_issue(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id)): ApiPath<(i64, i64)>,
) -> Response {
    info!("Getting issue {} of project: {}", issue_id, project_id);

    match db.manager.get_issue(actor, project_id, issue_id).await {
        Ok(issue) => ApiResponse::respond(StatusCode::OK, issue),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn update_issue(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<IssueUpdateInput>,
) -> Response {
    info!("Updating issue {} of project: {}", issue_id, project_id);

    match db
        .manager
        .update_issue(actor, project_id, issue_id, input)
        .await
    {
        Ok(issue) => ApiResponse::respond(StatusCode::OK, issue),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn delete_issue(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, issue_id)): ApiPath<(i64, i64)>,
) -> Response {
    info!("Deleting issue {} of project: {}", issue_id, project_id);

    match db.manager.delete_issue(actor, project_id, issue_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
