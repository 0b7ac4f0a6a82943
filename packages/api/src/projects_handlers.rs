// ABOUTME: HTTP request handlers for project operations
// ABOUTME: Lists only the caller's projects; update and delete are reserved to the author

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use tracker_projects::{DbState, ProjectCreateInput, ProjectUpdateInput};

use crate::auth::CurrentActor;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;

/// List projects the caller contributes to
pub async fn list_projects(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
) -> Response {
    info!("Listing projects for {:?}", actor);

    match db.manager.list_projects(actor).await {
        Ok(projects) => ApiResponse::respond(StatusCode::OK, projects),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Create a new project
pub async fn create_project(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiJson(input): ApiJson<ProjectCreateInput>,
) -> Response {
    info!("Creating project: {}", input.name);

    match db.manager.create_project(actor, input).await {
        Ok(project) => ApiResponse::respond(StatusCode::CREATED, project),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Get a project with its contributors and issues
pub async fn get_project(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
) -> Response {
    info!("Getting project: {}", project_id);

    match db.manager.get_project(actor, project_id).await {
        Ok(project) => ApiResponse::respond(StatusCode::OK, project),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Update a project (PUT and PATCH)
pub async fn update_project(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<ProjectUpdateInput>,
) -> Response {
    info!("Updating project: {}", project_id);

    match db.manager.update_project(actor, project_id, input).await {
        Ok(project) => ApiResponse::respond(StatusCode::OK, project),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Delete a project and everything beneath it
pub async fn delete_project(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
) -> Response {
    info!("Deleting project: {}", project_id);

    match db.manager.delete_project(actor, project_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
