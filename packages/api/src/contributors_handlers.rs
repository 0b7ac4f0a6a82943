// ABOUTME: HTTP request handlers for project contributors
// ABOUTME: PUT rebinds a membership row to another user; there is no partial update

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use tracker_projects::{ContributorInput, DbState};

use crate::auth::CurrentActor;
use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;

pub async fn list_contributors(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
) -> Response {
    info!("Listing contributors of project: {}", project_id);

    match db.manager.list_contributors(actor, project_id).await {
        Ok(contributors) => ApiResponse::respond(StatusCode::OK, contributors),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn add_contributor(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<ContributorInput>,
) -> Response {
    info!(
        "Adding user {} to project: {}",
        input.user_id, project_id
    );

    match db.manager.add_contributor(actor, project_id, input).await {
        Ok(contributor) => ApiResponse::respond(StatusCode::CREATED, contributor),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn get_contributor(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, contributor_id)): ApiPath<(i64, i64)>,
) -> Response {
    info!(
        "Getting contributor {} of project: {}",
        contributor_id, project_id
    );

    match db
        .manager
        .get_contributor(actor, project_id, contributor_id)
        .await
    {
        Ok(contributor) => ApiResponse::respond(StatusCode::OK, contributor),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn reassign_contributor(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, contributor_id)): ApiPath<(i64, i64)>,
    ApiJson(input): ApiJson<ContributorInput>,
) -> Response {
    info!(
        "Reassigning contributor {} of project {} to user {}",
        contributor_id, project_id, input.user_id
    );

    match db
        .manager
        .reassign_contributor(actor, project_id, contributor_id, input)
        .await
    {
        Ok(contributor) => ApiResponse::respond(StatusCode::OK, contributor),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn remove_contributor(
    State(db): State<DbState>,
    CurrentActor(actor): CurrentActor,
    ApiPath((project_id, contributor_id)): ApiPath<(i64, i64)>,
) -> Response {
    info!(
        "Removing contributor {} from project: {}",
        contributor_id, project_id
    );

    match db
        .manager
        .remove_contributor(actor, project_id, contributor_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
