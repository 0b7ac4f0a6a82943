// ABOUTME: HTTP API layer for Tracker providing REST endpoints and routing
// ABOUTME: Nested routes mirror the resource hierarchy project -> issue -> comment

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use tracker_projects::DbState;

pub mod auth;
pub mod comments_handlers;
pub mod contributors_handlers;
pub mod error;
pub mod extract;
pub mod health;
pub mod issues_handlers;
pub mod projects_handlers;
pub mod response;
pub mod users_handlers;

/// Creates the users API router (nested under /api/users)
pub fn create_users_router() -> Router<DbState> {
    Router::new()
        .route("/register", post(users_handlers::register))
        .route("/profile", get(users_handlers::get_profile))
        .route("/profile", put(users_handlers::update_profile))
        .route("/profile", patch(users_handlers::update_profile))
        .route("/profile", delete(users_handlers::delete_profile))
        .route("/{user_id}", get(users_handlers::get_user))
}

/// Creates the projects API router (nested under /api/projects)
pub fn create_projects_router() -> Router<DbState> {
    Router::new()
        .route("/", get(projects_handlers::list_projects))
        .route("/", post(projects_handlers::create_project))
        .route("/{project_id}", get(projects_handlers::get_project))
        .route("/{project_id}", put(projects_handlers::update_project))
        .route("/{project_id}", patch(projects_handlers::update_project))
        .route("/{project_id}", delete(projects_handlers::delete_project))
}

/// Creates the contributors API router (nested under /api/projects/{project_id}/contributors)
pub fn create_contributors_router() -> Router<DbState> {
    Router::new()
        .route("/", get(contributors_handlers::list_contributors))
        .route("/", post(contributors_handlers::add_contributor))
        .route(
            "/{contributor_id}",
            get(contributors_handlers::get_contributor),
        )
        .route(
            "/{contributor_id}",
            put(contributors_handlers::reassign_contributor),
        )
        .route(
            "/{contributor_id}",
            delete(contributors_handlers::remove_contributor),
        )
}

/// Creates the issues API router (nested under /api/projects/{project_id}/issues)
pub fn create_issues_router() -> Router<DbState> {
    Router::new()
        .route("/", get(issues_handlers::list_issues))
        .route("/", post(issues_handlers::create_issue))
        .route("/{issue_id}", get(issues_handlers::get_issue))
        .route("/{issue_id}", put(issues_handlers::update_issue))
        .route("/{issue_id}", patch(issues_handlers::update_issue))
        .route("/{issue_id}", delete(issues_handlers::delete_issue))
}

/// Creates the comments API router (nested under .../issues/{issue_id}/comments)
pub fn create_comments_router() -> Router<DbState> {
    Router::new()
        .route("/", get(comments_handlers::list_comments))
        .route("/", post(comments_handlers::create_comment))
        .route("/{comment_uuid}", get(comments_handlers::get_comment))
        .route("/{comment_uuid}", put(comments_handlers::update_comment))
        .route("/{comment_uuid}", patch(comments_handlers::update_comment))
        .route("/{comment_uuid}", delete(comments_handlers::delete_comment))
}

/// Assembles every API router under /api and binds the database state
pub fn create_api_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/api/users", create_users_router())
        .nest("/api/projects", create_projects_router())
        .nest(
            "/api/projects/{project_id}/contributors",
            create_contributors_router(),
        )
        .nest("/api/projects/{project_id}/issues", create_issues_router())
        .nest(
            "/api/projects/{project_id}/issues/{issue_id}/comments",
            create_comments_router(),
        )
        .with_state(db)
}
