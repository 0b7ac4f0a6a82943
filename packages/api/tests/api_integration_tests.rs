// ABOUTME: HTTP-level tests of the assembled API router
// ABOUTME: Checks status codes, error codes, and envelopes for the main authorization paths

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use tracker_api::{auth::USER_ID_HEADER, create_api_router};
use tracker_projects::DbState;

async fn app() -> Router {
    let db = DbState::in_memory().await.unwrap();
    create_api_router(db)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, username: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "username": username, "email": format!("{}@example.com", username) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

async fn create_project(app: &Router, author: i64, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/projects",
        Some(author),
        Some(json!({ "name": name, "description": "d", "type": "back-end" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
}

#[tokio::test]
async fn test_register_then_read_profile() {
    let app = app().await;
    let id = register(&app, "ursula").await;

    let (status, body) = send(&app, "GET", "/api/users/profile", Some(id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!("ursula"));
}

#[tokio::test]
async fn test_missing_identity_is_unauthenticated() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/projects", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("UNAUTHENTICATED"));
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_malformed_identity_header_is_unauthenticated() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/projects")
        .header(USER_ID_HEADER, "not-a-number")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_contributor_gets_forbidden() {
    let app = app().await;
    let owner = register(&app, "owner").await;
    let outsider = register(&app, "outsider").await;
    let project = create_project(&app, owner, "P").await;

    let uri = format!("/api/projects/{}/issues", project);
    let (status, body) = send(&app, "GET", &uri, Some(outsider), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!("PERMISSION_DENIED"));
    assert_eq!(
        body["error"]["message"],
        json!("You must be a contributor of this project to access it.")
    );
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let app = app().await;
    let user = register(&app, "ursula").await;

    let (status, body) = send(&app, "GET", "/api/projects/999/issues", Some(user), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_assigning_non_contributor_reports_field() {
    let app = app().await;
    let owner = register(&app, "owner").await;
    let outsider = register(&app, "outsider").await;
    let project = create_project(&app, owner, "P").await;

    let uri = format!("/api/projects/{}/issues", project);
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(owner),
        Some(json!({ "title": "Crash", "assigned_to": outsider })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["error"]["field"], json!("assigned_to"));

    let (_, listing) = send(&app, "GET", &uri, Some(owner), None).await;
    assert_eq!(listing["data"], json!([]));
}

#[tokio::test]
async fn test_issue_and_comment_flow() {
    let app = app().await;
    let owner = register(&app, "owner").await;
    let helper = register(&app, "helper").await;
    let project = create_project(&app, owner, "P").await;

    let contributors = format!("/api/projects/{}/contributors", project);
    let (status, _) = send(
        &app,
        "POST",
        &contributors,
        Some(owner),
        Some(json!({ "user_id": helper })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let issues = format!("/api/projects/{}/issues", project);
    let (status, body) = send(
        &app,
        "POST",
        &issues,
        Some(helper),
        Some(json!({ "title": "Crash", "tag": "BUG", "assigned_to": owner })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let issue = body["data"]["id"].as_i64().unwrap();

    let comments = format!("{}/{}/comments", issues, issue);
    let (status, body) = send(
        &app,
        "POST",
        &comments,
        Some(owner),
        Some(json!({ "description": "Looking into it" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uuid = body["data"]["uuid"].as_str().unwrap().to_string();

    // The issue author cannot edit someone else's comment
    let comment = format!("{}/{}", comments, uuid);
    let (status, _) = send(
        &app,
        "PATCH",
        &comment,
        Some(helper),
        Some(json!({ "description": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "DELETE", &comment, Some(owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &comment, Some(owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_listing_is_scoped_to_membership() {
    let app = app().await;
    let a = register(&app, "alice").await;
    let b = register(&app, "bob").await;
    create_project(&app, a, "Alpha").await;
    create_project(&app, b, "Beta").await;

    let (status, body) = send(&app, "GET", "/api/projects", Some(a), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha"]);
}

#[tokio::test]
async fn test_only_author_deletes_project() {
    let app = app().await;
    let owner = register(&app, "owner").await;
    let helper = register(&app, "helper").await;
    let project = create_project(&app, owner, "P").await;
    send(
        &app,
        "POST",
        &format!("/api/projects/{}/contributors", project),
        Some(owner),
        Some(json!({ "user_id": helper })),
    )
    .await;

    let uri = format!("/api/projects/{}", project);
    let (status, body) = send(&app, "DELETE", &uri, Some(helper), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"]["message"],
        json!("You must be the author of this resource to modify or delete it.")
    );

    let (status, _) = send(&app, "DELETE", &uri, Some(owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_anonymous_malformed_body_is_unauthenticated() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/api/projects", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHENTICATED"));

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/projects/999",
        None,
        Some(json!({ "type": "cobol" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHENTICATED"));

    // An id naming no account is treated the same way
    let (status, body) = send(&app, "POST", "/api/projects", Some(999), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = app().await;
    let owner = register(&app, "owner").await;

    let (status, body) = send(&app, "POST", "/api/projects", Some(owner), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert!(body["request_id"].is_string());

    let project = create_project(&app, owner, "alpha").await;
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{}", project),
        Some(owner),
        Some(json!({ "type": "cobol" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/register",
        None,
        Some(json!({ "username": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = app().await;
    let owner = register(&app, "owner").await;

    let (status, body) = send(&app, "GET", "/api/projects/abc", Some(owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));

    let (status, body) = send(&app, "GET", "/api/projects/abc", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHENTICATED"));
}
