// ABOUTME: Membership registry and consistency rules against a migrated SQLite database
// ABOUTME: Verifies author enrolment, duplicate rejection, and the protected author row

use pretty_assertions::assert_eq;
use sqlx::SqliteConnection;

use tracker_access::{
    add_contributor, enforce_on_create, is_contributor, reassign_contributor, remove_contributor,
    AccessError,
};
use tracker_core::{Project, ProjectCreateInput, ProjectType, UserCreateInput};
use tracker_storage::{connect_in_memory, contributors, projects, users};

async fn create_user(conn: &mut SqliteConnection, username: &str) -> i64 {
    let input = UserCreateInput {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: None,
        last_name: None,
        date_of_birth: None,
        can_be_contacted: None,
        can_data_be_shared: None,
    };
    users::insert_user(conn, &input).await.unwrap().id
}

async fn create_project(conn: &mut SqliteConnection, author_id: i64) -> Project {
    let input = ProjectCreateInput {
        name: "Tracker".to_string(),
        description: None,
        project_type: ProjectType::Android,
    };
    let project = projects::insert_project(conn, author_id, &input).await.unwrap();
    enforce_on_create(conn, &project).await.unwrap();
    project
}

fn assert_user_id_validation(err: AccessError) {
    match err {
        AccessError::Validation { field, .. } => assert_eq!(field, "user_id"),
        other => panic!("expected Validation on user_id, got {:?}", other),
    }
}

#[tokio::test]
async fn test_author_is_sole_contributor_after_create() {
    let pool = connect_in_memory().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let project = create_project(&mut conn, author).await;

    let listed = contributors::list_contributors(&mut conn, project.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, author);

    // Re-running enrolment is a no-op
    let again = enforce_on_create(&mut conn, &project).await.unwrap();
    assert_eq!(again.id, listed[0].id);
    assert!(is_contributor(&mut *conn, project.id, author).await.unwrap());
}

#[tokio::test]
async fn test_second_explicit_add_is_rejected() {
    let pool = connect_in_memory().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let member = create_user(&mut conn, "member").await;
    let project = create_project(&mut conn, author).await;

    add_contributor(&mut conn, &project, member).await.unwrap();
    let err = add_contributor(&mut conn, &project, member)
        .await
        .unwrap_err();
    assert_user_id_validation(err);

    // Adding the author explicitly is a duplicate too
    let err = add_contributor(&mut conn, &project, author)
        .await
        .unwrap_err();
    assert_user_id_validation(err);
}

#[tokio::test]
async fn test_unknown_user_cannot_be_added() {
    let pool = connect_in_memory().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let project = create_project(&mut conn, author).await;

    let err = add_contributor(&mut conn, &project, 4242).await.unwrap_err();
    assert_user_id_validation(err);
}

#[tokio::test]
async fn test_author_row_is_protected() {
    let pool = connect_in_memory().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let other = create_user(&mut conn, "other").await;
    let project = create_project(&mut conn, author).await;
    let author_row = contributors::find_contributor(&mut conn, project.id, author)
        .await
        .unwrap()
        .unwrap();

    let err = remove_contributor(&mut conn, &project, &author_row)
        .await
        .unwrap_err();
    assert_user_id_validation(err);

    let err = reassign_contributor(&mut conn, &project, &author_row, other)
        .await
        .unwrap_err();
    assert_user_id_validation(err);
}

#[tokio::test]
async fn test_remove_and_reassign_member() {
    let pool = connect_in_memory().await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let first = create_user(&mut conn, "first").await;
    let second = create_user(&mut conn, "second").await;
    let project = create_project(&mut conn, author).await;

    let row = add_contributor(&mut conn, &project, first).await.unwrap();
    let row = reassign_contributor(&mut conn, &project, &row, second)
        .await
        .unwrap();
    assert_eq!(row.user_id, second);
    assert!(!is_contributor(&mut *conn, project.id, first).await.unwrap());

    remove_contributor(&mut conn, &project, &row).await.unwrap();
    assert!(!is_contributor(&mut *conn, project.id, second).await.unwrap());
}
