// ABOUTME: Membership writes racing on a file-backed WAL database
// ABOUTME: The second writer waits for the first and then fails on the field, not on the lock

use std::time::Duration;

use sqlx::SqliteConnection;
use tempfile::TempDir;

use tracker_access::{add_contributor, enforce_on_create, is_contributor, AccessError};
use tracker_core::{Project, ProjectCreateInput, ProjectType, UserCreateInput};
use tracker_storage::{begin_write, connect, contributors, projects, users};

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
        project_type: ProjectType::FrontEnd,
    };
    let project = projects::insert_project(conn, author_id, &input).await.unwrap();
    enforce_on_create(conn, &project).await.unwrap();
    project
}

#[tokio::test]
async fn test_racing_additions_leave_loser_with_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let pool = connect(&temp_dir.path().join("tracker.db"), 4)
        .await
        .unwrap();

    let (project, member) = {
        let mut conn = pool.acquire().await.unwrap();
        let author = create_user(&mut conn, "author").await;
        let member = create_user(&mut conn, "member").await;
        (create_project(&mut conn, author).await, member)
    };

    let mut first = begin_write(&pool).await.unwrap();
    assert!(!is_contributor(&mut *first, project.id, member).await.unwrap());

    let second = tokio::spawn({
        let pool = pool.clone();
        let project = project.clone();
        async move {
            let mut tx = begin_write(&pool).await.unwrap();
            let result = add_contributor(&mut tx, &project, member).await;
            if result.is_ok() {
                tx.commit().await.unwrap();
            }
            result
        }
    });

    // Give the second writer time to queue behind the first
    tokio::time::sleep(Duration::from_millis(200)).await;

    add_contributor(&mut first, &project, member).await.unwrap();
    first.commit().await.unwrap();

    match second.await.unwrap() {
        Err(AccessError::Validation { field, .. }) => assert_eq!(field, "user_id"),
        other => panic!("expected Validation on user_id, got {:?}", other),
    }

    let mut conn = pool.acquire().await.unwrap();
    let listed = contributors::list_contributors(&mut conn, project.id)
        .await
        .unwrap();
    assert_eq!(listed.iter().filter(|c| c.user_id == member).count(), 1);
}
