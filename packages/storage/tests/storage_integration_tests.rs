// ABOUTME: Integration tests for the SQLite storage layer
// ABOUTME: Covers uniqueness constraints, idempotent membership, cascades, and listing order

use pretty_assertions::assert_eq;
use sqlx::{SqliteConnection, SqlitePool};
use tracker_core::{
    CommentInput, IssueCreateInput, IssueUpdateInput, ProjectCreateInput, ProjectType,
    UserCreateInput,
};
use tracker_storage::{
    comments, connect_in_memory, contributors, issues, projects, users, StorageError,
};

async fn create_test_db() -> SqlitePool {
    connect_in_memory().await.unwrap()
}

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

async fn create_project(conn: &mut SqliteConnection, author_id: i64, name: &str) -> i64 {
    let input = ProjectCreateInput {
        name: name.to_string(),
        description: Some("A project".to_string()),
        project_type: ProjectType::BackEnd,
    };
    let project = projects::insert_project(conn, author_id, &input).await.unwrap();
    contributors::insert_contributor_if_absent(conn, project.id, author_id)
        .await
        .unwrap();
    project.id
}

fn issue_input(title: &str) -> IssueCreateInput {
    IssueCreateInput {
        title: title.to_string(),
        description: None,
        priority: None,
        tag: None,
        status: None,
        assigned_to: None,
    }
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    create_user(&mut conn, "alice").await;

    let input = UserCreateInput {
        username: "alice".to_string(),
        email: "other@example.com".to_string(),
        first_name: None,
        last_name: None,
        date_of_birth: None,
        can_be_contacted: None,
        can_data_be_shared: None,
    };
    let err = users::insert_user(&mut conn, &input).await.unwrap_err();

    assert!(err.violates("users.username"));
    assert!(!err.violates("users.email"));
}

#[tokio::test]
async fn test_user_defaults() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let id = create_user(&mut conn, "bob").await;
    let user = users::get_user(&mut conn, id).await.unwrap().unwrap();

    assert_eq!(user.username, "bob");
    assert!(!user.can_be_contacted);
    assert!(!user.can_data_be_shared);
    assert_eq!(user.age(), None);
}

#[tokio::test]
async fn test_contributor_pair_is_unique() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let other = create_user(&mut conn, "other").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;

    contributors::insert_contributor(&mut conn, project_id, other)
        .await
        .unwrap();
    let err = contributors::insert_contributor(&mut conn, project_id, other)
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::UniqueViolation(_)));
    assert_eq!(
        contributors::list_contributors(&mut conn, project_id)
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_insert_if_absent_is_idempotent() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;

    let first = contributors::insert_contributor_if_absent(&mut conn, project_id, author)
        .await
        .unwrap();
    let second = contributors::insert_contributor_if_absent(&mut conn, project_id, author)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert!(contributors::exists_contributor(&mut conn, project_id, author)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_project_delete_cascades() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;
    let issue = issues::insert_issue(&mut conn, project_id, author, &issue_input("Bug"))
        .await
        .unwrap();
    let input = CommentInput {
        description: "First".to_string(),
    };
    let comment = comments::insert_comment(&mut conn, issue.id, author, &input.description)
        .await
        .unwrap();

    projects::delete_project(&mut conn, project_id).await.unwrap();

    assert!(issues::get_issue(&mut conn, issue.id).await.unwrap().is_none());
    assert!(comments::get_comment(&mut conn, &comment.uuid)
        .await
        .unwrap()
        .is_none());
    assert!(contributors::list_contributors(&mut conn, project_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_deleting_assignee_clears_assignment() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let assignee = create_user(&mut conn, "assignee").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;

    let mut input = issue_input("Task");
    input.assigned_to = Some(assignee);
    let issue = issues::insert_issue(&mut conn, project_id, author, &input)
        .await
        .unwrap();
    assert_eq!(issue.assigned_to, Some(assignee));

    users::delete_user(&mut conn, assignee).await.unwrap();

    let issue = issues::get_issue(&mut conn, issue.id).await.unwrap().unwrap();
    assert_eq!(issue.assigned_to, None);
}

#[tokio::test]
async fn test_issue_update_can_clear_assignee() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;

    let mut input = issue_input("Task");
    input.assigned_to = Some(author);
    let issue = issues::insert_issue(&mut conn, project_id, author, &input)
        .await
        .unwrap();

    let update = IssueUpdateInput {
        assigned_to: Some(None),
        ..Default::default()
    };
    let updated = issues::update_issue(&mut conn, issue.id, &update).await.unwrap();

    assert_eq!(updated.assigned_to, None);
    assert_eq!(updated.title, "Task");
}

#[tokio::test]
async fn test_project_listing_counts_and_membership() {
    let pool = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let author = create_user(&mut conn, "author").await;
    let outsider = create_user(&mut conn, "outsider").await;
    let project_id = create_project(&mut conn, author, "Tracker").await;
    issues::insert_issue(&mut conn, project_id, author, &issue_input("One"))
        .await
        .unwrap();
    issues::insert_issue(&mut conn, project_id, author, &issue_input("Two"))
        .await
        .unwrap();

    let listed = projects::list_projects_for_user(&mut conn, author).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].contributors_count, 1);
    assert_eq!(listed[0].issues_count, 2);

    let listed = projects::list_projects_for_user(&mut conn, outsider)
        .await
        .unwrap();
    assert!(listed.is_empty());

    let issue_list = issues::list_issues(&mut conn, project_id).await.unwrap();
    assert_eq!(issue_list[0].title, "Two");
    assert_eq!(issue_list[0].author_name, "author");
}
