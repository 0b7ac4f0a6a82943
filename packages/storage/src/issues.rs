// ABOUTME: Issue storage
// ABOUTME: CRUD for issues within a project and the summary listing with comment counts

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use tracker_core::{Issue, IssueCreateInput, IssueSummary, IssueUpdateInput};

use crate::{StorageError, StorageResult};

/// Insert an issue row. Assignee membership must already be checked by the caller.
pub async fn insert_issue(
    conn: &mut SqliteConnection,
    project_id: i64,
    author_id: i64,
    input: &IssueCreateInput,
) -> StorageResult<Issue> {
    debug!("Creating issue '{}' in project: {}", input.title, project_id);

    let issue = sqlx::query_as::<_, Issue>(
        r#"
        INSERT INTO issues (
            title, description, priority, tag, status,
            project_id, author_id, assigned_to, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(input.title.trim())
    .bind(input.description.as_deref().unwrap_or_default())
    .bind(input.priority.unwrap_or_default())
    .bind(input.tag.unwrap_or_default())
    .bind(input.status.unwrap_or_default())
    .bind(project_id)
    .bind(author_id)
    .bind(input.assigned_to)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(issue)
}

pub async fn get_issue(conn: &mut SqliteConnection, issue_id: i64) -> StorageResult<Option<Issue>> {
    debug!("Fetching issue: {}", issue_id);

    let issue = sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE id = ?")
        .bind(issue_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(issue)
}

/// Issues of a project, newest first
pub async fn list_issues(conn: &mut SqliteConnection, project_id: i64) -> StorageResult<Vec<IssueSummary>> {
    debug!("Listing issues for project: {}", project_id);

    let issues = sqlx::query_as::<_, IssueSummary>(
        r#"
        SELECT
            i.id, i.title, i.project_id, i.status, i.priority, i.tag,
            i.author_id, u.username AS author_name, i.assigned_to,
            (SELECT COUNT(*) FROM comments c WHERE c.issue_id = i.id) AS comments_count,
            i.created_at
        FROM issues i
        JOIN users u ON u.id = i.author_id
        WHERE i.project_id = ?
        ORDER BY i.created_at DESC, i.id DESC
        "#,
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(issues)
}

pub async fn update_issue(
    conn: &mut SqliteConnection,
    issue_id: i64,
    input: &IssueUpdateInput,
) -> StorageResult<Issue> {
    debug!("Updating issue: {}", issue_id);

    let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE issues SET ");
    let mut separated = query_builder.separated(", ");
    let mut has_updates = false;

    if let Some(ref title) = input.title {
        separated.push("title = ").push_bind_unseparated(title.trim().to_string());
        has_updates = true;
    }
    if let Some(ref description) = input.description {
        separated.push("description = ").push_bind_unseparated(description.clone());
        has_updates = true;
    }
    if let Some(priority) = input.priority {
        separated.push("priority = ").push_bind_unseparated(priority);
        has_updates = true;
    }
    if let Some(tag) = input.tag {
        separated.push("tag = ").push_bind_unseparated(tag);
        has_updates = true;
    }
    if let Some(status) = input.status {
        separated.push("status = ").push_bind_unseparated(status);
        has_updates = true;
    }
    if let Some(assigned_to) = input.assigned_to {
        separated.push("assigned_to = ").push_bind_unseparated(assigned_to);
        has_updates = true;
    }

    if has_updates {
        query_builder.push(" WHERE id = ").push_bind(issue_id);
        query_builder.build().execute(&mut *conn).await?;
    }

    get_issue(conn, issue_id)
        .await?
        .ok_or(StorageError::NotFound("Issue"))
}

/// Delete an issue; its comments cascade
pub async fn delete_issue(conn: &mut SqliteConnection, issue_id: i64) -> StorageResult<()> {
    debug!("Deleting issue: {}", issue_id);

    let result = sqlx::query("DELETE FROM issues WHERE id = ?")
        .bind(issue_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound("Issue"));
    }
    Ok(())
}
