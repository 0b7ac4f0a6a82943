// ABOUTME: Comment storage
// ABOUTME: Comments are keyed by UUID and belong to exactly one issue

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use tracker_core::{generate_comment_uuid, Comment, CommentDetail};

use crate::{StorageError, StorageResult};

pub async fn insert_comment(
    conn: &mut SqliteConnection,
    issue_id: i64,
    author_id: i64,
    description: &str,
) -> StorageResult<Comment> {
    let uuid = generate_comment_uuid();

    debug!("Creating comment {} on issue: {}", uuid, issue_id);

    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (uuid, description, issue_id, author_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&uuid)
    .bind(description)
    .bind(issue_id)
    .bind(author_id)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(comment)
}

pub async fn get_comment(conn: &mut SqliteConnection, uuid: &str) -> StorageResult<Option<Comment>> {
    debug!("Fetching comment: {}", uuid);

    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE uuid = ?")
        .bind(uuid)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(comment)
}

pub async fn get_comment_detail(
    conn: &mut SqliteConnection,
    uuid: &str,
) -> StorageResult<Option<CommentDetail>> {
    let comment = sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.uuid, c.description, c.issue_id, c.author_id,
               u.username AS author_name, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.uuid = ?
        "#,
    )
    .bind(uuid)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(comment)
}

/// Comments of an issue, oldest first
pub async fn list_comments(conn: &mut SqliteConnection, issue_id: i64) -> StorageResult<Vec<CommentDetail>> {
    debug!("Listing comments for issue: {}", issue_id);

    let comments = sqlx::query_as::<_, CommentDetail>(
        r#"
        SELECT c.uuid, c.description, c.issue_id, c.author_id,
               u.username AS author_name, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.issue_id = ?
        ORDER BY c.created_at, c.rowid
        "#,
    )
    .bind(issue_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(comments)
}

pub async fn update_comment(
    conn: &mut SqliteConnection,
    uuid: &str,
    description: &str,
) -> StorageResult<Comment> {
    debug!("Updating comment: {}", uuid);

    let comment = sqlx::query_as::<_, Comment>(
        "UPDATE comments SET description = ? WHERE uuid = ? RETURNING *",
    )
    .bind(description)
    .bind(uuid)
    .fetch_optional(&mut *conn)
    .await?;

    comment.ok_or(StorageError::NotFound("Comment"))
}

pub async fn delete_comment(conn: &mut SqliteConnection, uuid: &str) -> StorageResult<()> {
    debug!("Deleting comment: {}", uuid);

    let result = sqlx::query("DELETE FROM comments WHERE uuid = ?")
        .bind(uuid)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound("Comment"));
    }
    Ok(())
}
