// ABOUTME: Contributor (project membership) storage
// ABOUTME: Membership rows are unique per (user, project); inserts come in strict and idempotent forms

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use tracker_core::{Contributor, ContributorDetail};

use crate::{StorageError, StorageResult};

/// Insert a membership row; a duplicate pair yields `StorageError::UniqueViolation`
pub async fn insert_contributor(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> StorageResult<Contributor> {
    debug!("Adding user {} to project {}", user_id, project_id);

    let contributor = sqlx::query_as::<_, Contributor>(
        r#"
        INSERT INTO contributors (user_id, project_id, created_at)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(project_id)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await
    .map_err(StorageError::from_write)?;

    Ok(contributor)
}

/// Get-or-create a membership row; never fails on an existing pair
pub async fn insert_contributor_if_absent(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> StorageResult<Contributor> {
    debug!("Ensuring user {} contributes to project {}", user_id, project_id);

    sqlx::query(
        r#"
        INSERT INTO contributors (user_id, project_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, project_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(project_id)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    find_contributor(conn, project_id, user_id)
        .await?
        .ok_or(StorageError::NotFound("Contributor"))
}

pub async fn get_contributor(
    conn: &mut SqliteConnection,
    contributor_id: i64,
) -> StorageResult<Option<Contributor>> {
    debug!("Fetching contributor: {}", contributor_id);

    let contributor = sqlx::query_as::<_, Contributor>("SELECT * FROM contributors WHERE id = ?")
        .bind(contributor_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(contributor)
}

pub async fn find_contributor(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> StorageResult<Option<Contributor>> {
    let contributor = sqlx::query_as::<_, Contributor>(
        "SELECT * FROM contributors WHERE project_id = ? AND user_id = ?",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(contributor)
}

pub async fn exists_contributor(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> StorageResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM contributors WHERE project_id = ? AND user_id = ?",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count > 0)
}

/// Membership rows of a project joined with the users' identities, oldest first
pub async fn list_contributors(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> StorageResult<Vec<ContributorDetail>> {
    debug!("Listing contributors for project: {}", project_id);

    let contributors = sqlx::query_as::<_, ContributorDetail>(
        r#"
        SELECT c.id, c.user_id, u.username, u.email, c.project_id, c.created_at
        FROM contributors c
        JOIN users u ON u.id = c.user_id
        WHERE c.project_id = ?
        ORDER BY c.created_at, c.id
        "#,
    )
    .bind(project_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(contributors)
}

pub async fn get_contributor_detail(
    conn: &mut SqliteConnection,
    contributor_id: i64,
) -> StorageResult<Option<ContributorDetail>> {
    let contributor = sqlx::query_as::<_, ContributorDetail>(
        r#"
        SELECT c.id, c.user_id, u.username, u.email, c.project_id, c.created_at
        FROM contributors c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = ?
        "#,
    )
    .bind(contributor_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(contributor)
}

/// Rebind a membership row to another user
pub async fn reassign_contributor(
    conn: &mut SqliteConnection,
    contributor_id: i64,
    user_id: i64,
) -> StorageResult<Contributor> {
    debug!("Reassigning contributor {} to user {}", contributor_id, user_id);

    let contributor = sqlx::query_as::<_, Contributor>(
        "UPDATE contributors SET user_id = ? WHERE id = ? RETURNING *",
    )
    .bind(user_id)
    .bind(contributor_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(StorageError::from_write)?;

    contributor.ok_or(StorageError::NotFound("Contributor"))
}

pub async fn delete_contributor(conn: &mut SqliteConnection, contributor_id: i64) -> StorageResult<()> {
    debug!("Removing contributor: {}", contributor_id);

    let result = sqlx::query("DELETE FROM contributors WHERE id = ?")
        .bind(contributor_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound("Contributor"));
    }
    Ok(())
}
