// ABOUTME: Project storage
// ABOUTME: CRUD for projects plus the per-member listing with counts

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use tracker_core::{Project, ProjectCreateInput, ProjectSummary, ProjectUpdateInput};

use crate::{StorageError, StorageResult};

/// Insert a project row. Contributor enrolment of the author is the caller's job.
pub async fn insert_project(
    conn: &mut SqliteConnection,
    author_id: i64,
    input: &ProjectCreateInput,
) -> StorageResult<Project> {
    debug!("Creating project '{}' for author: {}", input.name, author_id);

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (name, description, type, author_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(input.name.trim())
    .bind(input.description.as_deref().unwrap_or_default())
    .bind(input.project_type)
    .bind(author_id)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await
    .map_err(StorageError::from_write)?;

    Ok(project)
}

pub async fn get_project(conn: &mut SqliteConnection, project_id: i64) -> StorageResult<Option<Project>> {
    debug!("Fetching project: {}", project_id);

    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(project_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(project)
}

/// Projects the user contributes to, oldest first
pub async fn list_projects_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> StorageResult<Vec<ProjectSummary>> {
    debug!("Listing projects for user: {}", user_id);

    let projects = sqlx::query_as::<_, ProjectSummary>(
        r#"
        SELECT
            p.*,
            (SELECT COUNT(*) FROM contributors c WHERE c.project_id = p.id) AS contributors_count,
            (SELECT COUNT(*) FROM issues i WHERE i.project_id = p.id) AS issues_count
        FROM projects p
        WHERE EXISTS (
            SELECT 1 FROM contributors m WHERE m.project_id = p.id AND m.user_id = ?
        )
        ORDER BY p.created_at, p.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(projects)
}

pub async fn update_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    input: &ProjectUpdateInput,
) -> StorageResult<Project> {
    debug!("Updating project: {}", project_id);

    let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE projects SET ");
    let mut separated = query_builder.separated(", ");
    let mut has_updates = false;

    if let Some(ref name) = input.name {
        separated.push("name = ").push_bind_unseparated(name.trim().to_string());
        has_updates = true;
    }
    if let Some(ref description) = input.description {
        separated.push("description = ").push_bind_unseparated(description.clone());
        has_updates = true;
    }
    if let Some(project_type) = input.project_type {
        separated.push("type = ").push_bind_unseparated(project_type);
        has_updates = true;
    }

    if has_updates {
        query_builder.push(" WHERE id = ").push_bind(project_id);
        query_builder.build().execute(&mut *conn).await?;
    }

    get_project(conn, project_id)
        .await?
        .ok_or(StorageError::NotFound("Project"))
}

/// Delete a project; contributors, issues, and their comments cascade
pub async fn delete_project(conn: &mut SqliteConnection, project_id: i64) -> StorageResult<()> {
    debug!("Deleting project: {}", project_id);

    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound("Project"));
    }
    Ok(())
}
