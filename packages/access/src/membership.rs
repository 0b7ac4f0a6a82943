// ABOUTME: Membership registry: which users contribute to which projects
// ABOUTME: Explicit additions reject duplicates; the project author's own row is permanent

use sqlx::SqliteConnection;
use tracing::{debug, info};

use tracker_core::{Contributor, Project};
use tracker_storage::{contributors, StorageError};

use crate::error::{AccessError, AccessResult};
use crate::lookup::ScopeLookup;

const FIELD: &str = "user_id";
const ALREADY_CONTRIBUTOR: &str = "This user is already a contributor of this project.";
const UNKNOWN_USER: &str = "This user does not exist.";
const AUTHOR_ROW: &str = "The project author cannot be removed from its contributors.";

pub async fn is_contributor<L>(lookup: &mut L, project_id: i64, user_id: i64) -> AccessResult<bool>
where
    L: ScopeLookup + ?Sized,
{
    Ok(lookup.exists_contributor(project_id, user_id).await?)
}

/// Get-or-create membership; never fails because the pair already exists
pub async fn ensure_contributor(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> AccessResult<Contributor> {
    Ok(contributors::insert_contributor_if_absent(conn, project_id, user_id).await?)
}

/// Explicitly add `user_id` to the project
pub async fn add_contributor(
    conn: &mut SqliteConnection,
    project: &Project,
    user_id: i64,
) -> AccessResult<Contributor> {
    require_new_member(conn, project.id, user_id).await?;

    let contributor = contributors::insert_contributor(conn, project.id, user_id)
        .await
        .map_err(duplicate_as_validation)?;

    info!("Added user {} to project {}", user_id, project.id);
    Ok(contributor)
}

/// Remove a membership row other than the project author's
pub async fn remove_contributor(
    conn: &mut SqliteConnection,
    project: &Project,
    contributor: &Contributor,
) -> AccessResult<()> {
    if contributor.user_id == project.author_id {
        return Err(AccessError::validation(FIELD, AUTHOR_ROW));
    }

    contributors::delete_contributor(conn, contributor.id).await?;

    info!(
        "Removed user {} from project {}",
        contributor.user_id, project.id
    );
    Ok(())
}

/// Rebind a membership row to another user, with the same checks as an addition
pub async fn reassign_contributor(
    conn: &mut SqliteConnection,
    project: &Project,
    contributor: &Contributor,
    user_id: i64,
) -> AccessResult<Contributor> {
    if contributor.user_id == user_id {
        debug!("Contributor {} already bound to user {}", contributor.id, user_id);
        return Ok(contributor.clone());
    }
    if contributor.user_id == project.author_id {
        return Err(AccessError::validation(FIELD, AUTHOR_ROW));
    }

    require_new_member(conn, project.id, user_id).await?;

    let updated = contributors::reassign_contributor(conn, contributor.id, user_id)
        .await
        .map_err(duplicate_as_validation)?;

    info!(
        "Reassigned contributor {} of project {} from user {} to user {}",
        contributor.id, project.id, contributor.user_id, user_id
    );
    Ok(updated)
}

async fn require_new_member(
    conn: &mut SqliteConnection,
    project_id: i64,
    user_id: i64,
) -> AccessResult<()> {
    if conn.find_user(user_id).await?.is_none() {
        return Err(AccessError::validation(FIELD, UNKNOWN_USER));
    }
    if is_contributor(conn, project_id, user_id).await? {
        return Err(AccessError::validation(FIELD, ALREADY_CONTRIBUTOR));
    }
    Ok(())
}

// A concurrent add can pass the existence check and still lose on the unique index
fn duplicate_as_validation(err: StorageError) -> AccessError {
    match err {
        StorageError::UniqueViolation(_) => AccessError::validation(FIELD, ALREADY_CONTRIBUTOR),
        other => AccessError::Storage(other),
    }
}
