// ABOUTME: Service operations for users, projects, contributors, issues, and comments
// ABOUTME: Each operation runs authentication, authorization, validation, and writes in one transaction

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;
use tracing::warn;

use tracker_access::AccessError;
use tracker_core::{Actor, User, ValidationError};
use tracker_storage::{users, StorageError};

mod comments;
mod contributors;
mod issues;
mod projects;
mod user_accounts;

/// Manager errors
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<sqlx::Error> for ManagerError {
    fn from(err: sqlx::Error) -> Self {
        ManagerError::Storage(StorageError::Sqlx(err))
    }
}

impl ManagerError {
    pub fn not_found(resource: &'static str) -> Self {
        ManagerError::Access(AccessError::NotFound(resource))
    }

    pub fn validation(field: &str, message: &str) -> Self {
        ManagerError::Validation(ValidationError::new(field, message))
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Entry point for every tracker operation
pub struct ProjectsManager {
    pool: SqlitePool,
}

impl ProjectsManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fail with `Unauthenticated` unless the actor names an existing account
    pub async fn verify_actor(&self, actor: Actor) -> ManagerResult<()> {
        let mut conn = self.pool.acquire().await?;
        authenticate(&mut conn, actor).await?;
        Ok(())
    }

    async fn begin_write(&self) -> ManagerResult<Transaction<'static, Sqlite>> {
        Ok(tracker_storage::begin_write(&self.pool).await?)
    }
}

/// Confirm that the actor names an existing account
async fn authenticate(conn: &mut SqliteConnection, actor: Actor) -> ManagerResult<User> {
    let Some(user_id) = actor.user_id() else {
        return Err(AccessError::Unauthenticated.into());
    };

    match users::get_user(conn, user_id).await? {
        Some(user) => Ok(user),
        None => {
            warn!("Rejected request for unknown user {}", user_id);
            Err(AccessError::Unauthenticated.into())
        }
    }
}

/// Take an entity out of a resolved scope
fn scoped<T: Clone>(entity: Option<&T>, resource: &'static str) -> ManagerResult<T> {
    entity.cloned().ok_or(ManagerError::not_found(resource))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
