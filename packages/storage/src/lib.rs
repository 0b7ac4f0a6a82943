// ABOUTME: SQLite persistence for users, projects, contributors, issues, and comments
// ABOUTME: Every query runs on a caller-supplied connection so one transaction can span a request

use thiserror::Error;

pub mod comments;
pub mod contributors;
pub mod db;
pub mod issues;
pub mod projects;
pub mod users;

pub use db::{begin_write, connect, connect_in_memory, run_migrations};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl StorageError {
    /// Translate a sqlx error, surfacing unique-constraint failures as their own variant
    pub fn from_write(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                StorageError::UniqueViolation(db_err.message().to_string())
            }
            _ => StorageError::Sqlx(err),
        }
    }

    /// True when the violated constraint involves the given `table.column`
    pub fn violates(&self, column: &str) -> bool {
        matches!(self, StorageError::UniqueViolation(msg) if msg.contains(column))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
