// ABOUTME: Database connection management and service initialization
// ABOUTME: Provides shared access to the SQLite pool and the manager built on it

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use tracker_storage::StorageError;

use crate::manager::ProjectsManager;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub manager: Arc<ProjectsManager>,
}

impl DbState {
    /// Create new database state from a migrated SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let manager = Arc::new(ProjectsManager::new(pool.clone()));
        Self { pool, manager }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(
        database_path: Option<PathBuf>,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(tracker_core::database_file);

        let pool = tracker_storage::connect(&database_path, max_connections).await?;

        info!("Database ready at {}", database_path.display());
        Ok(Self::new(pool))
    }

    /// Fresh in-memory database, for tests and throwaway servers
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = tracker_storage::connect_in_memory().await?;
        Ok(Self::new(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_with_path_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.db");

        let state = DbState::init_with_path(Some(path.clone()), 2).await.unwrap();

        assert!(path.exists());
        assert!(!state.pool.is_closed());
    }
}
