// ABOUTME: Storage lookup surface consumed by scope resolution and the consistency rules
// ABOUTME: Implemented directly on SqliteConnection so lookups share the request's transaction

use async_trait::async_trait;
use sqlx::SqliteConnection;

use tracker_core::{Comment, Contributor, ContributorDetail, Issue, Project, User};
use tracker_storage::{comments, contributors, issues, projects, users, StorageResult};

/// Read-only queries the access layer needs. `None` means the entity does not exist.
#[async_trait]
pub trait ScopeLookup: Send {
    async fn find_user(&mut self, user_id: i64) -> StorageResult<Option<User>>;
    async fn find_project(&mut self, project_id: i64) -> StorageResult<Option<Project>>;
    async fn find_contributor(&mut self, contributor_id: i64) -> StorageResult<Option<Contributor>>;
    async fn find_issue(&mut self, issue_id: i64) -> StorageResult<Option<Issue>>;
    async fn find_comment(&mut self, uuid: &str) -> StorageResult<Option<Comment>>;
    async fn list_contributors(&mut self, project_id: i64) -> StorageResult<Vec<ContributorDetail>>;
    async fn exists_contributor(&mut self, project_id: i64, user_id: i64) -> StorageResult<bool>;
}

#[async_trait]
impl ScopeLookup for SqliteConnection {
    async fn find_user(&mut self, user_id: i64) -> StorageResult<Option<User>> {
        users::get_user(self, user_id).await
    }

    async fn find_project(&mut self, project_id: i64) -> StorageResult<Option<Project>> {
        projects::get_project(self, project_id).await
    }

    async fn find_contributor(&mut self, contributor_id: i64) -> StorageResult<Option<Contributor>> {
        contributors::get_contributor(self, contributor_id).await
    }

    async fn find_issue(&mut self, issue_id: i64) -> StorageResult<Option<Issue>> {
        issues::get_issue(self, issue_id).await
    }

    async fn find_comment(&mut self, uuid: &str) -> StorageResult<Option<Comment>> {
        comments::get_comment(self, uuid).await
    }

    async fn list_contributors(&mut self, project_id: i64) -> StorageResult<Vec<ContributorDetail>> {
        contributors::list_contributors(self, project_id).await
    }

    async fn exists_contributor(&mut self, project_id: i64, user_id: i64) -> StorageResult<bool> {
        contributors::exists_contributor(self, project_id, user_id).await
    }
}
