//! # Tracker Projects
//!
//! Service layer for Tracker: every operation authenticates the actor,
//! resolves and authorizes its target, validates input, and applies the
//! write together with its consistency side effects in one transaction.

pub mod db;
pub mod manager;

// Re-export main types from core
pub use tracker_core::{
    Actor, Comment, CommentDetail, CommentInput, Contributor, ContributorDetail, ContributorInput,
    Issue, IssueCreateInput, IssueDetail, IssueSummary, IssueUpdateInput, Project,
    ProjectCreateInput, ProjectDetail, ProjectSummary, ProjectUpdateInput, UserCreateInput,
    UserProfile, UserUpdateInput,
};

// Re-export manager types
pub use manager::{ManagerError, ManagerResult, ProjectsManager};

// Re-export access errors for callers mapping them to responses
pub use tracker_access::AccessError;
pub use tracker_storage::StorageError;

// Re-export database state
pub use db::DbState;
