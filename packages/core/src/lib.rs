// ABOUTME: Core types, validation, and constants for Tracker
// ABOUTME: Foundational package shared by storage, access control, and the API

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    Actor, Comment, CommentDetail, CommentInput, Contributor, ContributorDetail, ContributorInput,
    Issue, IssueCreateInput, IssueDetail, IssuePriority, IssueStatus, IssueSummary, IssueTag,
    IssueUpdateInput, Project, ProjectCreateInput, ProjectDetail, ProjectSummary, ProjectType,
    ProjectUpdateInput, User, UserCreateInput, UserProfile, UserUpdateInput,
};

// Re-export constants
pub use constants::{database_file, tracker_dir, MIN_USER_AGE};

// Re-export utilities
pub use utils::{age_on, generate_comment_uuid};

// Re-export validation
pub use validation::{
    validate_comment_input, validate_issue_create, validate_issue_update, validate_project_create,
    validate_project_update, validate_user_create, validate_user_update, ValidationError,
};
