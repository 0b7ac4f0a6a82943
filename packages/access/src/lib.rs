// ABOUTME: Authorization and consistency core for Tracker
// ABOUTME: Resolves resource paths to project scopes, evaluates the rule table, and guards membership invariants

pub mod action;
pub mod consistency;
pub mod error;
pub mod evaluator;
pub mod lookup;
pub mod membership;
pub mod scope;

pub use action::Action;
pub use consistency::{enforce_on_create, validate_assignee, IssueDraft};
pub use error::{AccessError, AccessResult};
pub use evaluator::{authorize, check, Decision, AUTHOR_REQUIRED, CONTRIBUTOR_REQUIRED};
pub use lookup::ScopeLookup;
pub use membership::{
    add_contributor, ensure_contributor, is_contributor, reassign_contributor, remove_contributor,
};
pub use scope::{
    resolve, CommentScope, ContributorScope, IssueScope, ProjectScope, ResolvedScope,
    ResourcePath, Target,
};
