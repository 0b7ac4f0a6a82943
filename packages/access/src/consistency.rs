// ABOUTME: Cross-entity invariants applied alongside writes
// ABOUTME: Authors are enrolled in their new projects; issue assignees must be contributors

use sqlx::SqliteConnection;
use tracing::{debug, info};

use tracker_core::{Contributor, Issue, IssueCreateInput, IssueUpdateInput, Project};

use crate::error::{AccessError, AccessResult};
use crate::lookup::ScopeLookup;
use crate::membership::ensure_contributor;

const ASSIGNEE_FIELD: &str = "assigned_to";
const ASSIGNEE_NOT_CONTRIBUTOR: &str = "The assigned user must be a contributor of this project.";

/// The parts of an issue the assignee rule looks at, as they will be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueDraft {
    pub project_id: i64,
    pub assigned_to: Option<i64>,
}

impl IssueDraft {
    pub fn for_create(project_id: i64, input: &IssueCreateInput) -> Self {
        Self {
            project_id,
            assigned_to: input.assigned_to,
        }
    }

    /// The issue after `input` is applied; an absent assignee keeps the current one
    pub fn for_update(issue: &Issue, input: &IssueUpdateInput) -> Self {
        Self {
            project_id: issue.project_id,
            assigned_to: input.assigned_to.unwrap_or(issue.assigned_to),
        }
    }
}

/// Enroll the author of a freshly inserted project. Safe to run more than once.
pub async fn enforce_on_create(
    conn: &mut SqliteConnection,
    project: &Project,
) -> AccessResult<Contributor> {
    let contributor = ensure_contributor(conn, project.id, project.author_id).await?;

    info!(
        "Enrolled author {} as contributor of project {}",
        project.author_id, project.id
    );
    Ok(contributor)
}

/// Reject a draft whose assignee is not a current contributor of its project
pub async fn validate_assignee<L>(lookup: &mut L, draft: &IssueDraft) -> AccessResult<()>
where
    L: ScopeLookup + ?Sized,
{
    let Some(user_id) = draft.assigned_to else {
        return Ok(());
    };

    if !lookup.exists_contributor(draft.project_id, user_id).await? {
        debug!(
            "Assignee {} is not a contributor of project {}",
            user_id, draft.project_id
        );
        return Err(AccessError::validation(
            ASSIGNEE_FIELD,
            ASSIGNEE_NOT_CONTRIBUTOR,
        ));
    }
    Ok(())
}
