// ABOUTME: Resource hierarchy resolution (project -> contributor | issue -> comment)
// ABOUTME: Loads every entity named on a path and ties it to the project that owns it

use tracing::debug;

use tracker_core::{Comment, Contributor, Issue, Project};

use crate::error::{AccessError, AccessResult};
use crate::lookup::ScopeLookup;

/// A request target. Child paths always carry their ancestors' identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    Projects,
    Project {
        project_id: i64,
    },
    Contributors {
        project_id: i64,
    },
    Contributor {
        project_id: i64,
        contributor_id: i64,
    },
    Issues {
        project_id: i64,
    },
    Issue {
        project_id: i64,
        issue_id: i64,
    },
    Comments {
        project_id: i64,
        issue_id: i64,
    },
    Comment {
        project_id: i64,
        issue_id: i64,
        uuid: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectScope {
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributorScope {
    pub project: Project,
    pub contributor: Contributor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueScope {
    pub project: Project,
    pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentScope {
    pub project: Project,
    pub issue: Issue,
    pub comment: Comment,
}

impl ProjectScope {
    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl ContributorScope {
    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl IssueScope {
    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl CommentScope {
    pub fn project(&self) -> &Project {
        &self.project
    }
}

/// What a resolved path points at
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Projects,
    Project(ProjectScope),
    Contributors(ProjectScope),
    Contributor(ContributorScope),
    Issues(ProjectScope),
    Issue(IssueScope),
    Comments(IssueScope),
    Comment(CommentScope),
}

impl Target {
    /// The project that transitively owns the target
    pub fn project(&self) -> Option<&Project> {
        match self {
            Target::Projects => None,
            Target::Project(s) | Target::Contributors(s) | Target::Issues(s) => Some(s.project()),
            Target::Contributor(s) => Some(s.project()),
            Target::Issue(s) | Target::Comments(s) => Some(s.project()),
            Target::Comment(s) => Some(s.project()),
        }
    }

    /// The user whose authorship gates mutation of the target.
    ///
    /// Contributor rows are governed by the project author.
    pub fn author_id(&self) -> Option<i64> {
        match self {
            Target::Project(s) => Some(s.project.author_id),
            Target::Contributor(s) => Some(s.project.author_id),
            Target::Issue(s) => Some(s.issue.author_id),
            Target::Comment(s) => Some(s.comment.author_id),
            _ => None,
        }
    }
}

/// A target together with the membership of its project
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScope {
    pub target: Target,
    /// User ids of the owning project's contributors; empty for the projects collection
    pub contributor_ids: Vec<i64>,
}

impl ResolvedScope {
    pub fn is_contributor(&self, user_id: i64) -> bool {
        self.contributor_ids.contains(&user_id)
    }

    pub fn project(&self) -> Option<&Project> {
        self.target.project()
    }

    pub fn issue(&self) -> Option<&Issue> {
        match &self.target {
            Target::Issue(s) | Target::Comments(s) => Some(&s.issue),
            Target::Comment(s) => Some(&s.issue),
            _ => None,
        }
    }

    pub fn contributor(&self) -> Option<&Contributor> {
        match &self.target {
            Target::Contributor(s) => Some(&s.contributor),
            _ => None,
        }
    }

    pub fn comment(&self) -> Option<&Comment> {
        match &self.target {
            Target::Comment(s) => Some(&s.comment),
            _ => None,
        }
    }
}

/// Resolve a path, failing with `NotFound` for any missing entity or any
/// child that does not belong to the parent named on the path.
pub async fn resolve<L>(lookup: &mut L, path: &ResourcePath) -> AccessResult<ResolvedScope>
where
    L: ScopeLookup + ?Sized,
{
    debug!("Resolving scope for {:?}", path);

    let target = match path {
        ResourcePath::Projects => {
            return Ok(ResolvedScope {
                target: Target::Projects,
                contributor_ids: Vec::new(),
            })
        }
        ResourcePath::Project { project_id } => Target::Project(ProjectScope {
            project: load_project(lookup, *project_id).await?,
        }),
        ResourcePath::Contributors { project_id } => Target::Contributors(ProjectScope {
            project: load_project(lookup, *project_id).await?,
        }),
        ResourcePath::Contributor {
            project_id,
            contributor_id,
        } => {
            let project = load_project(lookup, *project_id).await?;
            let contributor = lookup
                .find_contributor(*contributor_id)
                .await?
                .filter(|c| c.project_id == project.id)
                .ok_or(AccessError::NotFound("Contributor"))?;
            Target::Contributor(ContributorScope {
                project,
                contributor,
            })
        }
        ResourcePath::Issues { project_id } => Target::Issues(ProjectScope {
            project: load_project(lookup, *project_id).await?,
        }),
        ResourcePath::Issue {
            project_id,
            issue_id,
        } => {
            let project = load_project(lookup, *project_id).await?;
            let issue = load_issue(lookup, &project, *issue_id).await?;
            Target::Issue(IssueScope { project, issue })
        }
        ResourcePath::Comments {
            project_id,
            issue_id,
        } => {
            let project = load_project(lookup, *project_id).await?;
            let issue = load_issue(lookup, &project, *issue_id).await?;
            Target::Comments(IssueScope { project, issue })
        }
        ResourcePath::Comment {
            project_id,
            issue_id,
            uuid,
        } => {
            let project = load_project(lookup, *project_id).await?;
            let issue = load_issue(lookup, &project, *issue_id).await?;
            let comment = lookup
                .find_comment(uuid)
                .await?
                .filter(|c| c.issue_id == issue.id)
                .ok_or(AccessError::NotFound("Comment"))?;
            Target::Comment(CommentScope {
                project,
                issue,
                comment,
            })
        }
    };

    let project_id = target
        .project()
        .map(|p| p.id)
        .ok_or(AccessError::NotFound("Project"))?;
    let contributor_ids = lookup
        .list_contributors(project_id)
        .await?
        .into_iter()
        .map(|c| c.user_id)
        .collect();

    Ok(ResolvedScope {
        target,
        contributor_ids,
    })
}

async fn load_project<L>(lookup: &mut L, project_id: i64) -> AccessResult<Project>
where
    L: ScopeLookup + ?Sized,
{
    lookup
        .find_project(project_id)
        .await?
        .ok_or(AccessError::NotFound("Project"))
}

async fn load_issue<L>(lookup: &mut L, project: &Project, issue_id: i64) -> AccessResult<Issue>
where
    L: ScopeLookup + ?Sized,
{
    lookup
        .find_issue(issue_id)
        .await?
        .filter(|i| i.project_id == project.id)
        .ok_or(AccessError::NotFound("Issue"))
}
