// ABOUTME: Issue operations within a project
// ABOUTME: Every save re-checks that the effective assignee is a contributor of the project

use tracing::info;

use tracker_access::{check, validate_assignee, Action, IssueDraft, ResourcePath};
use tracker_core::{
    validate_issue_create, validate_issue_update, Actor, Issue, IssueCreateInput, IssueDetail,
    IssueSummary, IssueUpdateInput,
};
use tracker_storage::{comments, issues, users};

use super::{authenticate, scoped, ManagerError, ManagerResult, ProjectsManager};

impl ProjectsManager {
    /// Issues of a project, newest first
    pub async fn list_issues(
        &self,
        actor: Actor,
        project_id: i64,
    ) -> ManagerResult<Vec<IssueSummary>> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Issues { project_id },
        )
        .await?;

        Ok(issues::list_issues(&mut tx, project_id).await?)
    }

    pub async fn create_issue(
        &self,
        actor: Actor,
        project_id: i64,
        input: IssueCreateInput,
    ) -> ManagerResult<Issue> {
        let mut tx = self.begin_write().await?;
        let user = authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Create,
            ResourcePath::Issues { project_id },
        )
        .await?;

        validate_issue_create(&input)?;
        validate_assignee(&mut *tx, &IssueDraft::for_create(project_id, &input)).await?;

        let issue = issues::insert_issue(&mut tx, project_id, user.id, &input).await?;
        tx.commit().await?;

        info!(
            "Created issue '{}' with ID {} in project {}",
            issue.title, issue.id, project_id
        );
        Ok(issue)
    }

    pub async fn get_issue(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
    ) -> ManagerResult<IssueDetail> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Issue {
                project_id,
                issue_id,
            },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;
        let issue = scoped(scope.issue(), "Issue")?;

        let author = users::get_user(&mut tx, issue.author_id)
            .await?
            .ok_or(ManagerError::not_found("User"))?;
        let assigned_to_name = match issue.assigned_to {
            Some(user_id) => users::get_user(&mut tx, user_id).await?.map(|u| u.username),
            None => None,
        };
        let comments = comments::list_comments(&mut tx, issue.id).await?;

        Ok(IssueDetail {
            issue,
            project_name: project.name,
            author_name: author.username,
            assigned_to_name,
            comments,
        })
    }

    /// Partial update; `assigned_to: null` clears the assignee
    pub async fn update_issue(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
        input: IssueUpdateInput,
    ) -> ManagerResult<Issue> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Issue {
                project_id,
                issue_id,
            },
        )
        .await?;
        let issue = scoped(scope.issue(), "Issue")?;

        validate_issue_update(&input)?;
        validate_assignee(&mut *tx, &IssueDraft::for_update(&issue, &input)).await?;

        let issue = issues::update_issue(&mut tx, issue.id, &input).await?;
        tx.commit().await?;

        info!("Updated issue '{}' (ID: {})", issue.title, issue.id);
        Ok(issue)
    }

    /// Delete an issue and its comments
    pub async fn delete_issue(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
    ) -> ManagerResult<()> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Issue {
                project_id,
                issue_id,
            },
        )
        .await?;
        let issue = scoped(scope.issue(), "Issue")?;

        issues::delete_issue(&mut tx, issue.id).await?;
        tx.commit().await?;

        info!("Deleted issue '{}' (ID: {})", issue.title, issue.id);
        Ok(())
    }
}
