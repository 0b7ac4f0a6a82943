// ABOUTME: Project operations
// ABOUTME: Creation enrolls the author as first contributor in the same transaction

use tracing::info;

use tracker_access::{check, enforce_on_create, Action, ResourcePath};
use tracker_core::{
    validate_project_create, validate_project_update, Actor, Project, ProjectCreateInput,
    ProjectDetail, ProjectSummary, ProjectUpdateInput,
};
use tracker_storage::{contributors, issues, projects, users};

use super::{authenticate, scoped, ManagerError, ManagerResult, ProjectsManager};

impl ProjectsManager {
    /// Projects the actor contributes to
    pub async fn list_projects(&self, actor: Actor) -> ManagerResult<Vec<ProjectSummary>> {
        let mut tx = self.pool.begin().await?;
        let user = authenticate(&mut tx, actor).await?;
        check(&mut *tx, actor, Action::Read, ResourcePath::Projects).await?;

        let projects = projects::list_projects_for_user(&mut tx, user.id).await?;
        Ok(projects)
    }

    pub async fn create_project(
        &self,
        actor: Actor,
        input: ProjectCreateInput,
    ) -> ManagerResult<Project> {
        let mut tx = self.begin_write().await?;
        let user = authenticate(&mut tx, actor).await?;
        check(&mut *tx, actor, Action::Create, ResourcePath::Projects).await?;

        validate_project_create(&input)?;

        let project = projects::insert_project(&mut tx, user.id, &input).await?;
        enforce_on_create(&mut tx, &project).await?;
        tx.commit().await?;

        info!("Created project '{}' with ID {}", project.name, project.id);
        Ok(project)
    }

    pub async fn get_project(&self, actor: Actor, project_id: i64) -> ManagerResult<ProjectDetail> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Project { project_id },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;

        let author = users::get_user(&mut tx, project.author_id)
            .await?
            .ok_or(ManagerError::not_found("User"))?;
        let contributors = contributors::list_contributors(&mut tx, project.id).await?;
        let issues = issues::list_issues(&mut tx, project.id).await?;

        Ok(ProjectDetail {
            project,
            author_name: author.username,
            contributors,
            issues,
        })
    }

    /// Partial update; absent fields are left unchanged
    pub async fn update_project(
        &self,
        actor: Actor,
        project_id: i64,
        input: ProjectUpdateInput,
    ) -> ManagerResult<Project> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Project { project_id },
        )
        .await?;

        validate_project_update(&input)?;

        let project = projects::update_project(&mut tx, project_id, &input).await?;
        tx.commit().await?;

        info!("Updated project '{}' (ID: {})", project.name, project.id);
        Ok(project)
    }

    /// Delete a project along with its contributors, issues, and comments
    pub async fn delete_project(&self, actor: Actor, project_id: i64) -> ManagerResult<()> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Project { project_id },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;

        projects::delete_project(&mut tx, project.id).await?;
        tx.commit().await?;

        info!("Deleted project '{}' (ID: {})", project.name, project.id);
        Ok(())
    }
}
