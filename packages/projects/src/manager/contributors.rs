// ABOUTME: Contributor (membership) operations on a project
// ABOUTME: Adding, reassigning, and removing members is reserved to the project author

use tracing::info;

use tracker_access::{check, membership, Action, ResourcePath};
use tracker_core::{Actor, ContributorDetail, ContributorInput};
use tracker_storage::contributors;

use super::{authenticate, scoped, ManagerError, ManagerResult, ProjectsManager};

impl ProjectsManager {
    pub async fn list_contributors(
        &self,
        actor: Actor,
        project_id: i64,
    ) -> ManagerResult<Vec<ContributorDetail>> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Contributors { project_id },
        )
        .await?;

        Ok(contributors::list_contributors(&mut tx, project_id).await?)
    }

    pub async fn add_contributor(
        &self,
        actor: Actor,
        project_id: i64,
        input: ContributorInput,
    ) -> ManagerResult<ContributorDetail> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Create,
            ResourcePath::Contributors { project_id },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;

        let contributor = membership::add_contributor(&mut tx, &project, input.user_id).await?;
        let detail = contributors::get_contributor_detail(&mut tx, contributor.id)
            .await?
            .ok_or(ManagerError::not_found("Contributor"))?;
        tx.commit().await?;

        info!(
            "User '{}' now contributes to project '{}'",
            detail.username, project.name
        );
        Ok(detail)
    }

    pub async fn get_contributor(
        &self,
        actor: Actor,
        project_id: i64,
        contributor_id: i64,
    ) -> ManagerResult<ContributorDetail> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Contributor {
                project_id,
                contributor_id,
            },
        )
        .await?;

        contributors::get_contributor_detail(&mut tx, contributor_id)
            .await?
            .ok_or(ManagerError::not_found("Contributor"))
    }

    /// Rebind a membership row to the user named in `input`
    pub async fn reassign_contributor(
        &self,
        actor: Actor,
        project_id: i64,
        contributor_id: i64,
        input: ContributorInput,
    ) -> ManagerResult<ContributorDetail> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Contributor {
                project_id,
                contributor_id,
            },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;
        let contributor = scoped(scope.contributor(), "Contributor")?;

        let updated =
            membership::reassign_contributor(&mut tx, &project, &contributor, input.user_id)
                .await?;
        let detail = contributors::get_contributor_detail(&mut tx, updated.id)
            .await?
            .ok_or(ManagerError::not_found("Contributor"))?;
        tx.commit().await?;

        Ok(detail)
    }

    pub async fn remove_contributor(
        &self,
        actor: Actor,
        project_id: i64,
        contributor_id: i64,
    ) -> ManagerResult<()> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Contributor {
                project_id,
                contributor_id,
            },
        )
        .await?;
        let project = scoped(scope.project(), "Project")?;
        let contributor = scoped(scope.contributor(), "Contributor")?;

        membership::remove_contributor(&mut tx, &project, &contributor).await?;
        tx.commit().await?;

        Ok(())
    }
}
