// ABOUTME: Comment operations on an issue
// ABOUTME: Any contributor may comment; only a comment's author may edit or delete it

use tracing::info;

use tracker_access::{check, Action, ResourcePath};
use tracker_core::{validate_comment_input, Actor, CommentDetail, CommentInput};
use tracker_storage::comments;

use super::{authenticate, scoped, ManagerError, ManagerResult, ProjectsManager};

impl ProjectsManager {
    /// Comments of an issue, oldest first
    pub async fn list_comments(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
    ) -> ManagerResult<Vec<CommentDetail>> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Comments {
                project_id,
                issue_id,
            },
        )
        .await?;

        Ok(comments::list_comments(&mut tx, issue_id).await?)
    }

    pub async fn create_comment(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
        input: CommentInput,
    ) -> ManagerResult<CommentDetail> {
        let mut tx = self.begin_write().await?;
        let user = authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Create,
            ResourcePath::Comments {
                project_id,
                issue_id,
            },
        )
        .await?;

        validate_comment_input(&input)?;

        let comment =
            comments::insert_comment(&mut tx, issue_id, user.id, &input.description).await?;
        let detail = comments::get_comment_detail(&mut tx, &comment.uuid)
            .await?
            .ok_or(ManagerError::not_found("Comment"))?;
        tx.commit().await?;

        info!("Created comment {} on issue {}", detail.uuid, issue_id);
        Ok(detail)
    }

    pub async fn get_comment(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
        uuid: &str,
    ) -> ManagerResult<CommentDetail> {
        let mut tx = self.pool.begin().await?;
        authenticate(&mut tx, actor).await?;
        check(
            &mut *tx,
            actor,
            Action::Read,
            ResourcePath::Comment {
                project_id,
                issue_id,
                uuid: uuid.to_string(),
            },
        )
        .await?;

        comments::get_comment_detail(&mut tx, uuid)
            .await?
            .ok_or(ManagerError::not_found("Comment"))
    }

    pub async fn update_comment(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
        uuid: &str,
        input: CommentInput,
    ) -> ManagerResult<CommentDetail> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Comment {
                project_id,
                issue_id,
                uuid: uuid.to_string(),
            },
        )
        .await?;
        let comment = scoped(scope.comment(), "Comment")?;

        validate_comment_input(&input)?;

        comments::update_comment(&mut tx, &comment.uuid, &input.description).await?;
        let detail = comments::get_comment_detail(&mut tx, &comment.uuid)
            .await?
            .ok_or(ManagerError::not_found("Comment"))?;
        tx.commit().await?;

        info!("Updated comment {}", detail.uuid);
        Ok(detail)
    }

    pub async fn delete_comment(
        &self,
        actor: Actor,
        project_id: i64,
        issue_id: i64,
        uuid: &str,
    ) -> ManagerResult<()> {
        let mut tx = self.begin_write().await?;
        authenticate(&mut tx, actor).await?;
        let scope = check(
            &mut *tx,
            actor,
            Action::Mutate,
            ResourcePath::Comment {
                project_id,
                issue_id,
                uuid: uuid.to_string(),
            },
        )
        .await?;
        let comment = scoped(scope.comment(), "Comment")?;

        comments::delete_comment(&mut tx, &comment.uuid).await?;
        tx.commit().await?;

        info!("Deleted comment {}", comment.uuid);
        Ok(())
    }
}
