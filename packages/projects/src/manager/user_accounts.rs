// ABOUTME: User registration and profile management
// ABOUTME: Registration is open to anonymous actors; every other operation acts on the caller's own account

use tracing::info;

use tracker_core::{
    validate_user_create, validate_user_update, Actor, UserCreateInput, UserProfile,
    UserUpdateInput,
};
use tracker_storage::{users, StorageError};

use super::{authenticate, today, ManagerError, ManagerResult, ProjectsManager};

fn duplicate_account(err: StorageError) -> ManagerError {
    if err.violates("users.username") {
        ManagerError::validation("username", "A user with that username already exists.")
    } else if err.violates("users.email") {
        ManagerError::validation("email", "A user with that email already exists.")
    } else {
        ManagerError::Storage(err)
    }
}

impl ProjectsManager {
    /// Register a new account
    pub async fn register(&self, input: UserCreateInput) -> ManagerResult<UserProfile> {
        validate_user_create(&input, today())?;

        let mut tx = self.begin_write().await?;
        let user = users::insert_user(&mut tx, &input)
            .await
            .map_err(duplicate_account)?;
        tx.commit().await?;

        info!("Registered user '{}' with ID {}", user.username, user.id);
        Ok(user.into())
    }

    pub async fn profile(&self, actor: Actor) -> ManagerResult<UserProfile> {
        let mut conn = self.pool.acquire().await?;
        let user = authenticate(&mut conn, actor).await?;
        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        actor: Actor,
        input: UserUpdateInput,
    ) -> ManagerResult<UserProfile> {
        let mut tx = self.begin_write().await?;
        let user = authenticate(&mut tx, actor).await?;

        validate_user_update(&input, today())?;

        let user = users::update_user(&mut tx, user.id, &input)
            .await
            .map_err(duplicate_account)?;
        tx.commit().await?;

        info!("Updated profile of user {}", user.id);
        Ok(user.into())
    }

    /// Delete the caller's account together with everything it authored
    pub async fn delete_profile(&self, actor: Actor) -> ManagerResult<()> {
        let mut tx = self.begin_write().await?;
        let user = authenticate(&mut tx, actor).await?;

        users::delete_user(&mut tx, user.id).await?;
        tx.commit().await?;

        info!("Deleted user '{}' (ID: {})", user.username, user.id);
        Ok(())
    }

    /// Look up another account, e.g. to find a user id for contributor management
    pub async fn get_user(&self, actor: Actor, user_id: i64) -> ManagerResult<UserProfile> {
        let mut conn = self.pool.acquire().await?;
        authenticate(&mut conn, actor).await?;

        let user = users::get_user(&mut conn, user_id)
            .await?
            .ok_or(ManagerError::not_found("User"))?;
        Ok(user.into())
    }
}
