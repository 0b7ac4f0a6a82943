// ABOUTME: User account storage
// ABOUTME: Registration, lookup, profile updates, and account deletion

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::debug;

use tracker_core::{User, UserCreateInput, UserUpdateInput};

use crate::{StorageError, StorageResult};

pub async fn insert_user(conn: &mut SqliteConnection, input: &UserCreateInput) -> StorageResult<User> {
    debug!("Creating user: {}", input.username);

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO users (
            username, email, first_name, last_name, date_of_birth,
            can_be_contacted, can_data_be_shared, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(input.username.trim())
    .bind(input.email.trim())
    .bind(input.first_name.as_deref().unwrap_or_default())
    .bind(input.last_name.as_deref().unwrap_or_default())
    .bind(input.date_of_birth)
    .bind(input.can_be_contacted.unwrap_or(false))
    .bind(input.can_data_be_shared.unwrap_or(false))
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await
    .map_err(StorageError::from_write)?;

    get_user(conn, id)
        .await?
        .ok_or(StorageError::NotFound("User"))
}

pub async fn get_user(conn: &mut SqliteConnection, user_id: i64) -> StorageResult<Option<User>> {
    debug!("Fetching user: {}", user_id);

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}

pub async fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    input: &UserUpdateInput,
) -> StorageResult<User> {
    debug!("Updating user: {}", user_id);

    // Column names are literals; values go through push_bind
    let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
    let mut separated = query_builder.separated(", ");
    let mut has_updates = false;

    if let Some(ref username) = input.username {
        separated.push("username = ").push_bind_unseparated(username.trim().to_string());
        has_updates = true;
    }
    if let Some(ref email) = input.email {
        separated.push("email = ").push_bind_unseparated(email.trim().to_string());
        has_updates = true;
    }
    if let Some(ref first_name) = input.first_name {
        separated.push("first_name = ").push_bind_unseparated(first_name.clone());
        has_updates = true;
    }
    if let Some(ref last_name) = input.last_name {
        separated.push("last_name = ").push_bind_unseparated(last_name.clone());
        has_updates = true;
    }
    if let Some(date_of_birth) = input.date_of_birth {
        separated.push("date_of_birth = ").push_bind_unseparated(date_of_birth);
        has_updates = true;
    }
    if let Some(can_be_contacted) = input.can_be_contacted {
        separated.push("can_be_contacted = ").push_bind_unseparated(can_be_contacted);
        has_updates = true;
    }
    if let Some(can_data_be_shared) = input.can_data_be_shared {
        separated.push("can_data_be_shared = ").push_bind_unseparated(can_data_be_shared);
        has_updates = true;
    }

    if has_updates {
        query_builder.push(" WHERE id = ").push_bind(user_id);
        query_builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(StorageError::from_write)?;
    }

    get_user(conn, user_id)
        .await?
        .ok_or(StorageError::NotFound("User"))
}

/// Delete a user; their projects, issues, comments, and memberships cascade
pub async fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> StorageResult<()> {
    debug!("Deleting user: {}", user_id);

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound("User"));
    }
    Ok(())
}
