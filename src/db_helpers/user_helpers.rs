use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{data_formats::NewUser, errors::StoreError, models::User};

use super::{delete_by_id, NOW};

const USER_COLUMNS: &str = "user_id, first_name, last_name, email, password, created_at";

pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<User, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        INSERT INTO users (first_name, last_name, email, password, created_at)
        VALUES ($1, $2, $3, $4, COALESCE($5, {NOW}))
        RETURNING {USER_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    debug!(user_id = result.id, "inserted user");
    Ok(result)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(email)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

/// Replaces every column of the row identified by `user.id`.
pub async fn update_user(pool: &SqlitePool, user: &User) -> Result<User, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        UPDATE users
        SET first_name = $1, last_name = $2, email = $3, password = $4, created_at = $5
        WHERE user_id = $6
        RETURNING {USER_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.id)
        .fetch_optional(&mut tx)
        .await?;
    let result = match result {
        Some(user) => user,
        None => return Err(StoreError::not_found("user", user.id)),
    };
    tx.commit().await?;
    debug!(user_id = result.id, "updated user");
    Ok(result)
}

pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(pool, "DELETE FROM users WHERE user_id = $1", "user", id).await
}
