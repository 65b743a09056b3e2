use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{data_formats::NewFavorite, errors::StoreError, models::Favorite};

use super::{delete_by_id, NOW};

const FAVORITE_COLUMNS: &str = "favorite_id, user_id, article_id, created_at";

/// Records a favorite. The same (user, article) pair may be favorited more than once.
pub async fn insert_favorite(
    pool: &SqlitePool,
    favorite: &NewFavorite,
) -> Result<Favorite, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        INSERT INTO favorites (user_id, article_id, created_at)
        VALUES ($1, $2, COALESCE($3, {NOW}))
        RETURNING {FAVORITE_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .bind(favorite.user_id)
        .bind(favorite.article_id)
        .bind(favorite.created_at)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    debug!(favorite_id = result.id, "inserted favorite");
    Ok(result)
}

pub async fn get_favorite_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Favorite>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {FAVORITE_COLUMNS} FROM favorites WHERE favorite_id = $1");
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .bind(id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_favorites(pool: &SqlitePool) -> Result<Vec<Favorite>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {FAVORITE_COLUMNS} FROM favorites ORDER BY favorite_id");
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_favorites_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Favorite>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE user_id = $1 ORDER BY favorite_id"
    );
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .bind(user_id)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_favorites_for_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Favorite>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        "SELECT {FAVORITE_COLUMNS} FROM favorites WHERE article_id = $1 ORDER BY favorite_id"
    );
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .bind(article_id)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn update_favorite(pool: &SqlitePool, favorite: &Favorite) -> Result<Favorite, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        UPDATE favorites SET user_id = $1, article_id = $2, created_at = $3
        WHERE favorite_id = $4
        RETURNING {FAVORITE_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Favorite>(&query)
        .bind(favorite.user_id)
        .bind(favorite.article_id)
        .bind(favorite.created_at)
        .bind(favorite.id)
        .fetch_optional(&mut tx)
        .await?;
    let result = match result {
        Some(favorite) => favorite,
        None => return Err(StoreError::not_found("favorite", favorite.id)),
    };
    tx.commit().await?;
    debug!(favorite_id = result.id, "updated favorite");
    Ok(result)
}

pub async fn delete_favorite(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(
        pool,
        "DELETE FROM favorites WHERE favorite_id = $1",
        "favorite",
        id,
    )
    .await
}
