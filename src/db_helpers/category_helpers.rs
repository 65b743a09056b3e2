use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{data_formats::NewCategory, errors::StoreError, models::Category};

use super::delete_by_id;

pub async fn insert_category(
    pool: &SqlitePool,
    category: &NewCategory,
) -> Result<Category, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        r#"
        INSERT INTO categories (name, description)
        VALUES ($1, $2)
        RETURNING category_id, name, description
        "#,
    )
    .bind(&category.name)
    .bind(&category.description)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    debug!(category_id = result.id, "inserted category");
    Ok(result)
}

pub async fn get_category_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Category>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        "SELECT category_id, name, description FROM categories WHERE category_id = $1",
    )
    .bind(id)
    .fetch_optional(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        "SELECT category_id, name, description FROM categories ORDER BY category_id",
    )
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn update_category(
    pool: &SqlitePool,
    category: &Category,
) -> Result<Category, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Category>(
        r#"
        UPDATE categories SET name = $1, description = $2
        WHERE category_id = $3
        RETURNING category_id, name, description
        "#,
    )
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.id)
    .fetch_optional(&mut tx)
    .await?;
    let result = match result {
        Some(category) => category,
        None => return Err(StoreError::not_found("category", category.id)),
    };
    tx.commit().await?;
    debug!(category_id = result.id, "updated category");
    Ok(result)
}

/// Fails with a foreign key violation while articles still reference the category.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(
        pool,
        "DELETE FROM categories WHERE category_id = $1",
        "category",
        id,
    )
    .await
}
