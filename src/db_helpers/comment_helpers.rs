use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{data_formats::NewComment, errors::StoreError, models::Comment};

use super::{delete_by_id, NOW};

const COMMENT_COLUMNS: &str = "comment_id, article_id, user_id, content, created_at";

pub async fn insert_comment(pool: &SqlitePool, comment: &NewComment) -> Result<Comment, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        INSERT INTO comments (article_id, user_id, content, created_at)
        VALUES ($1, $2, $3, COALESCE($4, {NOW}))
        RETURNING {COMMENT_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(comment.article_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    debug!(comment_id = result.id, article_id = ?result.article_id, "inserted comment");
    Ok(result)
}

pub async fn get_comment_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1");
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_comments(pool: &SqlitePool) -> Result<Vec<Comment>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {COMMENT_COLUMNS} FROM comments ORDER BY comment_id");
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_comments_for_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE article_id = $1 ORDER BY comment_id"
    );
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(article_id)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_comments_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Comment>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = $1 ORDER BY comment_id"
    );
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(user_id)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn update_comment(pool: &SqlitePool, comment: &Comment) -> Result<Comment, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        UPDATE comments SET article_id = $1, user_id = $2, content = $3, created_at = $4
        WHERE comment_id = $5
        RETURNING {COMMENT_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Comment>(&query)
        .bind(comment.article_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.id)
        .fetch_optional(&mut tx)
        .await?;
    let result = match result {
        Some(comment) => comment,
        None => return Err(StoreError::not_found("comment", comment.id)),
    };
    tx.commit().await?;
    debug!(comment_id = result.id, "updated comment");
    Ok(result)
}

pub async fn delete_comment(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(pool, "DELETE FROM comments WHERE comment_id = $1", "comment", id).await
}
