use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{data_formats::NewArticle, errors::StoreError, models::Article};

use super::delete_by_id;

const ARTICLE_COLUMNS: &str =
    "article_id, title, content, author, published_date, source, category_id, image_url";

pub async fn insert_article(pool: &SqlitePool, article: &NewArticle) -> Result<Article, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        INSERT INTO articles (title, content, author, published_date, source, category_id, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {ARTICLE_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.author)
        .bind(article.published_date)
        .bind(&article.source)
        .bind(article.category_id)
        .bind(&article.image_url)
        .fetch_one(&mut tx)
        .await?;
    tx.commit().await?;
    debug!(article_id = result.id, category_id = ?result.category_id, "inserted article");
    Ok(result)
}

pub async fn get_article_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Article>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE article_id = $1");
    let result = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(id)
        .fetch_optional(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_articles(pool: &SqlitePool) -> Result<Vec<Article>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY article_id");
    let result = sqlx::query_as::<Sqlite, Article>(&query)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

/// Articles filed under `category_id`, oldest id first.
pub async fn list_articles_in_category(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<Vec<Article>, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE category_id = $1 ORDER BY article_id"
    );
    let result = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(category_id)
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn update_article(pool: &SqlitePool, article: &Article) -> Result<Article, StoreError> {
    let mut tx = pool.begin().await?;
    let query = format!(
        r#"
        UPDATE articles
        SET title = $1, content = $2, author = $3, published_date = $4,
            source = $5, category_id = $6, image_url = $7
        WHERE article_id = $8
        RETURNING {ARTICLE_COLUMNS}
        "#
    );
    let result = sqlx::query_as::<Sqlite, Article>(&query)
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.author)
        .bind(article.published_date)
        .bind(&article.source)
        .bind(article.category_id)
        .bind(&article.image_url)
        .bind(article.id)
        .fetch_optional(&mut tx)
        .await?;
    let result = match result {
        Some(article) => article,
        None => return Err(StoreError::not_found("article", article.id)),
    };
    tx.commit().await?;
    debug!(article_id = result.id, "updated article");
    Ok(result)
}

pub async fn delete_article(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(pool, "DELETE FROM articles WHERE article_id = $1", "article", id).await
}
