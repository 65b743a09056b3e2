use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use crate::{
    data_formats::NewTag,
    errors::StoreError,
    models::{Article, ArticleTag, Tag},
};

use super::{delete_by_id, expect_row};

// ----------------- Tag Queries -----------------

pub async fn insert_tag(pool: &SqlitePool, tag: &NewTag) -> Result<Tag, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        INSERT INTO tags (name, color)
        VALUES ($1, $2)
        RETURNING tag_id, name, color
        "#,
    )
    .bind(&tag.name)
    .bind(&tag.color)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    debug!(tag_id = result.id, "inserted tag");
    Ok(result)
}

pub async fn get_tag_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Tag>, StoreError> {
    let mut tx = pool.begin().await?;
    let result =
        sqlx::query_as::<Sqlite, Tag>("SELECT tag_id, name, color FROM tags WHERE tag_id = $1")
            .bind(id)
            .fetch_optional(&mut tx)
            .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>("SELECT tag_id, name, color FROM tags ORDER BY tag_id")
        .fetch_all(&mut tx)
        .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn update_tag(pool: &SqlitePool, tag: &Tag) -> Result<Tag, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        UPDATE tags SET name = $1, color = $2
        WHERE tag_id = $3
        RETURNING tag_id, name, color
        "#,
    )
    .bind(&tag.name)
    .bind(&tag.color)
    .bind(tag.id)
    .fetch_optional(&mut tx)
    .await?;
    let result = match result {
        Some(tag) => tag,
        None => return Err(StoreError::not_found("tag", tag.id)),
    };
    tx.commit().await?;
    debug!(tag_id = result.id, "updated tag");
    Ok(result)
}

pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    delete_by_id(pool, "DELETE FROM tags WHERE tag_id = $1", "tag", id).await
}

// ----------------- Article Tag Queries -----------------

/// Links an article to a tag. Both rows must exist and the pair must be new.
pub async fn tag_article(
    pool: &SqlitePool,
    article_id: i64,
    tag_id: i64,
) -> Result<ArticleTag, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, ArticleTag>(
        r#"
        INSERT INTO articles_tags (article_id, tag_id)
        VALUES ($1, $2)
        RETURNING article_id, tag_id
        "#,
    )
    .bind(article_id)
    .bind(tag_id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    debug!(article_id, tag_id, "tagged article");
    Ok(result)
}

pub async fn untag_article(pool: &SqlitePool, article_id: i64, tag_id: i64) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM articles_tags WHERE article_id = $1 AND tag_id = $2")
        .bind(article_id)
        .bind(tag_id)
        .execute(&mut tx)
        .await?;
    expect_row(result, "article_tag", format!("({article_id}, {tag_id})"))?;
    tx.commit().await?;
    debug!(article_id, tag_id, "untagged article");
    Ok(())
}

pub async fn list_article_tags(pool: &SqlitePool) -> Result<Vec<ArticleTag>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, ArticleTag>(
        "SELECT article_id, tag_id FROM articles_tags ORDER BY article_id, tag_id",
    )
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_tags_for_article(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Tag>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Tag>(
        r#"
        SELECT tags.tag_id, tags.name, tags.color
        FROM tags
            JOIN articles_tags ON articles_tags.tag_id = tags.tag_id
        WHERE articles_tags.article_id = $1
        ORDER BY tags.tag_id
        "#,
    )
    .bind(article_id)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}

pub async fn list_articles_for_tag(
    pool: &SqlitePool,
    tag_id: i64,
) -> Result<Vec<Article>, StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Article>(
        r#"
        SELECT articles.article_id, articles.title, articles.content, articles.author,
               articles.published_date, articles.source, articles.category_id, articles.image_url
        FROM articles
            JOIN articles_tags ON articles_tags.article_id = articles.article_id
        WHERE articles_tags.tag_id = $1
        ORDER BY articles.article_id
        "#,
    )
    .bind(tag_id)
    .fetch_all(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}
