use std::fmt;

use chrono::NaiveDateTime;

// Row types as stored. Primary keys are named `id` here and `<entity>_id` in the tables.
// `created_at` is optional because the column only carries a default, not NOT NULL.

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Article {
    #[sqlx(rename = "article_id")]
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: NaiveDateTime,
    pub source: Option<String>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    #[sqlx(rename = "category_id")]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tag {
    #[sqlx(rename = "tag_id")]
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
}

/// Link between an article and a tag. The pair is the identity; there is no surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct ArticleTag {
    pub article_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Favorite {
    #[sqlx(rename = "favorite_id")]
    pub id: i64,
    pub user_id: Option<i64>,
    pub article_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Comment {
    #[sqlx(rename = "comment_id")]
    pub id: i64,
    pub article_id: Option<i64>,
    pub user_id: Option<i64>,
    pub content: String,
    pub created_at: Option<NaiveDateTime>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {} {}>", self.first_name, self.last_name)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Article {}>", self.title)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Category {}>", self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Tag {}>", self.name)
    }
}
