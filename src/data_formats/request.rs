use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Insert payloads. Ids are assigned by the store; a `created_at` left as `None`
// is filled with the current time at insert.

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: NaiveDateTime,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewTag {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewFavorite {
    pub user_id: Option<i64>,
    pub article_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewComment {
    #[serde(default)]
    pub article_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
