#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use newsroom::{NewArticle, NewUser};
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    newsroom::init_memory_db()
        .await
        .expect("in-memory database should open")
}

pub fn datetime(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(h, m, s))
        .expect("valid date")
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        password: "not-a-real-hash".to_string(),
        created_at: None,
    }
}

pub fn new_article(title: &str, category_id: Option<i64>) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        content: "Body text".to_string(),
        author: "Staff".to_string(),
        published_date: datetime(2024, 1, 1, 0, 0, 0),
        source: None,
        category_id,
        image_url: None,
    }
}
