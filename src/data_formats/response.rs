//! Transport records: the flat, field-name-to-scalar form of every entity.
//!
//! Field names are part of the external contract and must not change. Records are
//! produced by [`ToRecord`], which is pure and never touches the store.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    errors::SerializeError,
    models::{Article, ArticleTag, Category, Comment, Favorite, Tag, User},
};

/// A flat record, keys in declaration order.
pub type Record = Map<String, Value>;

/// Calendar date and wall-clock time, no zone. Accepts an optional fraction of any
/// length when parsing.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const WHOLE_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MICROSECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Prints no fraction for whole seconds, otherwise exactly six digits of
/// microseconds. Anything finer than a microsecond is truncated.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    let format = if value.nanosecond() == 0 {
        WHOLE_SECONDS_FORMAT
    } else {
        MICROSECONDS_FORMAT
    };
    value.format(format).to_string()
}

pub fn parse_timestamp(value: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

fn required_timestamp(
    entity: &'static str,
    field: &'static str,
    value: Option<&NaiveDateTime>,
) -> Result<String, SerializeError> {
    value
        .map(format_timestamp)
        .ok_or(SerializeError::MissingField { entity, field })
}

pub trait ToRecord {
    type Output: Serialize;

    const ENTITY: &'static str;

    /// The typed record for this entity.
    fn record(&self) -> Result<Self::Output, SerializeError>;

    fn to_record(&self) -> Result<Record, SerializeError> {
        match serde_json::to_value(self.record()?)? {
            Value::Object(map) => Ok(map),
            _ => Err(SerializeError::NotARecord(Self::ENTITY)),
        }
    }

    /// Compact JSON text of the record.
    fn to_json(&self) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&self.record()?)?)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub article_id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_date: String,
    pub source: Option<String>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub tag_id: i64,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleTagRecord {
    pub article_id: i64,
    pub tag_id: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRecord {
    pub favorite_id: i64,
    pub user_id: Option<i64>,
    pub article_id: Option<i64>,
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub comment_id: i64,
    pub article_id: Option<i64>,
    pub user_id: Option<i64>,
    pub content: String,
    pub created_at: String,
}

// The password is never part of a user record.
impl ToRecord for User {
    type Output = UserRecord;
    const ENTITY: &'static str = "user";

    fn record(&self) -> Result<UserRecord, SerializeError> {
        Ok(UserRecord {
            user_id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            created_at: required_timestamp(Self::ENTITY, "created_at", self.created_at.as_ref())?,
        })
    }
}

impl ToRecord for Article {
    type Output = ArticleRecord;
    const ENTITY: &'static str = "article";

    fn record(&self) -> Result<ArticleRecord, SerializeError> {
        Ok(ArticleRecord {
            article_id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
            published_date: format_timestamp(&self.published_date),
            source: self.source.clone(),
            category_id: self.category_id,
            image_url: self.image_url.clone(),
        })
    }
}

impl ToRecord for Category {
    type Output = CategoryRecord;
    const ENTITY: &'static str = "category";

    fn record(&self) -> Result<CategoryRecord, SerializeError> {
        Ok(CategoryRecord {
            category_id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

impl ToRecord for Tag {
    type Output = TagRecord;
    const ENTITY: &'static str = "tag";

    fn record(&self) -> Result<TagRecord, SerializeError> {
        Ok(TagRecord {
            tag_id: self.id,
            name: self.name.clone(),
            color: self.color.clone(),
        })
    }
}

impl ToRecord for ArticleTag {
    type Output = ArticleTagRecord;
    const ENTITY: &'static str = "article_tag";

    fn record(&self) -> Result<ArticleTagRecord, SerializeError> {
        Ok(ArticleTagRecord {
            article_id: self.article_id,
            tag_id: self.tag_id,
        })
    }
}

impl ToRecord for Favorite {
    type Output = FavoriteRecord;
    const ENTITY: &'static str = "favorite";

    fn record(&self) -> Result<FavoriteRecord, SerializeError> {
        Ok(FavoriteRecord {
            favorite_id: self.id,
            user_id: self.user_id,
            article_id: self.article_id,
            created_at: required_timestamp(Self::ENTITY, "created_at", self.created_at.as_ref())?,
        })
    }
}

impl ToRecord for Comment {
    type Output = CommentRecord;
    const ENTITY: &'static str = "comment";

    fn record(&self) -> Result<CommentRecord, SerializeError> {
        Ok(CommentRecord {
            comment_id: self.id,
            article_id: self.article_id,
            user_id: self.user_id,
            content: self.content.clone(),
            created_at: required_timestamp(Self::ENTITY, "created_at", self.created_at.as_ref())?,
        })
    }
}
