use sqlx::{sqlite::SqliteQueryResult, SqlitePool};

use crate::errors::StoreError;

mod article_helpers;
mod category_helpers;
mod comment_helpers;
mod favorite_helpers;
mod tag_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use category_helpers::*;
pub use comment_helpers::*;
pub use favorite_helpers::*;
pub use tag_helpers::*;
pub use user_helpers::*;

/// Current UTC time in the layout sqlx binds `NaiveDateTime` with, used when the
/// caller leaves `created_at` unset.
pub(crate) const NOW: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

// ----------------- Helper Functions -----------------

/// Maps a write that touched no rows to `NotFound`.
fn expect_row(
    result: SqliteQueryResult,
    entity: &'static str,
    key: impl ToString,
) -> Result<(), StoreError> {
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(entity, key));
    }
    Ok(())
}

async fn delete_by_id(
    pool: &SqlitePool,
    query: &str,
    entity: &'static str,
    id: i64,
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(query).bind(id).execute(&mut tx).await?;
    expect_row(result, entity, id)?;
    tx.commit().await?;
    tracing::debug!(entity, id, "deleted row");
    Ok(())
}
