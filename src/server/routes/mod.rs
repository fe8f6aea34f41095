use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::db::queries::categories::get_all_categories;
use crate::server::error::ApiError;

mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub const QUESTIONS_PER_PAGE: i64 = 10;

// serde_json renders the integer keys as strings, so this comes out as
// {"1": "Science", ...} with the ids in order
async fn category_map(pool: &SqlitePool) -> Result<BTreeMap<i64, String>, ApiError> {
    let categories = get_all_categories(pool).await?;
    Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
}
