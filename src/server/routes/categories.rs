use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::queries::{categories::get_category, questions::get_questions_for_category},
    server::{
        app::AppState,
        error::{ApiError, Json, JsonResult},
    },
};

use super::category_map;

async fn get_categories(State(pool): State<SqlitePool>) -> JsonResult<Value> {
    let categories = category_map(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "categories": categories })))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> JsonResult<Value> {
    let category = get_category(&pool, id).await?;
    let questions = get_questions_for_category(&pool, id).await?;
    let total = questions.len();
    Ok(Json(json!({
        "questions": questions,
        "total_questions": total,
        "current_category": category.name,
    })))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
