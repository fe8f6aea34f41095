use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{self, get_all_questions, search_questions},
        Question,
    },
    server::{
        app::AppState,
        deserializers::deserialize_lenient_i64,
        error::{ApiError, Json, JsonResult},
    },
};

use super::{category_map, QUESTIONS_PER_PAGE};

const QUESTION_FIELDS: [&str; 4] = ["question", "answer", "category", "difficulty"];

#[derive(Deserialize)]
struct ListingParams {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    page: Option<i64>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    limit: Option<i64>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    category: Option<i64>,
}

fn page_slice(questions: &[Question], page: i64, limit: i64) -> &[Question] {
    if page < 1 || limit < 1 {
        return &[];
    }
    let start = match (page - 1).checked_mul(limit) {
        Some(start) => start,
        None => return &[],
    };
    if start >= questions.len() as i64 {
        return &[];
    }
    let end = start.saturating_add(limit).min(questions.len() as i64);
    &questions[start as usize..end as usize]
}

// null, false, zeroes and empty values all count as a missing field
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListingParams>,
) -> JsonResult<Value> {
    let questions = get_all_questions(&pool).await?;
    let total = questions.len();

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(QUESTIONS_PER_PAGE);
    let current = page_slice(&questions, page, limit);
    if current.is_empty() {
        return Err(ApiError::Unprocessable);
    }

    let categories = category_map(&pool).await?;
    Ok(Json(json!({
        "questions": current,
        "total_questions": total,
        "categories": categories,
        "current_category": params.category.unwrap_or(1),
    })))
}

// one endpoint, two payloads: four fields create a question, a lone
// searchTerm runs a substring search
async fn create_or_search(
    State(pool): State<SqlitePool>,
    Json(body): Json<Value>,
) -> JsonResult<Value> {
    let fields = body.as_object().ok_or(ApiError::BadRequest)?;
    match fields.len() {
        4 => create_question(&pool, fields).await,
        1 => search(&pool, fields).await,
        _ => Err(ApiError::BadRequest),
    }
}

async fn create_question(pool: &SqlitePool, fields: &Map<String, Value>) -> JsonResult<Value> {
    for field in QUESTION_FIELDS {
        if !truthy(fields.get(field)) {
            return Err(ApiError::Unprocessable);
        }
    }

    let question = fields["question"].as_str().ok_or(ApiError::InvalidSyntax)?;
    let answer = fields["answer"].as_str().ok_or(ApiError::InvalidSyntax)?;
    let category = fields["category"].as_i64().ok_or(ApiError::InvalidSyntax)?;
    let difficulty = fields["difficulty"]
        .as_i64()
        .ok_or(ApiError::InvalidSyntax)?;

    let id = questions::create_question(pool, question, answer, category, difficulty)
        .await
        .map_err(|error| {
            tracing::warn!("Question insert failed: {error}");
            ApiError::InvalidSyntax
        })?;

    Ok(Json(json!({ "success": true, "question_created": id })))
}

async fn search(pool: &SqlitePool, fields: &Map<String, Value>) -> JsonResult<Value> {
    let term = fields
        .get("searchTerm")
        .and_then(Value::as_str)
        .ok_or(ApiError::Unprocessable)?;
    let questions = search_questions(pool, term).await?;
    let total = questions.len();
    Ok(Json(json!({
        "questions": questions,
        "total_questions": total,
    })))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> JsonResult<Value> {
    questions::delete_question(&pool, id).await?;
    Ok(Json(json!({ "success": true, "question_deleted": id })))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
