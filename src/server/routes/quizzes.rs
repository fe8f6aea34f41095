use std::collections::HashSet;

use axum::{extract::State, routing::post, Router};
use rand::seq::IteratorRandom;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::{get_all_questions, get_questions_for_category},
    server::{
        app::AppState,
        error::{ApiError, Json, JsonResult},
    },
    telemetry::QUIZ_QUESTION_CNTR,
};

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

// the frontend sends the id as a string, accept both encodings
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
}

async fn play_quiz(State(pool): State<SqlitePool>, Json(body): Json<QuizBody>) -> JsonResult<Value> {
    let (candidates, label) = match body.quiz_category {
        Some(QuizCategory { id: None }) => return Err(ApiError::NotFound),
        Some(QuizCategory { id: Some(0) }) | None => {
            (get_all_questions(&pool).await?, "all".to_string())
        }
        Some(QuizCategory { id: Some(id) }) => {
            (get_questions_for_category(&pool, id).await?, id.to_string())
        }
    };

    let seen: HashSet<i64> = body.previous_questions.into_iter().collect();
    let drawn = candidates
        .into_iter()
        .filter(|question| !seen.contains(&question.id))
        .choose(&mut rand::thread_rng());

    match drawn {
        Some(question) => {
            QUIZ_QUESTION_CNTR.with_label_values(&[&label]).inc();
            Ok(Json(json!({ "question": question })))
        }
        None => Ok(Json(json!({
            "success": true,
            "message": "No more questions available."
        }))),
    }
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
