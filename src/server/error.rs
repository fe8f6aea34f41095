use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Question or Category not found.")]
    NotFound,
    #[error("Incorrect amount of parameters in request.")]
    BadRequest,
    #[error("The request could not be processed.")]
    Unprocessable,
    #[error("Invalid syntax on new question parameters.")]
    InvalidSyntax,
    #[error("The request could not be processed.")]
    Database(#[source] sqlx::Error),
}

pub type JsonResult<T> = Result<Json<T>, ApiError>;

// axum's Json with the rejection routed through ApiError, so malformed
// bodies render the same envelope as everything else
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        let Json(value) = self;
        axum::Json(value).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidSyntax => StatusCode::PRECONDITION_FAILED,
            ApiError::Database(error) => {
                tracing::error!("Database error: {error}");
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };
        let body = axum::Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            error => ApiError::Database(error),
        }
    }
}

// type-level mismatches keep the unprocessable envelope, everything
// upstream of deserialization is a bad request
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable,
            _ => ApiError::BadRequest,
        }
    }
}
