use crate::db::queries::QueryError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Serialize)]
pub struct ErrorMessage {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    QueryError(#[from] QueryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::QueryError(QueryError::Sql(e)) => {
                error!(name: "db.query.failed", error = ?e, "sql error");
                ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
                    .into_response()
            }
        }
    }
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, error): (StatusCode, String)) -> Self {
        Self { status_code, error }
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
