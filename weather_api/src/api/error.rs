use crate::nws::NwsError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use thiserror::Error;
use tracing::{error, warn};

pub const USAGE_HINT: &str =
    "Missing or invalid lat/lon. Example: /api/weather/live?lat=36.9&lon=-76.3";

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nws_body: Option<Value>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid lat/lon")]
    InvalidCoordinate,
    #[error("unexpected response from NWS /points endpoint")]
    UnexpectedPoint(Value),
    #[error(transparent)]
    Nws(#[from] NwsError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidCoordinate => {
                warn!(name: "request.coordinate.invalid", "rejected request with missing or invalid lat/lon");
                ErrorMessage::from((StatusCode::BAD_REQUEST, USAGE_HINT)).into_response()
            }
            ApiError::UnexpectedPoint(payload) => ErrorMessage::from((
                StatusCode::BAD_GATEWAY,
                "Unexpected response from NWS /points endpoint",
            ))
            .with_details(payload)
            .into_response(),
            ApiError::Nws(e) => match e {
                NwsError::Status { status, url, body } => {
                    let details = format!("NWS HTTP {} for {url}", status.as_u16());
                    warn!(name: "nws.request.failed", status = status.as_u16(), url = %url, "NWS request failed");
                    let mut message =
                        ErrorMessage::from((StatusCode::BAD_GATEWAY, "NWS API request failed"))
                            .with_details(Value::String(details));
                    message.nws_body = Some(body);
                    message.into_response()
                }
                NwsError::Network { url, source } => {
                    warn!(name: "nws.request.unreachable", error = ?source, url = %url, "network error contacting NWS");
                    ErrorMessage::from((StatusCode::BAD_GATEWAY, "Network error contacting NWS"))
                        .with_details(Value::String(source.to_string()))
                        .into_response()
                }
                e @ NwsError::Decode { .. } => {
                    error!(name: "nws.response.undecodable", error = ?e, "could not decode NWS response");
                    server_error(e.to_string())
                }
            },
            ApiError::Internal(e) => {
                error!(name: "request.internal", error = %e, "internal server error");
                server_error(e)
            }
        }
    }
}

fn server_error(details: String) -> Response {
    ErrorMessage::from((StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        .with_details(Value::String(details))
        .into_response()
}

/// Turns a handler panic into the same JSON shape as every other unexpected fault.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(details).into_response()
}

impl ErrorMessage {
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, error): (StatusCode, String)) -> Self {
        Self {
            status_code,
            error,
            details: None,
            nws_body: None,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, error): (StatusCode, &str)) -> Self {
        Self::from((status_code, error.to_string()))
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
