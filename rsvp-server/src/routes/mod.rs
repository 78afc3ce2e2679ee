pub mod events;
pub mod health;
pub mod rsvp;
pub mod user;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rsvp_core::RsvpError;
use serde::{Deserialize, Serialize};

/// Standard API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Convert domain errors to enveloped HTTP responses.
///
/// Internal failures are logged and answered with `fallback` so that
/// error details never reach the client.
pub struct AppError {
    error: RsvpError,
    fallback: &'static str,
}

impl AppError {
    /// Map errors from a handler, using `fallback` as the message for 500s.
    pub fn context(fallback: &'static str) -> impl Fn(RsvpError) -> AppError {
        move |error| AppError { error, fallback }
    }

    fn status(&self) -> StatusCode {
        match self.error {
            RsvpError::Validation(_) | RsvpError::DuplicateRsvp { .. } => StatusCode::BAD_REQUEST,
            RsvpError::EventNotFound(_) | RsvpError::RsvpNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.error {
            RsvpError::Validation(msg) => msg.clone(),
            RsvpError::DuplicateRsvp { .. } => "You have already RSVP'd to this event".to_string(),
            RsvpError::EventNotFound(_) => "Event not found".to_string(),
            RsvpError::RsvpNotFound(_) => "RSVP not found".to_string(),
            _ => self.fallback.to_string(),
        }
    }
}

impl From<RsvpError> for AppError {
    fn from(error: RsvpError) -> Self {
        AppError {
            error,
            fallback: "Internal server error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        RsvpError::Validation(format!("Invalid request body: {}", rejection.body_text())).into()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        RsvpError::Validation(format!("Invalid query string: {}", rejection.body_text())).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "{}", self.fallback);
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.error, "request rejected");
        }
        (status, Json(ApiResponse::<()>::error(self.message()))).into_response()
    }
}

/// Treat a missing or blank parameter as absent.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
