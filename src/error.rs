// src/error.rs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::message::ErrorMessage;
use crate::services::gemini::UpstreamError;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const CREDENTIAL_MISSING: &str = "Gemini API key not configured";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const UPSTREAM_TIMEOUT: &str = "AI service timed out";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("bad request: {0}")]
    BadRequest(String),

    /// The upstream credential is not configured.
    #[error("misconfigured: {0}")]
    Misconfigured(String),

    #[error(transparent)]
    Downstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Misconfigured(_) | AppError::Downstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the caller.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED.to_owned(),
            AppError::BadRequest(m) | AppError::Misconfigured(m) => m.clone(),
            AppError::Downstream(UpstreamError::Status { message, .. }) => message.clone(),
            AppError::Downstream(UpstreamError::Timeout) => UPSTREAM_TIMEOUT.to_owned(),
            AppError::Downstream(_) => INTERNAL_ERROR.to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MethodNotAllowed | AppError::BadRequest(_) => {
                warn!(error = %self, "rejected chat request");
            }
            AppError::Misconfigured(m) => error!(message = %m, "relay misconfigured"),
            AppError::Downstream(e) => error!(error = ?e, "AI upstream call failed"),
        }
        let body = ErrorMessage {
            error: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
