use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub const INVALID_BODY: &str = "Invalid request body";

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        let Json(request) = payload.map_err(|rejection| {
            debug!(reason = %rejection.body_text(), "unparsable chat body");
            AppError::BadRequest(INVALID_BODY.to_string())
        })?;

        state.relay.handle(request).await.map(Json)
    }
    .instrument(info_span!("chat", %request_id))
    .await
}

// Pre-flight: answered before any validation, whatever the body.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
