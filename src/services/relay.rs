// src/services/relay.rs

use tracing::{debug, info};

use crate::error::{AppError, CREDENTIAL_MISSING, MESSAGE_REQUIRED};
use crate::message::{ChatRequest, ChatResponse};
use crate::services::gemini::GeminiClient;
use crate::services::prompt::build_prompt;

#[derive(Debug, Clone)]
pub struct ChatRelay {
    client: GeminiClient,
    api_key: Option<String>,
}

impl ChatRelay {
    pub fn new(client: GeminiClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Body checks run in order: message first, then credential. Neither
    /// failure makes an outbound call.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::BadRequest(MESSAGE_REQUIRED.to_string()))?;

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured(CREDENTIAL_MISSING.to_string()))?;

        let prompt = build_prompt(message, request.context.as_ref());
        debug!(
            prompt_len = prompt.len(),
            has_context = request.context.is_some(),
            "forwarding chat message"
        );

        let response = self.client.generate(api_key, &prompt).await?;
        info!(response_len = response.len(), "chat response generated");

        Ok(ChatResponse { response })
    }
}
