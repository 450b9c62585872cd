// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::gemini::{GeminiClient, GenerationConfig, UpstreamError};
use crate::services::relay::ChatRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self { relay }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, UpstreamError> {
        let client = GeminiClient::new(
            cfg.gemini_base_url.clone(),
            cfg.gemini_model.clone(),
            GenerationConfig {
                temperature: cfg.temperature,
                max_output_tokens: cfg.max_output_tokens,
            },
            cfg.upstream_timeout,
        )?;
        Ok(Self::new(ChatRelay::new(client, cfg.gemini_api_key.clone())))
    }
}
