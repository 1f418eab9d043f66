//! Completion service clients.
//!
//! The itinerary itself is written by an external model. Everything that
//! talks to it goes through [`CompletionProvider`] so the planner can run
//! against a fake in tests and offline demos.

mod fake;
mod gemini;

pub use fake::{FakeProvider, SAMPLE_RESPONSE};
pub use gemini::GeminiProvider;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ProviderKind, TripcalConfig};

/// Error type for completion calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to read response: {0}")]
    InvalidResponse(String),

    #[error("{}", rate_limit_text(.message, .retry_after_secs))]
    RateLimited {
        retry_after_secs: Option<u64>,
        message: String,
    },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

fn rate_limit_text(message: &str, retry_after_secs: &Option<u64>) -> String {
    let message = match message.trim() {
        "" => "Rate limited by the completion service",
        text => text,
    };
    match retry_after_secs {
        Some(secs) => format!("{} (retry after {} seconds)", message, secs),
        None => message.to_string(),
    }
}

impl ProviderError {
    /// The message worth showing to a user, if the failure carried one.
    pub fn service_message(&self) -> Option<String> {
        match self {
            ProviderError::ApiError { message, .. }
            | ProviderError::RequestFailed(message)
            | ProviderError::InvalidResponse(message)
                if message.trim().is_empty() =>
            {
                None
            }
            ProviderError::ApiError { message, .. } => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Input of a single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
}

/// A text completion service.
///
/// Implementations are stateless per call and safe to share between tasks.
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Send the request and return the model's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// e.g. "gemini", "fake"
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Build the provider selected in the configuration.
pub fn create_provider(
    config: &TripcalConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    match config.provider {
        ProviderKind::Fake => Ok(Arc::new(FakeProvider::default())),
        ProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    ProviderError::NotConfigured(
                        "GEMINI_API_KEY not set (or api_key in the config file)".to_string(),
                    )
                })?;
            Ok(Arc::new(GeminiProvider::new(api_key, config.model.clone())))
        }
    }
}
