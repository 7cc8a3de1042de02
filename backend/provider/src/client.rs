use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use thiserror::Error;
use tracing::debug;

use crate::payload::ProviderPayload;

/// Default messages endpoint for the hosted Claude backend.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Errors surfaced by a model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The invocation itself failed: nothing was streamed, the caller can
    /// still answer with a plain error response.
    #[error("{0}")]
    Invoke(String),

    /// The transport broke while the stream was already flowing.
    #[error("{0}")]
    Transport(String),
}

/// Raw frames from the provider's chunked response body. Each item is an
/// opaque byte frame that may carry zero or more newline-delimited JSON
/// events, or part of one.
pub type FrameStream = BoxStream<'static, Result<Bytes, ProviderError>>;

/// Seam between the relay and the model backend.
///
/// Injected into the gateway at construction rather than instantiated at
/// module load, so tests can substitute a scripted provider.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name as it should appear in error messages.
    fn name(&self) -> &str;

    /// Invoke the streaming chat API and return the raw frame stream.
    async fn stream_chat(&self, payload: &ProviderPayload) -> Result<FrameStream, ProviderError>;
}

/// Streaming Claude client.
///
/// Targets an invoke-style endpoint whose response body is a stream of
/// newline-delimited JSON event frames (`message_start`, `content_block_delta`,
/// ... as classified by [`crate::events::classify_frame_line`]).
pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point the client at a non-default endpoint (self-hosted relay, test
    /// server).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl ModelProvider for ClaudeClient {
    fn name(&self) -> &str {
        "Claude"
    }

    async fn stream_chat(&self, payload: &ProviderPayload) -> Result<FrameStream, ProviderError> {
        debug!(model = %payload.model, messages = payload.messages.len(), "invoking provider");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::Invoke(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Invoke(format!(
                "Claude API error {status}: {body}"
            )));
        }

        Ok(Box::pin(
            response
                .bytes_stream()
                .map_err(|e| ProviderError::Transport(e.to_string())),
        ))
    }
}
