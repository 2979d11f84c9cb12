//! ChatService - forwards one free-text message to the model.
//!
//! The XML, JSON and form chat endpoints are thin adapters over this.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is required")]
    EmptyMessage,

    #[error("AI service error: {0}")]
    Ai(#[from] AIError),
}

pub struct ChatService {
    ai_provider: Arc<dyn AIProvider>,
    timeout: Duration,
}

impl ChatService {
    pub fn new(ai_provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self {
            ai_provider,
            timeout,
        }
    }

    /// Sends `message` as a single user turn and returns the reply text.
    pub async fn forward(&self, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let request = CompletionRequest::new(RequestMetadata::detached())
            .with_message(MessageRole::User, message);
        let trace_id = request.metadata.trace_id.clone();

        let response = tokio::time::timeout(self.timeout, self.ai_provider.complete(request))
            .await
            .map_err(|_| AIError::Timeout {
                timeout_secs: self.timeout.as_secs() as u32,
            })
            .and_then(|result| result)
            .map_err(|e| {
                tracing::error!(trace_id = %trace_id, error = %e, "Chat completion failed");
                e
            })?;

        tracing::debug!(trace_id = %trace_id, model = %response.model, "Chat completion succeeded");
        Ok(response.content.trim().to_string())
    }
}
