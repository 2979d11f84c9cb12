//! TherapyReplyGenerator - produces the assistant's next utterance.
//!
//! Model failures never escape: every error becomes one of two fixed
//! fallback utterances, with the stage left where it was.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::call::Turn;
use crate::domain::therapy::{
    contains_crisis_language, conversation_prompt, system_prompt, TherapyStage,
    BREATHING_FALLBACK, CLARIFYING_FALLBACK, DEFAULT_HISTORY_WINDOW,
};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Confidence attached to a model-generated reply.
pub const MODEL_REPLY_CONFIDENCE: f32 = 0.8;
/// Confidence attached to a fallback utterance.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Tuning for reply generation.
#[derive(Debug, Clone)]
pub struct ReplyGeneratorConfig {
    /// Most recent turns included in the prompt.
    pub history_window: usize,
    /// Upper bound on one model call, retries included.
    pub timeout: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for ReplyGeneratorConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            timeout: Duration::from_secs(15),
            temperature: 0.7,
            max_output_tokens: 256,
        }
    }
}

/// Outcome of one reply generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TherapyReply {
    pub text: String,
    pub crisis_detected: bool,
    pub next_stage: TherapyStage,
    /// Fixed placeholder, not a computed score.
    pub confidence: f32,
}

impl TherapyReply {
    fn fallback(text: &str, stage: TherapyStage) -> Self {
        Self {
            text: text.to_string(),
            crisis_detected: false,
            next_stage: stage,
            confidence: FALLBACK_CONFIDENCE,
        }
    }

    /// True when the text came from a fixed fallback rather than the model.
    pub fn is_fallback(&self) -> bool {
        self.confidence < MODEL_REPLY_CONFIDENCE
    }
}

/// Wraps the model call with the stage prompt, crisis scan and fallbacks.
pub struct TherapyReplyGenerator {
    ai_provider: Arc<dyn AIProvider>,
    config: ReplyGeneratorConfig,
}

impl TherapyReplyGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>, config: ReplyGeneratorConfig) -> Self {
        Self {
            ai_provider,
            config,
        }
    }

    /// Builds the exact prompt text sent for this history and stage.
    pub fn prompt(&self, history: &[Turn], stage: TherapyStage, mood: Option<&str>) -> String {
        conversation_prompt(
            &system_prompt(stage, mood),
            history,
            self.config.history_window,
        )
    }

    pub async fn get_reply(
        &self,
        history: &[Turn],
        stage: TherapyStage,
        mood: Option<&str>,
    ) -> TherapyReply {
        let metadata = match history.first() {
            Some(turn) => RequestMetadata::for_call(turn.session_id().clone()),
            None => RequestMetadata::detached(),
        };
        let request = CompletionRequest::new(metadata)
            .with_message(MessageRole::User, self.prompt(history, stage, mood))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_output_tokens);
        let trace_id = request.metadata.trace_id.clone();

        let outcome = match tokio::time::timeout(
            self.config.timeout,
            self.ai_provider.complete(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }),
        };

        match outcome {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    tracing::warn!(trace_id = %trace_id, stage = %stage, "Model returned blank text");
                    return TherapyReply::fallback(CLARIFYING_FALLBACK, stage);
                }

                let crisis_detected = contains_crisis_language(text);
                TherapyReply {
                    text: text.to_string(),
                    crisis_detected,
                    next_stage: stage.next(),
                    confidence: MODEL_REPLY_CONFIDENCE,
                }
            }
            Err(err) if err.is_unusable_output() => {
                tracing::warn!(trace_id = %trace_id, stage = %stage, error = %err, "Model output unusable");
                TherapyReply::fallback(CLARIFYING_FALLBACK, stage)
            }
            Err(err) => {
                tracing::error!(trace_id = %trace_id, stage = %stage, error = %err, "Model call failed");
                TherapyReply::fallback(BREATHING_FALLBACK, stage)
            }
        }
    }
}
