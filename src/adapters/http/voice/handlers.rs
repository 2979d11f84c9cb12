//! HTTP handlers for the telephony webhooks.
//!
//! Every path answers 200 with an XML document; failures are spoken.
//! These routes sit outside the router's `TimeoutLayer`: a step that
//! overruns its deadline is answered with the step's apology instead.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::application::VoiceCallError;
use crate::adapters::telephony::{VoiceDocument, DEFAULT_RECORD_MAX_LENGTH, DEFAULT_VOICE};
use crate::application::handlers::voice::{
    ProcessRecordingCommand, ProcessRecordingHandler, StartCallCommand, StartCallHandler,
    VoiceReply,
};

use super::fields::WebhookFields;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// How replies are turned into provider markup.
#[derive(Debug, Clone)]
pub struct MarkupSettings {
    /// Where the provider posts finished recordings.
    pub recording_callback_url: String,
    pub voice: String,
    pub record_max_length: u32,
}

impl MarkupSettings {
    pub fn new(recording_callback_url: impl Into<String>) -> Self {
        Self {
            recording_callback_url: recording_callback_url.into(),
            voice: DEFAULT_VOICE.to_string(),
            record_max_length: DEFAULT_RECORD_MAX_LENGTH,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_record_max_length(mut self, secs: u32) -> Self {
        self.record_max_length = secs;
        self
    }

    pub fn document(&self, reply: VoiceReply) -> VoiceDocument {
        match reply {
            VoiceReply::Speak(text) => VoiceDocument::speak(text),
            VoiceReply::Record(prompt) => {
                VoiceDocument::record(prompt, self.recording_callback_url.clone())
                    .with_max_length(self.record_max_length)
            }
        }
    }
}

/// Time allowed for one webhook step when none is configured.
pub const DEFAULT_VOICE_DEADLINE: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct VoiceHandlers {
    start_call: Arc<StartCallHandler>,
    process_recording: Arc<ProcessRecordingHandler>,
    markup: MarkupSettings,
    deadline: Duration,
}

impl VoiceHandlers {
    pub fn new(
        start_call: Arc<StartCallHandler>,
        process_recording: Arc<ProcessRecordingHandler>,
        markup: MarkupSettings,
    ) -> Self {
        Self {
            start_call,
            process_recording,
            markup,
            deadline: DEFAULT_VOICE_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    fn respond(&self, reply: VoiceReply) -> Response {
        let document = self.markup.document(reply);
        tracing::debug!(document = document.kind(), "Voice response");
        xml_response(document.render(&self.markup.voice))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/voice/callback - First webhook of a call
pub async fn call_started(
    State(handlers): State<VoiceHandlers>,
    fields: WebhookFields,
) -> Response {
    let cmd = StartCallCommand {
        session_id: fields.session_id(),
        caller_number: fields.caller_number(),
    };

    let outcome = tokio::time::timeout(handlers.deadline, handlers.start_call.handle(cmd))
        .await
        .unwrap_or_else(|_| {
            Err(VoiceCallError::CallStartFailed(format!(
                "no answer within {}s",
                handlers.deadline.as_secs_f32()
            )))
        });
    let reply = match outcome {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Call start answered with apology");
            e.into_reply()
        }
    };
    handlers.respond(reply)
}

/// POST /api/voice/process-recording - A recording is ready
pub async fn recording_ready(
    State(handlers): State<VoiceHandlers>,
    fields: WebhookFields,
) -> Response {
    let cmd = ProcessRecordingCommand {
        session_id: fields.session_id(),
        recording_url: fields.recording_url(),
        transcription: fields.transcription(),
    };

    let outcome = tokio::time::timeout(handlers.deadline, handlers.process_recording.handle(cmd))
        .await
        .unwrap_or_else(|_| {
            Err(VoiceCallError::RecordingFailed(format!(
                "no answer within {}s",
                handlers.deadline.as_secs_f32()
            )))
        });
    let reply = match outcome {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Recording answered with apology");
            e.into_reply()
        }
    };
    handlers.respond(reply)
}

fn xml_response(xml: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_reply_uses_callback_and_length() {
        let settings = MarkupSettings::new("https://kalm.example.org/api/voice/process-recording")
            .with_record_max_length(45);

        match settings.document(VoiceReply::Record("Go on".into())) {
            VoiceDocument::Record {
                prompt,
                callback_url,
                max_length,
                ..
            } => {
                assert_eq!(prompt, "Go on");
                assert_eq!(callback_url, "https://kalm.example.org/api/voice/process-recording");
                assert_eq!(max_length, 45);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn speak_reply_ends_call() {
        let settings = MarkupSettings::new("https://kalm.example.org/cb");
        assert!(settings.document(VoiceReply::Speak("Bye".into())).ends_call());
    }

    #[test]
    fn xml_response_is_ok_with_xml_content_type() {
        let response = xml_response("<Response/>".to_string());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/xml"
        );
    }
}
