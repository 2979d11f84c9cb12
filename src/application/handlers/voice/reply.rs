//! What a voice webhook answers with, before it is rendered as markup.

use crate::domain::foundation::CallSessionId;
use crate::domain::therapy::{
    BAD_RECORDING_APOLOGY, CALL_START_FAILURE_APOLOGY, MISSING_IDENTIFIERS_APOLOGY,
    RECORDING_FAILURE_APOLOGY, SESSION_NOT_FOUND_APOLOGY,
};

/// Next instruction for the telephony provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceReply {
    /// Say the text and end the call.
    Speak(String),
    /// Say the prompt, then record the caller and call back.
    Record(String),
}

impl VoiceReply {
    pub fn text(&self) -> &str {
        match self {
            VoiceReply::Speak(text) | VoiceReply::Record(text) => text,
        }
    }

    pub fn ends_call(&self) -> bool {
        matches!(self, VoiceReply::Speak(_))
    }
}

/// Failures of a voice webhook step. None of these reach the provider as
/// an HTTP error; each maps to a spoken apology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoiceCallError {
    #[error("missing call identifiers: {0}")]
    MissingIdentifiers(String),

    #[error("failed to start call: {0}")]
    CallStartFailed(String),

    #[error("invalid recording callback: {0}")]
    InvalidRecording(String),

    #[error("session not found: {0}")]
    SessionNotFound(CallSessionId),

    #[error("failed to process recording: {0}")]
    RecordingFailed(String),
}

impl VoiceCallError {
    /// Caller-facing text for this failure.
    pub fn apology(&self) -> &'static str {
        match self {
            VoiceCallError::MissingIdentifiers(_) => MISSING_IDENTIFIERS_APOLOGY,
            VoiceCallError::CallStartFailed(_) => CALL_START_FAILURE_APOLOGY,
            VoiceCallError::InvalidRecording(_) => BAD_RECORDING_APOLOGY,
            VoiceCallError::SessionNotFound(_) => SESSION_NOT_FOUND_APOLOGY,
            VoiceCallError::RecordingFailed(_) => RECORDING_FAILURE_APOLOGY,
        }
    }

    /// The apology as a call-ending reply.
    pub fn into_reply(self) -> VoiceReply {
        VoiceReply::Speak(self.apology().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_speak_ends_the_call() {
        assert!(VoiceReply::Speak("bye".into()).ends_call());
        assert!(!VoiceReply::Record("go on".into()).ends_call());
        assert_eq!(VoiceReply::Record("go on".into()).text(), "go on");
    }

    #[test]
    fn every_error_becomes_a_spoken_apology() {
        let errors = vec![
            VoiceCallError::MissingIdentifiers("sessionId".into()),
            VoiceCallError::CallStartFailed("db down".into()),
            VoiceCallError::InvalidRecording("no url".into()),
            VoiceCallError::SessionNotFound(CallSessionId::new("S9").unwrap()),
            VoiceCallError::RecordingFailed("db down".into()),
        ];

        for err in errors {
            let apology = err.apology();
            let reply = err.into_reply();
            assert!(reply.ends_call());
            assert_eq!(reply.text(), apology);
        }
    }

    #[test]
    fn unknown_session_asks_caller_to_call_back() {
        let err = VoiceCallError::SessionNotFound(CallSessionId::new("S9").unwrap());
        assert_eq!(err.apology(), SESSION_NOT_FOUND_APOLOGY);
        assert_eq!(err.to_string(), "session not found: S9");
    }
}
