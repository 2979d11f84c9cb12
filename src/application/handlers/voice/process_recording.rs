//! ProcessRecordingHandler - one conversational turn of a call.
//!
//! Flow per delivery:
//! 1. Resolve the session (unknown identifiers end the call)
//! 2. Obtain the caller's words, from the webhook or the transcriber
//! 3. Append the caller turn and tag the mood
//! 4. Generate the reply over the stored history
//! 5. Either escalate (crisis), finish (completed) or ask for more

use std::sync::Arc;

use crate::application::handlers::therapy::TherapyReplyGenerator;
use crate::domain::call::{CallSession, NewTurn};
use crate::domain::foundation::{CallSessionId, DomainError};
use crate::domain::therapy::{
    contains_crisis_language, detect_mood, with_continuation, CRISIS_RESOURCES,
    TRANSCRIPTION_PLACEHOLDER,
};
use crate::ports::{CallSessionRepository, Transcriber, TurnRepository};

use super::{VoiceCallError, VoiceReply};

/// Fields of the recording-ready webhook.
#[derive(Debug, Clone, Default)]
pub struct ProcessRecordingCommand {
    pub session_id: Option<String>,
    pub recording_url: Option<String>,
    /// Transcript supplied by the provider, if any.
    pub transcription: Option<String>,
}

/// Handler for the recording-ready webhook.
pub struct ProcessRecordingHandler {
    sessions: Arc<dyn CallSessionRepository>,
    turns: Arc<dyn TurnRepository>,
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<TherapyReplyGenerator>,
    /// Also treat crisis language in the caller's own words as a crisis.
    scan_caller_utterance: bool,
}

impl ProcessRecordingHandler {
    pub fn new(
        sessions: Arc<dyn CallSessionRepository>,
        turns: Arc<dyn TurnRepository>,
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<TherapyReplyGenerator>,
    ) -> Self {
        Self {
            sessions,
            turns,
            transcriber,
            generator,
            scan_caller_utterance: false,
        }
    }

    pub fn with_caller_scan(mut self, enabled: bool) -> Self {
        self.scan_caller_utterance = enabled;
        self
    }

    pub async fn handle(&self, cmd: ProcessRecordingCommand) -> Result<VoiceReply, VoiceCallError> {
        let session_id = cmd
            .session_id
            .as_deref()
            .map(CallSessionId::new)
            .transpose()
            .map_err(|e| VoiceCallError::InvalidRecording(e.to_string()))?
            .ok_or_else(|| VoiceCallError::InvalidRecording("sessionId is required".to_string()))?;

        let recording_url = non_blank(cmd.recording_url.as_deref());
        let provided_transcript = non_blank(cmd.transcription.as_deref());
        if recording_url.is_none() && provided_transcript.is_none() {
            tracing::warn!(session_id = %session_id, "Recording callback without audio or transcript");
            return Err(VoiceCallError::InvalidRecording(
                "recordingUrl is required".to_string(),
            ));
        }

        let mut session = self
            .sessions
            .find_by_id(&session_id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| {
                tracing::warn!(session_id = %session_id, "Recording for unknown session");
                VoiceCallError::SessionNotFound(session_id.clone())
            })?;

        let transcript = match provided_transcript {
            Some(text) => Some(text.to_string()),
            None => self.transcribe(&session_id, recording_url).await,
        };
        let utterance = transcript
            .clone()
            .unwrap_or_else(|| TRANSCRIPTION_PLACEHOLDER.to_string());

        self.turns
            .append(NewTurn::caller(
                session_id.clone(),
                utterance.clone(),
                transcript.clone(),
                recording_url.map(String::from),
            ))
            .await
            .map_err(store_failure)?;

        if let Some(text) = &transcript {
            session.record_mood(detect_mood(text));
        }

        let history = self.turns.history(&session_id).await.map_err(store_failure)?;
        let reply = self
            .generator
            .get_reply(&history, session.stage(), session.current_mood())
            .await;

        let caller_in_crisis = self.scan_caller_utterance
            && transcript.as_deref().map_or(false, contains_crisis_language);

        if reply.crisis_detected || caller_in_crisis {
            return self.escalate(session).await;
        }

        session.advance_to(reply.next_stage);
        self.turns
            .append(NewTurn::assistant(session_id.clone(), reply.text.clone()))
            .await
            .map_err(store_failure)?;
        self.sessions.update(&session).await.map_err(store_failure)?;

        tracing::info!(
            session_id = %session_id,
            stage = %session.stage(),
            mood = session.current_mood().unwrap_or("unknown"),
            fallback = reply.is_fallback(),
            "Turn processed"
        );

        if session.is_completed() {
            Ok(VoiceReply::Speak(reply.text))
        } else {
            Ok(VoiceReply::Record(with_continuation(&reply.text)))
        }
    }

    async fn transcribe(&self, session_id: &CallSessionId, recording_url: Option<&str>) -> Option<String> {
        let url = recording_url?;
        match self.transcriber.transcribe(url).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!(session_id = %session_id, "Transcription came back empty");
                None
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Transcription failed");
                None
            }
        }
    }

    async fn escalate(&self, mut session: CallSession) -> Result<VoiceReply, VoiceCallError> {
        session.escalate();
        self.turns
            .append(NewTurn::assistant(
                session.session_id().clone(),
                CRISIS_RESOURCES,
            ))
            .await
            .map_err(store_failure)?;
        self.sessions.update(&session).await.map_err(store_failure)?;

        tracing::warn!(
            session_id = %session.session_id(),
            crisis = true,
            "Crisis language detected, call escalated"
        );

        Ok(VoiceReply::Speak(CRISIS_RESOURCES.to_string()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn store_failure(err: DomainError) -> VoiceCallError {
    tracing::error!(error = %err, "Call store failure while processing recording");
    VoiceCallError::RecordingFailed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::memory::InMemoryCallStore;
    use crate::application::handlers::therapy::ReplyGeneratorConfig;
    use crate::domain::call::TurnRole;
    use crate::domain::foundation::{CallStatus, PhoneNumber};
    use crate::domain::therapy::{TherapyStage, BREATHING_FALLBACK, CONTINUATION_PROMPT};
    use crate::ports::TranscriptionError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockTranscriber {
        result: Result<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTranscriber {
        fn returning(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err("service down".to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transcriber for MockTranscriber {
        async fn transcribe(&self, audio_url: &str) -> Result<String, TranscriptionError> {
            self.calls.lock().unwrap().push(audio_url.to_string());
            self.result
                .clone()
                .map_err(TranscriptionError::Service)
        }
    }

    struct Fixture {
        store: Arc<InMemoryCallStore>,
        provider: MockAIProvider,
        transcriber: Arc<MockTranscriber>,
        handler: ProcessRecordingHandler,
    }

    async fn fixture(provider: MockAIProvider, transcriber: MockTranscriber) -> Fixture {
        let store = Arc::new(InMemoryCallStore::new());
        store
            .get_or_create(
                &CallSessionId::new("S1").unwrap(),
                &PhoneNumber::new("+254700000000").unwrap(),
            )
            .await
            .unwrap();

        let transcriber = Arc::new(transcriber);
        let generator = Arc::new(TherapyReplyGenerator::new(
            Arc::new(provider.clone()),
            ReplyGeneratorConfig::default(),
        ));
        let handler = ProcessRecordingHandler::new(
            store.clone(),
            store.clone(),
            transcriber.clone(),
            generator,
        );

        Fixture {
            store,
            provider,
            transcriber,
            handler,
        }
    }

    fn recording(transcription: Option<&str>) -> ProcessRecordingCommand {
        ProcessRecordingCommand {
            session_id: Some("S1".to_string()),
            recording_url: Some("https://media.example.org/rec1.mp3".to_string()),
            transcription: transcription.map(String::from),
        }
    }

    async fn session(store: &InMemoryCallStore) -> CallSession {
        store
            .find_by_id(&CallSessionId::new("S1").unwrap())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn first_turn_advances_stage_and_asks_for_more() {
        let fx = fixture(
            MockAIProvider::new().with_response("It sounds like a lot is on your mind."),
            MockTranscriber::returning("unused"),
        )
        .await;

        let reply = fx.handler.handle(recording(Some("I feel anxious"))).await.unwrap();

        assert_eq!(
            reply,
            VoiceReply::Record(format!(
                "It sounds like a lot is on your mind. {}",
                CONTINUATION_PROMPT
            ))
        );

        let session = session(&fx.store).await;
        assert_eq!(session.stage(), TherapyStage::MoodAssessment);
        assert_eq!(session.current_mood(), Some("anxious"));
        assert!(!session.crisis_flag());

        let history = fx.store.history(session.session_id()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role(), TurnRole::Caller);
        assert_eq!(history[0].content(), "I feel anxious");
        assert_eq!(history[0].transcription(), Some("I feel anxious"));
        assert_eq!(history[0].audio_url(), Some("https://media.example.org/rec1.mp3"));
        assert_eq!(history[1].role(), TurnRole::Assistant);
        assert_eq!(history[1].content(), "It sounds like a lot is on your mind.");

        assert!(fx.transcriber.calls().is_empty());
        assert!(fx.provider.last_prompt().unwrap().contains("Human: I feel anxious\n"));
    }

    #[tokio::test]
    async fn crisis_reply_escalates_and_ends_call() {
        let fx = fixture(
            MockAIProvider::new()
                .with_response("If you are thinking about suicide, please reach out for help."),
            MockTranscriber::returning("unused"),
        )
        .await;

        let reply = fx.handler.handle(recording(Some("everything is heavy"))).await.unwrap();

        assert_eq!(reply, VoiceReply::Speak(CRISIS_RESOURCES.to_string()));
        let session = session(&fx.store).await;
        assert!(session.crisis_flag());
        assert_eq!(session.status(), CallStatus::Escalated);
        assert_eq!(session.stage(), TherapyStage::Greeting);

        let history = fx.store.history(session.session_id()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content(), CRISIS_RESOURCES);
    }

    #[tokio::test]
    async fn caller_scan_is_off_by_default() {
        let fx = fixture(
            MockAIProvider::new().with_response("I'm here with you."),
            MockTranscriber::returning("unused"),
        )
        .await;

        let reply = fx
            .handler
            .handle(recording(Some("sometimes I want to end it all")))
            .await
            .unwrap();

        assert!(!reply.ends_call());
        assert!(!session(&fx.store).await.crisis_flag());
    }

    #[tokio::test]
    async fn caller_scan_escalates_on_callers_words() {
        let mut fx = fixture(
            MockAIProvider::new().with_response("I'm here with you."),
            MockTranscriber::returning("unused"),
        )
        .await;
        fx.handler = fx.handler.with_caller_scan(true);

        let reply = fx
            .handler
            .handle(recording(Some("sometimes I want to end it all")))
            .await
            .unwrap();

        assert_eq!(reply, VoiceReply::Speak(CRISIS_RESOURCES.to_string()));
        assert!(session(&fx.store).await.crisis_flag());
    }

    #[tokio::test]
    async fn closing_turn_completes_session_and_speaks_reply() {
        let fx = fixture(
            MockAIProvider::new().with_response("Take care of yourself. Goodbye."),
            MockTranscriber::returning("unused"),
        )
        .await;
        let mut closing = session(&fx.store).await;
        closing.advance_to(TherapyStage::Closing);
        fx.store.update(&closing).await.unwrap();

        let reply = fx.handler.handle(recording(Some("thank you"))).await.unwrap();

        assert_eq!(reply, VoiceReply::Speak("Take care of yourself. Goodbye.".to_string()));
        let session = session(&fx.store).await;
        assert!(session.is_completed());
        assert_eq!(session.stage(), TherapyStage::Completed);
        assert_eq!(session.status(), CallStatus::Completed);
        assert!(session.ended_at().is_some());
    }

    #[tokio::test]
    async fn transcriber_is_used_without_provided_transcript() {
        let fx = fixture(
            MockAIProvider::new().with_response("Tell me more."),
            MockTranscriber::returning("  I am so tired  "),
        )
        .await;

        fx.handler.handle(recording(None)).await.unwrap();

        assert_eq!(fx.transcriber.calls(), vec!["https://media.example.org/rec1.mp3"]);
        let history = fx.store.history(&CallSessionId::new("S1").unwrap()).await.unwrap();
        assert_eq!(history[0].content(), "I am so tired");
        assert_eq!(session(&fx.store).await.current_mood(), Some("tired"));
    }

    #[tokio::test]
    async fn failed_transcription_uses_placeholder() {
        let fx = fixture(
            MockAIProvider::new().with_response("Take your time."),
            MockTranscriber::failing(),
        )
        .await;

        let reply = fx.handler.handle(recording(None)).await.unwrap();

        assert!(!reply.ends_call());
        let history = fx.store.history(&CallSessionId::new("S1").unwrap()).await.unwrap();
        assert_eq!(history[0].content(), TRANSCRIPTION_PLACEHOLDER);
        assert_eq!(history[0].transcription(), None);
        assert_eq!(session(&fx.store).await.current_mood(), None);
    }

    #[tokio::test]
    async fn model_failure_falls_back_without_advancing() {
        let fx = fixture(
            MockAIProvider::new().with_error(MockError::Unavailable {
                message: "overloaded".to_string(),
            }),
            MockTranscriber::returning("unused"),
        )
        .await;

        let reply = fx.handler.handle(recording(Some("I feel sad"))).await.unwrap();

        assert_eq!(reply, VoiceReply::Record(with_continuation(BREATHING_FALLBACK)));
        let session = session(&fx.store).await;
        assert_eq!(session.stage(), TherapyStage::Greeting);
        assert!(!session.crisis_flag());
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let fx = fixture(MockAIProvider::new(), MockTranscriber::returning("unused")).await;

        let err = fx
            .handler
            .handle(ProcessRecordingCommand {
                session_id: Some("S404".to_string()),
                ..recording(Some("hello"))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, VoiceCallError::SessionNotFound(_)));
        assert_eq!(fx.store.turn_count().await, 0);
        assert_eq!(fx.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_fields_are_invalid() {
        let fx = fixture(MockAIProvider::new(), MockTranscriber::returning("unused")).await;

        let no_session = fx
            .handler
            .handle(ProcessRecordingCommand {
                session_id: None,
                ..recording(Some("hello"))
            })
            .await
            .unwrap_err();
        assert!(matches!(no_session, VoiceCallError::InvalidRecording(_)));

        let no_audio = fx
            .handler
            .handle(ProcessRecordingCommand {
                session_id: Some("S1".to_string()),
                recording_url: Some("  ".to_string()),
                transcription: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(no_audio, VoiceCallError::InvalidRecording(_)));
    }
}
