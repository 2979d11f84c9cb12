//! StartCallHandler - answers the provider's call-start webhook.

use std::sync::Arc;

use crate::domain::foundation::{CallSessionId, PhoneNumber};
use crate::domain::therapy::WELCOME_PROMPT;
use crate::ports::CallSessionRepository;

use super::{VoiceCallError, VoiceReply};

/// Identifiers extracted from the call-start webhook.
#[derive(Debug, Clone, Default)]
pub struct StartCallCommand {
    pub session_id: Option<String>,
    pub caller_number: Option<String>,
}

/// Handler for the first webhook of a call.
pub struct StartCallHandler {
    sessions: Arc<dyn CallSessionRepository>,
}

impl StartCallHandler {
    pub fn new(sessions: Arc<dyn CallSessionRepository>) -> Self {
        Self { sessions }
    }

    /// Gets or creates the session and asks the caller to speak.
    ///
    /// A repeated delivery for the same call finds the existing session and
    /// answers with the same welcome.
    pub async fn handle(&self, cmd: StartCallCommand) -> Result<VoiceReply, VoiceCallError> {
        let session_id = cmd
            .session_id
            .as_deref()
            .map(CallSessionId::new)
            .transpose()
            .map_err(|e| VoiceCallError::MissingIdentifiers(e.to_string()))?;
        let caller_number = cmd
            .caller_number
            .as_deref()
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|e| VoiceCallError::MissingIdentifiers(e.to_string()))?;

        let (session_id, caller_number) = match (session_id, caller_number) {
            (Some(id), Some(number)) => (id, number),
            _ => {
                tracing::warn!("Call start without session id or caller number");
                return Err(VoiceCallError::MissingIdentifiers(
                    "sessionId and callerNumber are required".to_string(),
                ));
            }
        };

        let (session, created) = self
            .sessions
            .get_or_create(&session_id, &caller_number)
            .await
            .map_err(|e| {
                tracing::error!(session_id = %session_id, error = %e, "Failed to open call session");
                VoiceCallError::CallStartFailed(e.to_string())
            })?;

        tracing::info!(
            session_id = %session.session_id(),
            caller = %session.caller_number().masked(),
            created,
            stage = %session.stage(),
            "Call started"
        );

        Ok(VoiceReply::Record(WELCOME_PROMPT.to_string()))
    }
}
