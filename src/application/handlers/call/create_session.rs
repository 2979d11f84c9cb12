//! CreateSessionHandler - Command handler for registering a session by hand.

use std::sync::Arc;

use crate::domain::call::{CallError, CallSession};
use crate::domain::foundation::{CallSessionId, ErrorCode, PhoneNumber};
use crate::ports::CallSessionRepository;

/// Command to create a session outside of a webhook.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub session_id: String,
    pub caller_number: String,
}

pub struct CreateSessionHandler {
    sessions: Arc<dyn CallSessionRepository>,
}

impl CreateSessionHandler {
    pub fn new(sessions: Arc<dyn CallSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<CallSession, CallError> {
        let session_id = CallSessionId::new(cmd.session_id)?;
        let caller_number = PhoneNumber::new(cmd.caller_number)?;

        let session = CallSession::new(session_id.clone(), caller_number);
        self.sessions.create(&session).await.map_err(|e| match e.code {
            ErrorCode::SessionAlreadyExists => CallError::already_exists(session_id.clone()),
            _ => e.into(),
        })?;

        tracing::info!(session_id = %session_id, "Session created");
        Ok(session)
    }
}
