//! Query handlers for one session and its conversation.

use std::sync::Arc;

use crate::domain::call::{CallError, CallSession, Turn};
use crate::domain::foundation::CallSessionId;
use crate::ports::{CallSessionRepository, TurnRepository};

/// Query for a session with its turns.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: String,
}

/// A session and its ordered conversation.
#[derive(Debug, Clone)]
pub struct SessionDetail {
    pub session: CallSession,
    pub turns: Vec<Turn>,
}

pub struct GetSessionHandler {
    sessions: Arc<dyn CallSessionRepository>,
    turns: Arc<dyn TurnRepository>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn CallSessionRepository>, turns: Arc<dyn TurnRepository>) -> Self {
        Self { sessions, turns }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionDetail, CallError> {
        let session_id = CallSessionId::new(query.session_id)?;
        let session = self
            .sessions
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| CallError::not_found(session_id.clone()))?;
        let turns = self.turns.history(&session_id).await?;

        Ok(SessionDetail { session, turns })
    }
}

/// Query for a session's turns only.
#[derive(Debug, Clone)]
pub struct ListTurnsQuery {
    pub session_id: String,
}

pub struct ListTurnsHandler {
    sessions: Arc<dyn CallSessionRepository>,
    turns: Arc<dyn TurnRepository>,
}

impl ListTurnsHandler {
    pub fn new(sessions: Arc<dyn CallSessionRepository>, turns: Arc<dyn TurnRepository>) -> Self {
        Self { sessions, turns }
    }

    /// Turns in creation order; an unknown session is an error, not an
    /// empty list.
    pub async fn handle(&self, query: ListTurnsQuery) -> Result<Vec<Turn>, CallError> {
        let session_id = CallSessionId::new(query.session_id)?;
        if self.sessions.find_by_id(&session_id).await?.is_none() {
            return Err(CallError::not_found(session_id));
        }
        Ok(self.turns.history(&session_id).await?)
    }
}
