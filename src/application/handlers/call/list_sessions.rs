//! ListSessionsHandler - Query handler for the session dashboard.

use std::sync::Arc;

use crate::domain::call::{CallError, CallSession};
use crate::ports::CallSessionRepository;

/// Query for all sessions, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListSessionsQuery;

pub struct ListSessionsHandler {
    sessions: Arc<dyn CallSessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(sessions: Arc<dyn CallSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, _query: ListSessionsQuery) -> Result<Vec<CallSession>, CallError> {
        Ok(self.sessions.list().await?)
    }
}
