//! Call session repository port (write side).
//!
//! Sessions are keyed by the identifier the telephony provider assigns to
//! the call. Implementations must make `get_or_create` safe against
//! duplicate webhook deliveries.

use crate::domain::call::CallSession;
use crate::domain::foundation::{CallSessionId, DomainError, PhoneNumber};
use async_trait::async_trait;

/// Repository port for CallSession persistence.
#[async_trait]
pub trait CallSessionRepository: Send + Sync {
    /// Returns the stored session for `id`, creating it in the greeting
    /// stage if absent. The boolean is true when a row was created.
    ///
    /// The caller number of an existing session is never changed.
    async fn get_or_create(
        &self,
        id: &CallSessionId,
        caller_number: &PhoneNumber,
    ) -> Result<(CallSession, bool), DomainError>;

    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `SessionAlreadyExists` if the identifier is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, session: &CallSession) -> Result<(), DomainError>;

    /// Overwrite a session's mutable fields. The crisis flag is only ever
    /// raised by an update, never cleared.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &CallSession) -> Result<(), DomainError>;

    /// Find a session by its identifier.
    async fn find_by_id(&self, id: &CallSessionId) -> Result<Option<CallSession>, DomainError>;

    /// All sessions, newest first.
    async fn list(&self) -> Result<Vec<CallSession>, DomainError>;
}
