//! Call session aggregate.
//!
//! One session per phone call, keyed by the provider's session identifier.
//! The session carries the therapy stage, the last detected mood, and the
//! crisis flag across webhook deliveries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CallSessionId, CallStatus, PhoneNumber, StateMachine, Timestamp};
use crate::domain::therapy::TherapyStage;

/// Persisted state of one phone call.
///
/// # Invariants
///
/// - `crisis_flag` is never cleared once set
/// - `is_completed` implies `stage == Completed`
/// - `ended_at` is set exactly when `status` leaves `Active`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSession {
    session_id: CallSessionId,
    caller_number: PhoneNumber,
    status: CallStatus,
    stage: TherapyStage,
    current_mood: Option<String>,
    crisis_flag: bool,
    is_completed: bool,
    created_at: Timestamp,
    ended_at: Option<Timestamp>,
}

impl CallSession {
    /// Starts a session in the greeting stage.
    pub fn new(session_id: CallSessionId, caller_number: PhoneNumber) -> Self {
        Self {
            session_id,
            caller_number,
            status: CallStatus::Active,
            stage: TherapyStage::Greeting,
            current_mood: None,
            crisis_flag: false,
            is_completed: false,
            created_at: Timestamp::now(),
            ended_at: None,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        session_id: CallSessionId,
        caller_number: PhoneNumber,
        status: CallStatus,
        stage: TherapyStage,
        current_mood: Option<String>,
        crisis_flag: bool,
        is_completed: bool,
        created_at: Timestamp,
        ended_at: Option<Timestamp>,
    ) -> Self {
        Self {
            session_id,
            caller_number,
            status,
            stage,
            current_mood,
            crisis_flag,
            is_completed,
            created_at,
            ended_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &CallSessionId {
        &self.session_id
    }

    pub fn caller_number(&self) -> &PhoneNumber {
        &self.caller_number
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn stage(&self) -> TherapyStage {
        self.stage
    }

    pub fn current_mood(&self) -> Option<&str> {
        self.current_mood.as_deref()
    }

    pub fn crisis_flag(&self) -> bool {
        self.crisis_flag
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Keeps the previous mood when nothing new was detected.
    pub fn record_mood(&mut self, mood: Option<&str>) {
        if let Some(mood) = mood {
            self.current_mood = Some(mood.to_string());
        }
    }

    /// Moves to `stage`; reaching `Completed` also completes the call.
    pub fn advance_to(&mut self, stage: TherapyStage) {
        self.stage = stage;
        if stage.is_completed() {
            self.complete();
        }
    }

    /// Marks the conversation finished.
    pub fn complete(&mut self) {
        self.stage = TherapyStage::Completed;
        self.is_completed = true;
        self.end_with(CallStatus::Completed);
    }

    /// Raises the crisis flag and ends the call as escalated.
    ///
    /// The stage is left where it was.
    pub fn escalate(&mut self) {
        self.crisis_flag = true;
        self.end_with(CallStatus::Escalated);
    }

    fn end_with(&mut self, status: CallStatus) {
        if self.status.can_transition_to(&status) {
            self.status = status;
            self.ended_at = Some(Timestamp::now());
        }
    }
}
