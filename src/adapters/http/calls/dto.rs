//! HTTP DTOs for the admin endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::call::SessionDetail;
use crate::domain::call::{CallError, CallSession, Turn};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a session by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub session_id: String,
    pub caller_number: String,
}

/// Request to place an outbound call.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateCallRequest {
    #[serde(rename = "callerNumber", alias = "caller_number")]
    pub caller_number: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub caller_number: String,
    pub status: String,
    pub therapy_stage: String,
    pub current_mood: Option<String>,
    pub crisis_flag: bool,
    pub is_completed: bool,
    pub created_at: String,
    pub ended_at: Option<String>,
}

impl From<&CallSession> for SessionResponse {
    fn from(session: &CallSession) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            caller_number: session.caller_number().to_string(),
            status: session.status().as_str().to_string(),
            therapy_stage: session.stage().as_str().to_string(),
            current_mood: session.current_mood().map(String::from),
            crisis_flag: session.crisis_flag(),
            is_completed: session.is_completed(),
            created_at: session.created_at().to_rfc3339(),
            ended_at: session.ended_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub transcription: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: String,
}

impl From<&Turn> for TurnResponse {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id().as_i64(),
            session_id: turn.session_id().to_string(),
            role: turn.role().as_str().to_string(),
            content: turn.content().to_string(),
            transcription: turn.transcription().map(String::from),
            audio_url: turn.audio_url().map(String::from),
            created_at: turn.created_at().to_rfc3339(),
        }
    }
}

/// A session with its conversation, oldest turn first.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub conversations: Vec<TurnResponse>,
}

impl From<SessionDetail> for SessionDetailResponse {
    fn from(detail: SessionDetail) -> Self {
        Self {
            session: SessionResponse::from(&detail.session),
            conversations: detail.turns.iter().map(TurnResponse::from).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&CallError> for ErrorResponse {
    fn from(error: &CallError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message(),
        }
    }
}
