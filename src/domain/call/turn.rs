//! Conversation turns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CallSessionId, Timestamp, TurnId, ValidationError};

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Caller,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::Caller => "caller",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caller" => Ok(TurnRole::Caller),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A turn that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    pub session_id: CallSessionId,
    pub role: TurnRole,
    pub content: String,
    pub transcription: Option<String>,
    pub audio_url: Option<String>,
}

impl NewTurn {
    /// What the caller said, with the raw transcript and recording reference.
    pub fn caller(
        session_id: CallSessionId,
        content: impl Into<String>,
        transcription: Option<String>,
        audio_url: Option<String>,
    ) -> Self {
        Self {
            session_id,
            role: TurnRole::Caller,
            content: content.into(),
            transcription,
            audio_url,
        }
    }

    pub fn assistant(session_id: CallSessionId, content: impl Into<String>) -> Self {
        Self {
            session_id,
            role: TurnRole::Assistant,
            content: content.into(),
            transcription: None,
            audio_url: None,
        }
    }
}

/// One stored utterance. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    session_id: CallSessionId,
    role: TurnRole,
    content: String,
    transcription: Option<String>,
    audio_url: Option<String>,
    created_at: Timestamp,
}

impl Turn {
    /// Reconstitute a turn from persistence.
    pub fn reconstitute(
        id: TurnId,
        session_id: CallSessionId,
        role: TurnRole,
        content: String,
        transcription: Option<String>,
        audio_url: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            transcription,
            audio_url,
            created_at,
        }
    }

    /// Materializes a pending turn once the store has assigned an id.
    pub fn stored(id: TurnId, turn: NewTurn, created_at: Timestamp) -> Self {
        Self {
            id,
            session_id: turn.session_id,
            role: turn.role,
            content: turn.content,
            transcription: turn.transcription,
            audio_url: turn.audio_url,
            created_at,
        }
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn session_id(&self) -> &CallSessionId {
        &self.session_id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.audio_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
