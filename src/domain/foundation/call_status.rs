//! CallStatus enum for tracking the lifecycle of a phone call session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of a call session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Active,
    /// The therapy sequence ran to the end.
    Completed,
    /// Crisis resources were given and the call was ended.
    Escalated,
}

impl CallStatus {
    /// Returns true while the call still accepts turns.
    pub fn is_active(&self) -> bool {
        matches!(self, CallStatus::Active)
    }

    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Active => "active",
            CallStatus::Completed => "completed",
            CallStatus::Escalated => "escalated",
        }
    }
}

impl StateMachine for CallStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CallStatus::*;
        matches!((self, target), (Active, Completed) | (Active, Escalated))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            CallStatus::Active => vec![CallStatus::Completed, CallStatus::Escalated],
            CallStatus::Completed | CallStatus::Escalated => vec![],
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CallStatus::Active),
            "completed" => Ok(CallStatus::Completed),
            "escalated" => Ok(CallStatus::Escalated),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown call status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(CallStatus::default(), CallStatus::Active);
    }

    #[test]
    fn only_active_accepts_turns() {
        assert!(CallStatus::Active.is_active());
        assert!(!CallStatus::Completed.is_active());
        assert!(!CallStatus::Escalated.is_active());
    }

    #[test]
    fn active_can_end_either_way() {
        assert!(CallStatus::Active.can_transition_to(&CallStatus::Completed));
        assert!(CallStatus::Active.can_transition_to(&CallStatus::Escalated));
    }

    #[test]
    fn ended_statuses_are_terminal() {
        assert!(CallStatus::Completed.is_terminal());
        assert!(CallStatus::Escalated.is_terminal());
        assert!(CallStatus::Completed
            .transition_to(CallStatus::Active)
            .is_err());
    }

    #[test]
    fn parses_storage_representation() {
        for status in [CallStatus::Active, CallStatus::Completed, CallStatus::Escalated] {
            assert_eq!(status.as_str().parse::<CallStatus>().unwrap(), status);
        }
        assert!("archived".parse::<CallStatus>().is_err());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CallStatus::Escalated).unwrap(),
            "\"escalated\""
        );
    }
}
