//! Therapy stage sequence.
//!
//! A call walks a fixed line: greeting, mood assessment, active therapy,
//! coping strategies, closing, completed. Nothing about the reply or the
//! caller's mood changes the path; each processed turn moves one step.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Named phase of the therapy conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TherapyStage {
    #[default]
    Greeting,
    MoodAssessment,
    ActiveTherapy,
    CopingStrategies,
    Closing,
    Completed,
}

impl TherapyStage {
    /// Every stage in sequence order.
    pub const ALL: [TherapyStage; 6] = [
        TherapyStage::Greeting,
        TherapyStage::MoodAssessment,
        TherapyStage::ActiveTherapy,
        TherapyStage::CopingStrategies,
        TherapyStage::Closing,
        TherapyStage::Completed,
    ];

    /// Storage/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TherapyStage::Greeting => "greeting",
            TherapyStage::MoodAssessment => "mood_assessment",
            TherapyStage::ActiveTherapy => "active_therapy",
            TherapyStage::CopingStrategies => "coping_strategies",
            TherapyStage::Closing => "closing",
            TherapyStage::Completed => "completed",
        }
    }

    /// The stage that follows this one; `Completed` maps to itself.
    pub fn next(&self) -> TherapyStage {
        self.successor().unwrap_or(*self)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TherapyStage::Completed)
    }
}

impl StateMachine for TherapyStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TherapyStage::*;
        match self {
            Greeting => vec![MoodAssessment],
            MoodAssessment => vec![ActiveTherapy],
            ActiveTherapy => vec![CopingStrategies],
            CopingStrategies => vec![Closing],
            Closing => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for TherapyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TherapyStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TherapyStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("therapy_stage", format!("unknown stage '{}'", s))
            })
    }
}

/// Maps a stage name to the name of the stage that follows it.
///
/// Total over arbitrary input: `completed` and unrecognized names come back
/// unchanged.
pub fn next_stage(current: &str) -> String {
    match current.parse::<TherapyStage>() {
        Ok(stage) => stage.next().as_str().to_string(),
        Err(_) => current.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn each_named_stage_has_documented_successor() {
        assert_eq!(next_stage("greeting"), "mood_assessment");
        assert_eq!(next_stage("mood_assessment"), "active_therapy");
        assert_eq!(next_stage("active_therapy"), "coping_strategies");
        assert_eq!(next_stage("coping_strategies"), "closing");
        assert_eq!(next_stage("closing"), "completed");
    }

    #[test]
    fn completed_is_terminal_and_idempotent() {
        assert_eq!(next_stage("completed"), "completed");
        assert!(TherapyStage::Completed.is_terminal());
        assert_eq!(TherapyStage::Completed.next(), TherapyStage::Completed);
    }

    #[test]
    fn unknown_stage_is_returned_unchanged() {
        assert_eq!(next_stage("intake"), "intake");
        assert_eq!(next_stage(""), "");
        assert_eq!(next_stage("Greeting"), "Greeting");
    }

    #[test]
    fn walking_the_sequence_reaches_completed_in_five_steps() {
        let mut stage = TherapyStage::default();
        for _ in 0..5 {
            stage = stage.next();
        }
        assert_eq!(stage, TherapyStage::Completed);
    }

    #[test]
    fn stage_names_round_trip() {
        for stage in TherapyStage::ALL {
            assert_eq!(stage.as_str().parse::<TherapyStage>().unwrap(), stage);
            assert_eq!(
                serde_json::to_string(&stage).unwrap(),
                format!("\"{}\"", stage.as_str())
            );
        }
    }

    proptest! {
        #[test]
        fn next_stage_never_invents_names(input in "\\PC{0,24}") {
            let out = next_stage(&input);
            match input.parse::<TherapyStage>() {
                Ok(stage) => prop_assert_eq!(out, stage.next().as_str()),
                Err(_) => prop_assert_eq!(out, input),
            }
        }
    }
}
