//! Conversation tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::therapy::DEFAULT_HISTORY_WINDOW;

#[derive(Debug, Clone, Deserialize)]
pub struct TherapyConfig {
    /// Most recent turns sent to the model
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Also escalate when the caller's own words contain crisis language
    #[serde(default)]
    pub scan_caller_utterance: bool,
}

impl TherapyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow);
        }
        Ok(())
    }
}

impl Default for TherapyConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            scan_caller_utterance: false,
        }
    }
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_therapy_defaults() {
        let config = TherapyConfig::default();
        assert_eq!(config.history_window, 10);
        assert!(!config.scan_caller_utterance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let config = TherapyConfig {
            history_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
