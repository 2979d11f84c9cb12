//! Telephony provider configuration (Africa's Talking)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// Account username
    #[serde(default = "default_username")]
    pub username: String,

    /// API key; outbound calls are unavailable without it
    pub api_key: Option<String>,

    /// Caller id for outbound calls
    pub voice_number: Option<String>,

    /// Voice API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Synthesized voice used for spoken prompts
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Longest caller recording, in seconds
    #[serde(default = "default_record_max_length")]
    pub record_max_length_secs: u32,

    /// Budget for transcribing one recording, in seconds
    #[serde(default = "default_transcription_timeout")]
    pub transcription_timeout_secs: u64,
}

impl TelephonyConfig {
    pub fn transcription_timeout(&self) -> Duration {
        Duration::from_secs(self.transcription_timeout_secs)
    }

    /// Check if outbound calls can be placed
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TELEPHONY_USERNAME"));
        }
        if self.has_api_key() && self.voice_number.as_ref().map_or(true, |n| n.trim().is_empty()) {
            return Err(ValidationError::MissingVoiceNumber);
        }
        if self.record_max_length_secs == 0 || self.record_max_length_secs > 3600 {
            return Err(ValidationError::InvalidRecordLength);
        }
        if self.transcription_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            api_key: None,
            voice_number: None,
            base_url: default_base_url(),
            voice: default_voice(),
            record_max_length_secs: default_record_max_length(),
            transcription_timeout_secs: default_transcription_timeout(),
        }
    }
}

fn default_username() -> String {
    "sandbox".to_string()
}

fn default_base_url() -> String {
    "https://voice.africastalking.com".to_string()
}

fn default_voice() -> String {
    "woman".to_string()
}

fn default_record_max_length() -> u32 {
    30
}

fn default_transcription_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telephony_defaults() {
        let config = TelephonyConfig::default();
        assert_eq!(config.username, "sandbox");
        assert_eq!(config.voice, "woman");
        assert_eq!(config.record_max_length_secs, 30);
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_key_requires_voice_number() {
        let config = TelephonyConfig {
            api_key: Some("atsk_test".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingVoiceNumber)
        ));

        let config = TelephonyConfig {
            voice_number: Some("+254711082000".to_string()),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_record_length_bounds() {
        let config = TelephonyConfig {
            record_max_length_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
