//! Voice gateway port - outbound calls through the telephony provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::PhoneNumber;

#[async_trait]
pub trait VoiceGateway: Send + Sync {
    /// Ask the provider to dial `to` from the configured voice number.
    async fn place_call(&self, to: &PhoneNumber) -> Result<OutboundCallResult, TelephonyError>;
}

/// Provider answer to an outbound-call request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundCallResult {
    #[serde(default)]
    pub entries: Vec<OutboundCallEntry>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundCallEntry {
    pub phone_number: String,
    pub status: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TelephonyError {
    /// Credentials or caller id are missing from configuration.
    #[error("telephony not configured: {0}")]
    NotConfigured(String),

    /// The provider refused the request.
    #[error("provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),
}
