//! Africa's Talking voice gateway.
//!
//! Places outbound calls through `POST {base_url}/call`. The provider then
//! calls back into the voice webhook, which drives the conversation.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::PhoneNumber;
use crate::ports::{OutboundCallResult, TelephonyError, VoiceGateway};

/// Configuration for the Africa's Talking gateway.
#[derive(Debug, Clone)]
pub struct AfricasTalkingConfig {
    pub username: String,
    api_key: Option<Secret<String>>,
    /// Caller id presented on outbound calls.
    pub voice_number: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl AfricasTalkingConfig {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: None,
            voice_number: None,
            base_url: "https://voice.africastalking.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_voice_number(mut self, number: impl Into<String>) -> Self {
        self.voice_number = Some(number.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct AfricasTalkingGateway {
    config: AfricasTalkingConfig,
    http_client: Client,
}

impl AfricasTalkingGateway {
    pub fn new(config: AfricasTalkingConfig) -> Result<Self, TelephonyError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TelephonyError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn call_url(&self) -> String {
        format!("{}/call", self.config.base_url.trim_end_matches('/'))
    }

    /// Credentials and caller id, or the reason they are unusable.
    fn credentials(&self) -> Result<(&str, &str), TelephonyError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| TelephonyError::NotConfigured("api_key is not set".to_string()))?;
        let from = self
            .config
            .voice_number
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| TelephonyError::NotConfigured("voice_number is not set".to_string()))?;
        Ok((api_key, from))
    }
}

#[async_trait]
impl VoiceGateway for AfricasTalkingGateway {
    async fn place_call(&self, to: &PhoneNumber) -> Result<OutboundCallResult, TelephonyError> {
        let (api_key, from) = self.credentials()?;

        let params = [
            ("username", self.config.username.as_str()),
            ("from", from),
            ("to", to.as_str()),
        ];

        let response = self
            .http_client
            .post(self.call_url())
            .header("apiKey", api_key)
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| TelephonyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Outbound call request failed");
            return Err(TelephonyError::Rejected {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let result: OutboundCallResult = response
            .json()
            .await
            .map_err(|e| TelephonyError::Parse(format!("Failed to parse call response: {}", e)))?;

        tracing::info!(
            to = %to.masked(),
            entries = result.entries.len(),
            "Outbound call requested"
        );
        Ok(result)
    }
}
