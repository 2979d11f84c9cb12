//! Gemini-backed transcriber.
//!
//! Downloads the provider's recording and sends it inline (base64) to the
//! same Gemini model with a verbatim-transcript instruction.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::time::Duration;

use super::gemini_provider::{GeminiContent, GeminiPart, GeminiProvider, GenerateContentRequest};
use crate::adapters::telephony::DEFAULT_RECORD_MAX_LENGTH;
use crate::ports::{Transcriber, TranscriptionError};

const TRANSCRIBE_INSTRUCTION: &str = "Transcribe this phone recording verbatim. \
Return only the caller's words with no commentary. If nothing intelligible is said, return an empty reply.";

/// Used when the recording host does not declare an audio content type.
const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Upper bound on recording bitrate: 256 kbit/s, well above telephony codecs.
const MAX_RECORDING_BYTES_PER_SEC: u64 = 32_000;

/// Container headers and trailing silence the provider may add.
const RECORDING_SLACK_BYTES: u64 = 256 * 1024;

/// Largest download accepted for a recording of at most `max_length_secs`.
fn recording_byte_limit(max_length_secs: u32) -> u64 {
    u64::from(max_length_secs) * MAX_RECORDING_BYTES_PER_SEC + RECORDING_SLACK_BYTES
}

pub struct GeminiTranscriber {
    provider: GeminiProvider,
    timeout: Duration,
    max_recording_bytes: u64,
}

impl GeminiTranscriber {
    pub fn new(provider: GeminiProvider, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            max_recording_bytes: recording_byte_limit(DEFAULT_RECORD_MAX_LENGTH),
        }
    }

    /// Sizes the download cap from the longest recording the call asks for.
    pub fn with_max_recording_secs(mut self, secs: u32) -> Self {
        self.max_recording_bytes = recording_byte_limit(secs);
        self
    }

    async fn fetch_recording(&self, audio_url: &str) -> Result<(String, Vec<u8>), TranscriptionError> {
        let mut response = self
            .provider
            .http_client()
            .get(audio_url)
            .send()
            .await
            .map_err(|e| TranscriptionError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscriptionError::Fetch(format!(
                "recording host returned {}",
                response.status()
            )));
        }

        let mime = audio_mime(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        if let Some(declared) = response.content_length() {
            if declared > self.max_recording_bytes {
                return Err(self.too_large(declared));
            }
        }

        // Content-Length may be absent, so the cap is enforced while reading too.
        let mut audio = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| TranscriptionError::Fetch(e.to_string()))?
        {
            audio.extend_from_slice(&chunk);
            if audio.len() as u64 > self.max_recording_bytes {
                return Err(self.too_large(audio.len() as u64));
            }
        }
        if audio.is_empty() {
            return Err(TranscriptionError::Fetch("recording is empty".to_string()));
        }

        Ok((mime, audio))
    }

    fn too_large(&self, bytes: u64) -> TranscriptionError {
        tracing::warn!(bytes, limit = self.max_recording_bytes, "Recording rejected as too large");
        TranscriptionError::Fetch(format!(
            "recording of {} bytes exceeds the {} byte limit",
            bytes, self.max_recording_bytes
        ))
    }

    async fn transcribe_inner(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        let (mime, audio) = self.fetch_recording(audio_url).await?;
        let request = transcription_request(&mime, &audio);

        let completion = self
            .provider
            .generate(&request)
            .await
            .map_err(|e| TranscriptionError::Service(e.to_string()))?;

        Ok(completion.content.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for GeminiTranscriber {
    async fn transcribe(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        match tokio::time::timeout(self.timeout, self.transcribe_inner(audio_url)).await {
            Ok(result) => result,
            Err(_) => Err(TranscriptionError::Timeout {
                timeout_secs: self.timeout.as_secs() as u32,
            }),
        }
    }
}

/// Picks an audio MIME type, ignoring parameters and non-audio types.
fn audio_mime(content_type: Option<&str>) -> String {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| ct.starts_with("audio/"))
        .unwrap_or(DEFAULT_AUDIO_MIME)
        .to_string()
}

fn transcription_request(mime: &str, audio: &[u8]) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![
                GeminiPart::text(TRANSCRIBE_INSTRUCTION),
                GeminiPart::inline(mime, STANDARD.encode(audio)),
            ],
        }],
        generation_config: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::GeminiConfig;

    #[test]
    fn audio_mime_strips_parameters() {
        assert_eq!(audio_mime(Some("audio/wav; codecs=1")), "audio/wav");
    }

    #[test]
    fn audio_mime_falls_back_for_generic_types() {
        assert_eq!(audio_mime(Some("application/octet-stream")), "audio/mpeg");
        assert_eq!(audio_mime(None), "audio/mpeg");
    }

    /// Serves `body` once on a loopback port and returns its URL.
    async fn serve_recording(body: Vec<u8>) -> String {
        use axum::{routing::get, Router};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/rec.mp3",
            get(move || {
                let body = body.clone();
                async move { ([(axum::http::header::CONTENT_TYPE, "audio/mpeg")], body) }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/rec.mp3", addr)
    }

    fn transcriber(max_recording_bytes: u64) -> GeminiTranscriber {
        let provider = GeminiProvider::new(GeminiConfig::new("k")).unwrap();
        GeminiTranscriber {
            max_recording_bytes,
            ..GeminiTranscriber::new(provider, Duration::from_secs(5))
        }
    }

    #[test]
    fn byte_limit_scales_with_recording_length() {
        assert_eq!(recording_byte_limit(0), RECORDING_SLACK_BYTES);
        assert_eq!(
            recording_byte_limit(30),
            30 * MAX_RECORDING_BYTES_PER_SEC + RECORDING_SLACK_BYTES
        );
        assert!(recording_byte_limit(60) > recording_byte_limit(30));
    }

    #[tokio::test]
    async fn oversized_recording_is_rejected_before_transcription() {
        let url = serve_recording(vec![0u8; 4096]).await;

        let result = transcriber(1024).fetch_recording(&url).await;

        match result {
            Err(TranscriptionError::Fetch(message)) => assert!(message.contains("exceeds")),
            other => panic!("expected size rejection, got {:?}", other.map(|(m, a)| (m, a.len()))),
        }
    }

    #[tokio::test]
    async fn recording_within_limit_is_downloaded() {
        let url = serve_recording(vec![7u8; 512]).await;

        let (mime, audio) = transcriber(1024).fetch_recording(&url).await.unwrap();

        assert_eq!(mime, "audio/mpeg");
        assert_eq!(audio.len(), 512);
    }

    #[test]
    fn request_carries_instruction_and_inline_audio() {
        let request = transcription_request("audio/mpeg", b"ID3");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], TRANSCRIBE_INSTRUCTION);
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "audio/mpeg"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "SUQz");
        assert!(json.get("generationConfig").is_none());
    }
}
