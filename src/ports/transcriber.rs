//! Transcriber port - turns a recording reference into text.

use async_trait::async_trait;

/// Speech-to-text collaborator. Failure is an expected outcome; callers
/// substitute a placeholder utterance.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_url: &str) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// The recording could not be downloaded.
    #[error("failed to fetch recording: {0}")]
    Fetch(String),

    /// The speech service failed or returned nothing usable.
    #[error("transcription failed: {0}")]
    Service(String),

    #[error("transcription timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcriber_is_object_safe() {
        fn _accepts_dyn(_t: &dyn Transcriber) {}
    }
}
