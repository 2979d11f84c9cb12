//! AI Provider Adapters.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models over the Generative Language API
//! - `GeminiTranscriber` - Recording transcription through the same API
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod gemini_transcriber;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use gemini_transcriber::GeminiTranscriber;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
