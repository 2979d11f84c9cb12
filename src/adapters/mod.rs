//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini model and transcription, plus a scripted mock
//! - `postgres` - sqlx repositories
//! - `memory` - In-process store used without a database
//! - `telephony` - Africa's Talking markup and outbound calls
//! - `http` - axum routers

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod telephony;

pub use ai::{GeminiConfig, GeminiProvider, GeminiTranscriber, MockAIProvider};
pub use memory::InMemoryCallStore;
pub use postgres::{PostgresCallSessionReader, PostgresCallSessionRepository, PostgresTurnRepository};
pub use telephony::{AfricasTalkingConfig, AfricasTalkingGateway, VoiceDocument};
