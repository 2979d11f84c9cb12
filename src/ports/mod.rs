//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `CallSessionRepository` - Session persistence keyed by provider session id
//! - `TurnRepository` - Append-only conversation log
//! - `CallSessionReader` - Dashboard analytics
//!
//! ## External Service Ports
//!
//! - `AIProvider` - Generative-language model
//! - `Transcriber` - Recording to text
//! - `VoiceGateway` - Outbound calls

mod ai_provider;
mod call_session_reader;
mod call_session_repository;
mod transcriber;
mod turn_repository;
mod voice_gateway;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata,
};
pub use call_session_reader::{CallAnalytics, CallSessionReader, MoodCount, RECENT_ACTIVITY_DAYS};
pub use call_session_repository::CallSessionRepository;
pub use transcriber::{Transcriber, TranscriptionError};
pub use turn_repository::TurnRepository;
pub use voice_gateway::{OutboundCallEntry, OutboundCallResult, TelephonyError, VoiceGateway};
