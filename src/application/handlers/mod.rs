//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod call;
pub mod chat;
pub mod therapy;
pub mod voice;

pub use call::{
    CreateSessionCommand, CreateSessionHandler, GetAnalyticsHandler, GetAnalyticsQuery,
    GetSessionHandler, GetSessionQuery, InitiateCallCommand, InitiateCallHandler,
    ListSessionsHandler, ListSessionsQuery, ListTurnsHandler, ListTurnsQuery, SessionDetail,
};
pub use chat::{ChatError, ChatService};
pub use therapy::{ReplyGeneratorConfig, TherapyReply, TherapyReplyGenerator};
pub use voice::{
    ProcessRecordingCommand, ProcessRecordingHandler, StartCallCommand, StartCallHandler,
    VoiceCallError, VoiceReply,
};
