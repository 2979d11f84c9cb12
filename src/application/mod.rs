//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Webhook handlers (voice) drive a call forward; query handlers (call)
//! serve the admin dashboard.

pub mod handlers;

pub use handlers::{
    // Voice webhooks
    ProcessRecordingCommand, ProcessRecordingHandler, StartCallCommand, StartCallHandler,
    VoiceCallError, VoiceReply,
    // Therapy
    ReplyGeneratorConfig, TherapyReply, TherapyReplyGenerator,
    // Admin
    CreateSessionCommand, CreateSessionHandler, GetAnalyticsHandler, GetAnalyticsQuery,
    GetSessionHandler, GetSessionQuery, InitiateCallCommand, InitiateCallHandler,
    ListSessionsHandler, ListSessionsQuery, ListTurnsHandler, ListTurnsQuery, SessionDetail,
    // Chat
    ChatError, ChatService,
};
