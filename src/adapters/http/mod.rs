//! HTTP adapters - REST and webhook endpoints.
//!
//! - `voice` - Telephony webhooks, always answered with XML markup
//! - `calls` - Admin JSON API over sessions, turns and analytics
//! - `chat` - Plain chat forwarding in XML, JSON and form flavours

pub mod calls;
pub mod chat;
pub mod voice;

mod router;

pub use calls::{call_admin_routes, CallAdminHandlers};
pub use chat::{chat_routes, ChatHandlers};
pub use router::{app_router, HttpSettings};
pub use voice::{voice_routes, MarkupSettings, VoiceHandlers};
