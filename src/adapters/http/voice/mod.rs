//! HTTP adapter for the telephony webhooks.

mod fields;
mod handlers;
mod routes;

pub use fields::WebhookFields;
pub use handlers::{MarkupSettings, VoiceHandlers};
pub use routes::voice_routes;
