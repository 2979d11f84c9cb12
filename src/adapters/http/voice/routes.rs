//! HTTP routes for the telephony webhooks.

use axum::{routing::post, Router};

use super::handlers::{call_started, recording_ready, VoiceHandlers};

/// Creates the voice webhook router, nested under `/api/voice`.
pub fn voice_routes(handlers: VoiceHandlers) -> Router {
    Router::new()
        .route("/callback", post(call_started))
        .route("/process-recording", post(recording_ready))
        .with_state(handlers)
}
