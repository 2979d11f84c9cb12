//! Router assembly: every endpoint plus the shared middleware stack.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::calls::{call_admin_routes, CallAdminHandlers};
use super::chat::{chat_routes, ChatHandlers};
use super::voice::{voice_routes, VoiceHandlers};

/// Middleware settings taken from the server configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete application router.
pub fn app_router(
    voice: VoiceHandlers,
    admin: CallAdminHandlers,
    chat: ChatHandlers,
    settings: &HttpSettings,
) -> Router {
    // Voice webhooks enforce their own deadline so the provider always gets markup.
    let bounded = Router::new()
        .nest("/api/chat", chat_routes(chat))
        .nest("/api", call_admin_routes(admin))
        .layer(TimeoutLayer::new(settings.request_timeout));

    Router::new()
        .route("/health", get(health))
        .nest("/api/voice", voice_routes(voice))
        .merge(bounded)
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
