//! HTTP routes for the chat endpoints.

use axum::{routing::post, Router};

use super::handlers::{chat_form, chat_json, chat_xml, ChatHandlers};

/// Creates the chat router, nested under `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", post(chat_xml))
        .route("/json", post(chat_json))
        .route("/form", post(chat_form))
        .with_state(handlers)
}
