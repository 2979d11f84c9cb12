//! HTTP handlers for the chat endpoints.
//!
//! Three wire formats share one forwarding operation.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::application::handlers::chat::{ChatError, ChatService};

use super::dto::{parse_xml_message, ChatRequest, ChatResponse, ChatStatus};

const INVALID_XML: &str = "Invalid XML format";
const MESSAGE_REQUIRED: &str = "Message is required";

#[derive(Clone)]
pub struct ChatHandlers {
    service: Arc<ChatService>,
}

impl ChatHandlers {
    pub fn new(service: Arc<ChatService>) -> Self {
        Self { service }
    }

    async fn reply(&self, message: &str) -> (StatusCode, ChatResponse) {
        match self.service.forward(message).await {
            Ok(text) => (StatusCode::OK, ChatResponse::new(ChatStatus::Success, text)),
            Err(ChatError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                ChatResponse::new(ChatStatus::Error, MESSAGE_REQUIRED),
            ),
            Err(e @ ChatError::Ai(_)) => (
                StatusCode::OK,
                ChatResponse::new(ChatStatus::AiError, e.to_string()),
            ),
        }
    }
}

/// POST /api/chat - XML in, XML out
pub async fn chat_xml(State(handlers): State<ChatHandlers>, body: String) -> Response {
    let (status, response) = match parse_xml_message(&body) {
        Some(message) => handlers.reply(&message).await,
        None => (
            StatusCode::BAD_REQUEST,
            ChatResponse::new(ChatStatus::Error, INVALID_XML),
        ),
    };

    (
        status,
        [(header::CONTENT_TYPE, "application/xml")],
        response.to_xml(),
    )
        .into_response()
}

/// POST /api/chat/json
pub async fn chat_json(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    json_reply(&handlers, req).await
}

/// POST /api/chat/form
pub async fn chat_form(
    State(handlers): State<ChatHandlers>,
    Form(req): Form<ChatRequest>,
) -> Response {
    json_reply(&handlers, req).await
}

async fn json_reply(handlers: &ChatHandlers, req: ChatRequest) -> Response {
    let (status, response) = handlers
        .reply(req.message.as_deref().unwrap_or_default())
        .await;
    (status, Json(response)).into_response()
}
