//! HTTP adapter for the plain chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{parse_xml_message, ChatRequest, ChatResponse, ChatStatus};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
