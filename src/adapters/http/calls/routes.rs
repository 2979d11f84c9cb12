//! HTTP routes for the admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, get_analytics, get_session, initiate_call, list_sessions, list_turns,
    CallAdminHandlers,
};

/// Creates the admin router, nested under `/api`.
pub fn call_admin_routes(handlers: CallAdminHandlers) -> Router {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/:session_id", get(get_session))
        .route("/sessions/:session_id/conversations", get(list_turns))
        .route("/analytics", get(get_analytics))
        .route("/initiate-call", post(initiate_call))
        .with_state(handlers)
}
