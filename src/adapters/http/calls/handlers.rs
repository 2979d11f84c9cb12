//! HTTP handlers for the admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::call::{
    CreateSessionCommand, CreateSessionHandler, GetAnalyticsHandler, GetAnalyticsQuery,
    GetSessionHandler, GetSessionQuery, InitiateCallCommand, InitiateCallHandler,
    ListSessionsHandler, ListSessionsQuery, ListTurnsHandler, ListTurnsQuery,
};
use crate::domain::call::CallError;

use super::dto::{
    CreateSessionRequest, ErrorResponse, InitiateCallRequest, SessionDetailResponse,
    SessionResponse, TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CallAdminHandlers {
    list_handler: Arc<ListSessionsHandler>,
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    turns_handler: Arc<ListTurnsHandler>,
    analytics_handler: Arc<GetAnalyticsHandler>,
    initiate_handler: Arc<InitiateCallHandler>,
}

impl CallAdminHandlers {
    pub fn new(
        list_handler: Arc<ListSessionsHandler>,
        create_handler: Arc<CreateSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        turns_handler: Arc<ListTurnsHandler>,
        analytics_handler: Arc<GetAnalyticsHandler>,
        initiate_handler: Arc<InitiateCallHandler>,
    ) -> Self {
        Self {
            list_handler,
            create_handler,
            get_handler,
            turns_handler,
            analytics_handler,
            initiate_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions - All sessions, newest first
pub async fn list_sessions(State(handlers): State<CallAdminHandlers>) -> Response {
    match handlers.list_handler.handle(ListSessionsQuery).await {
        Ok(sessions) => {
            let response: Vec<SessionResponse> =
                sessions.iter().map(SessionResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_call_error(e),
    }
}

/// POST /api/sessions - Register a session
pub async fn create_session(
    State(handlers): State<CallAdminHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand {
        session_id: req.session_id,
        caller_number: req.caller_number,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_call_error(e),
    }
}

/// GET /api/sessions/:session_id - Session with its conversation
pub async fn get_session(
    State(handlers): State<CallAdminHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(detail) => (StatusCode::OK, Json(SessionDetailResponse::from(detail))).into_response(),
        Err(e) => handle_call_error(e),
    }
}

/// GET /api/sessions/:session_id/conversations - Turns only
pub async fn list_turns(
    State(handlers): State<CallAdminHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    match handlers.turns_handler.handle(ListTurnsQuery { session_id }).await {
        Ok(turns) => {
            let response: Vec<TurnResponse> = turns.iter().map(TurnResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_call_error(e),
    }
}

/// GET /api/analytics - Dashboard counters
pub async fn get_analytics(State(handlers): State<CallAdminHandlers>) -> Response {
    match handlers.analytics_handler.handle(GetAnalyticsQuery).await {
        Ok(analytics) => (StatusCode::OK, Json(analytics)).into_response(),
        Err(e) => handle_call_error(e),
    }
}

/// POST /api/initiate-call - Dial a caller through the provider
pub async fn initiate_call(
    State(handlers): State<CallAdminHandlers>,
    Json(req): Json<InitiateCallRequest>,
) -> Response {
    let cmd = InitiateCallCommand {
        caller_number: req.caller_number,
    };

    match handlers.initiate_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_call_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_call_error(error: CallError) -> Response {
    let status = match &error {
        CallError::NotFound(_) => StatusCode::NOT_FOUND,
        CallError::AlreadyExists(_) => StatusCode::CONFLICT,
        CallError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        CallError::Telephony(_) => StatusCode::BAD_GATEWAY,
        CallError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Admin request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CallSessionId;

    fn id() -> CallSessionId {
        CallSessionId::new("S1").unwrap()
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_call_error(CallError::not_found(id()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_maps_to_409() {
        let response = handle_call_error(CallError::already_exists(id()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_call_error(CallError::validation("caller_number", "required"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn telephony_maps_to_502() {
        let response = handle_call_error(CallError::telephony("rejected"));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_call_error(CallError::infrastructure("db down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
