//! HTTP adapter for the admin endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, ErrorResponse, InitiateCallRequest, SessionDetailResponse,
    SessionResponse, TurnResponse,
};
pub use handlers::CallAdminHandlers;
pub use routes::call_admin_routes;
