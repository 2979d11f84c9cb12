//! Administrative handlers over call sessions.

mod create_session;
mod get_analytics;
mod get_session;
mod initiate_call;
mod list_sessions;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use get_analytics::{GetAnalyticsHandler, GetAnalyticsQuery};
pub use get_session::{
    GetSessionHandler, GetSessionQuery, ListTurnsHandler, ListTurnsQuery, SessionDetail,
};
pub use initiate_call::{InitiateCallCommand, InitiateCallHandler};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery};
