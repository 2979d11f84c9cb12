//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the call domain.

mod call_status;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use call_status::CallStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CallSessionId, PhoneNumber, TraceId, TurnId, MAX_PHONE_NUMBER_LENGTH, MAX_SESSION_ID_LENGTH,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
