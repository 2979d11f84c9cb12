//! Call-specific error types.

use crate::domain::foundation::{CallSessionId, DomainError, ErrorCode, ValidationError};

/// Errors raised while handling call sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No session has this identifier.
    NotFound(CallSessionId),
    /// A session with this identifier already exists.
    AlreadyExists(CallSessionId),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The telephony provider rejected or failed a request.
    Telephony(String),
    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl CallError {
    pub fn not_found(id: CallSessionId) -> Self {
        CallError::NotFound(id)
    }
    pub fn already_exists(id: CallSessionId) -> Self {
        CallError::AlreadyExists(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CallError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn telephony(message: impl Into<String>) -> Self {
        CallError::Telephony(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CallError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CallError::NotFound(_) => ErrorCode::SessionNotFound,
            CallError::AlreadyExists(_) => ErrorCode::SessionAlreadyExists,
            CallError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CallError::Telephony(_) => ErrorCode::TelephonyError,
            CallError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CallError::NotFound(id) => format!("Session not found: {}", id),
            CallError::AlreadyExists(id) => format!("Session already exists: {}", id),
            CallError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CallError::Telephony(msg) => format!("Telephony error: {}", msg),
            CallError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CallError {}

impl From<DomainError> for CallError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CallError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::TelephonyError => CallError::Telephony(err.message),
            _ => CallError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for CallError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        CallError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        let id = CallSessionId::new("S1").unwrap();
        assert_eq!(CallError::not_found(id.clone()).code(), ErrorCode::SessionNotFound);
        assert_eq!(
            CallError::already_exists(id).code(),
            ErrorCode::SessionAlreadyExists
        );
        assert_eq!(CallError::telephony("x").code(), ErrorCode::TelephonyError);
        assert_eq!(CallError::infrastructure("x").code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_error_keeps_field_name() {
        let err: CallError = ValidationError::empty_field("caller_number").into();
        match err {
            CallError::ValidationFailed { field, .. } => assert_eq!(field, "caller_number"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: CallError = DomainError::database("connection refused").into();
        assert!(matches!(err, CallError::Infrastructure(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
