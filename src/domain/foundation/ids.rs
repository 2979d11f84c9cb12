//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length of a provider-supplied session identifier.
pub const MAX_SESSION_ID_LENGTH: usize = 100;

/// Maximum length of a caller phone number.
pub const MAX_PHONE_NUMBER_LENGTH: usize = 20;

/// Identifier of a phone call, supplied by the telephony provider.
///
/// The value is opaque to us; it is only trimmed and length-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallSessionId(String);

impl CallSessionId {
    /// Creates a new CallSessionId, returning error if empty or too long.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if id.chars().count() > MAX_SESSION_ID_LENGTH {
            return Err(ValidationError::too_long("session_id", MAX_SESSION_ID_LENGTH));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CallSessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CallSessionId> for String {
    fn from(id: CallSessionId) -> Self {
        id.0
    }
}

/// Caller phone number as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new PhoneNumber, returning error if empty or too long.
    pub fn new(number: impl Into<String>) -> Result<Self, ValidationError> {
        let number = number.into().trim().to_string();
        if number.is_empty() {
            return Err(ValidationError::empty_field("caller_number"));
        }
        if number.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(ValidationError::too_long(
                "caller_number",
                MAX_PHONE_NUMBER_LENGTH,
            ));
        }
        Ok(Self(number))
    }

    /// Creates a number that must carry an international prefix (`+254...`).
    pub fn international(number: impl Into<String>) -> Result<Self, ValidationError> {
        let number = Self::new(number)?;
        if !number.0.starts_with('+') {
            return Err(ValidationError::invalid_format(
                "caller_number",
                "must include country code (e.g., +254...)",
            ));
        }
        Ok(number)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number with all but the last four digits hidden, for logs.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let keep = chars.len().min(4);
        let hidden = chars.len() - keep;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.0
    }
}

/// Storage-assigned identifier of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(i64);

impl TurnId {
    /// Wraps a storage sequence value.
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Returns the inner value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation id attached to outbound model requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Creates a new random TraceId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
