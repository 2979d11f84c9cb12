//! State machine trait for lifecycle enums.
//!
//! Shared by the call status and the therapy stage sequence so both expose
//! the same validated transition surface.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their outgoing edges; validated transitions, terminal
/// checks and single-successor lookup come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for CallStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Active, Completed) | (Active, Escalated))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Active => vec![Completed, Escalated],
///             Completed | Escalated => vec![],
///         }
///     }
/// }
///
/// let status = CallStatus::Active.transition_to(CallStatus::Completed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// Returns the only outgoing state for linear machines.
    ///
    /// `None` when the state is terminal or has more than one way out.
    fn successor(&self) -> Option<Self> {
        match self.valid_transitions().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
