//! Turn repository port. Turns are append-only.

use crate::domain::call::{NewTurn, Turn};
use crate::domain::foundation::{CallSessionId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait TurnRepository: Send + Sync {
    /// Store a turn and return it with its assigned id and timestamp.
    async fn append(&self, turn: NewTurn) -> Result<Turn, DomainError>;

    /// Every turn of a session in creation order.
    async fn history(&self, session_id: &CallSessionId) -> Result<Vec<Turn>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TurnRepository) {}
    }
}
