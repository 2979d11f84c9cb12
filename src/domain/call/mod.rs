//! Call module: sessions and their conversation turns.

mod aggregate;
mod errors;
mod turn;

pub use aggregate::CallSession;
pub use errors::CallError;
pub use turn::{NewTurn, Turn, TurnRole};
