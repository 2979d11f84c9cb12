//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `call` - Call session aggregate and conversation turns
//! - `therapy` - Stage sequence, prompts, crisis scan and mood detection

pub mod call;
pub mod foundation;
pub mod therapy;
