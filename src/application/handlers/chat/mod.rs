//! Plain chat forwarding.

mod forward_message;

pub use forward_message::{ChatError, ChatService};
