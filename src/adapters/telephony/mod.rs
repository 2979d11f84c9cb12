//! Telephony adapters: response markup and the outbound-call gateway.

mod africastalking;
mod markup;

pub use africastalking::{AfricasTalkingConfig, AfricasTalkingGateway};
pub use markup::{
    escape_markup, strip_control_chars, VoiceDocument, DEFAULT_FINISH_KEY,
    DEFAULT_INPUT_TIMEOUT, DEFAULT_RECORD_MAX_LENGTH, DEFAULT_VOICE,
};
