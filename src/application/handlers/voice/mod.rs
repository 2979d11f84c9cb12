//! Voice webhook handlers.

mod process_recording;
mod reply;
mod start_call;

pub use process_recording::{ProcessRecordingCommand, ProcessRecordingHandler};
pub use reply::{VoiceCallError, VoiceReply};
pub use start_call::{StartCallCommand, StartCallHandler};
