//! Fixed caller-facing utterances.

/// Spoken when a new call is answered, before the first recording.
pub const WELCOME_PROMPT: &str = "Hello and welcome to Kalm AI. I'm here to listen and support you. \
Please tell me how you're feeling today after the beep, then press # when you're done.";

/// Appended to every reply that is followed by another recording.
pub const CONTINUATION_PROMPT: &str = "Please share more about how you're feeling.";

/// Replaces the model reply when crisis language is detected; the call ends after it.
pub const CRISIS_RESOURCES: &str = "I'm concerned about what you've shared. Your safety is important. \
Please consider reaching out to a crisis helpline at 1-800-273-8255 or emergency services at 911.";

/// Fallback when the model answered but produced nothing usable.
pub const CLARIFYING_FALLBACK: &str =
    "I'm having trouble understanding. Could you please tell me more about how you're feeling?";

/// Fallback when the model could not be reached.
pub const BREATHING_FALLBACK: &str = "I understand you're going through something difficult. \
Would you like to take a moment to breathe together?";

/// Stands in for the caller's words when no transcript could be obtained.
pub const TRANSCRIPTION_PLACEHOLDER: &str = "I didn't catch that. Could you please repeat?";

/// Spoken after a menu prompt when no digits arrive.
pub const NO_INPUT_MESSAGE: &str = "I didn't receive your input. Please call back to try again.";

pub const MISSING_IDENTIFIERS_APOLOGY: &str = "Unable to process call. Please try again.";

pub const CALL_START_FAILURE_APOLOGY: &str =
    "We're having technical difficulties. Please call back later.";

pub const BAD_RECORDING_APOLOGY: &str = "Sorry, we couldn't process your request.";

pub const SESSION_NOT_FOUND_APOLOGY: &str =
    "Session not found. Please call back to start a new conversation.";

pub const RECORDING_FAILURE_APOLOGY: &str = "Sorry, we're experiencing technical difficulties.";

/// Joins a reply with the continuation prompt.
pub fn with_continuation(reply: &str) -> String {
    format!("{} {}", reply.trim_end(), CONTINUATION_PROMPT)
}
