//! Therapy conversation rules: stage sequence, prompts, crisis scan, mood.

mod crisis;
mod mood;
mod prompts;
mod scripts;
mod stage;

pub use crisis::{contains_crisis_language, CRISIS_KEYWORDS};
pub use mood::detect_mood;
pub use prompts::{
    conversation_prompt, recent_turns, system_prompt, BASE_PROMPT, DEFAULT_HISTORY_WINDOW,
};
pub use scripts::*;
pub use stage::{next_stage, TherapyStage};
