//! System instructions and prompt assembly for the therapy model.

use crate::domain::call::{Turn, TurnRole};

use super::TherapyStage;

/// Persona and safety rules shared by every stage.
pub const BASE_PROMPT: &str = "You are Kalm AI, a compassionate and professional AI therapy assistant. \
You provide mental health support through voice conversations. Your responses should be:
- Warm, empathetic, and non-judgmental
- Concise (2-3 sentences max for voice delivery)
- Professionally therapeutic but accessible
- Focused on active listening and validation
- Encouraging without being dismissive
- Crisis-aware (identify if immediate help is needed)

IMPORTANT: If you detect signs of self-harm, suicide ideation, or crisis, immediately recommend calling emergency services or a crisis hotline.";

/// Default number of most recent turns sent with each request.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

const CALLER_LABEL: &str = "Human";
const ASSISTANT_LABEL: &str = "Kalm AI";

/// Builds the system instruction for a stage.
///
/// Mood is only interpolated for `MoodAssessment`; an unknown mood reads
/// as "unknown". `Completed` has no suffix.
pub fn system_prompt(stage: TherapyStage, mood: Option<&str>) -> String {
    let suffix = match stage {
        TherapyStage::Greeting => Some(
            "This is the beginning of the session. Warmly welcome the caller and ask how they're feeling today."
                .to_string(),
        ),
        TherapyStage::MoodAssessment => Some(format!(
            "The caller's current mood appears to be {}. Acknowledge their feelings and ask gentle follow-up questions.",
            mood.filter(|m| !m.trim().is_empty()).unwrap_or("unknown")
        )),
        TherapyStage::ActiveTherapy => Some(
            "Engage in active therapeutic conversation. Use techniques like reflective listening, cognitive reframing, and emotional validation."
                .to_string(),
        ),
        TherapyStage::CopingStrategies => Some(
            "Provide practical coping strategies and mindfulness techniques appropriate for their situation."
                .to_string(),
        ),
        TherapyStage::Closing => Some(
            "Wrap up the session positively. Summarize key insights and encourage the caller."
                .to_string(),
        ),
        TherapyStage::Completed => None,
    };

    match suffix {
        Some(suffix) => format!("{}\n{}", BASE_PROMPT, suffix),
        None => BASE_PROMPT.to_string(),
    }
}

/// Returns the last `window` turns, in their original order.
pub fn recent_turns(history: &[Turn], window: usize) -> &[Turn] {
    &history[history.len().saturating_sub(window)..]
}

/// Concatenates the instruction with speaker-labelled history and the
/// assistant cursor, producing the single text prompt sent to the model.
pub fn conversation_prompt(system: &str, history: &[Turn], window: usize) -> String {
    let mut prompt = format!("{}\n\nConversation History:\n", system);
    for turn in recent_turns(history, window) {
        let label = match turn.role() {
            TurnRole::Caller => CALLER_LABEL,
            TurnRole::Assistant => ASSISTANT_LABEL,
        };
        prompt.push_str(label);
        prompt.push_str(": ");
        prompt.push_str(turn.content());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(ASSISTANT_LABEL);
    prompt.push(':');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::Turn;
    use crate::domain::foundation::{CallSessionId, Timestamp, TurnId};

    fn turns(count: usize) -> Vec<Turn> {
        let session = CallSessionId::new("S1").unwrap();
        (0..count)
            .map(|i| {
                let role = if i % 2 == 0 {
                    TurnRole::Caller
                } else {
                    TurnRole::Assistant
                };
                Turn::reconstitute(
                    TurnId::from_i64(i as i64 + 1),
                    session.clone(),
                    role,
                    format!("message {}", i),
                    None,
                    None,
                    Timestamp::now(),
                )
            })
            .collect()
    }

    #[test]
    fn mood_is_only_used_for_mood_assessment() {
        let prompt = system_prompt(TherapyStage::MoodAssessment, Some("anxious"));
        assert!(prompt.starts_with(BASE_PROMPT));
        assert!(prompt.contains("appears to be anxious"));

        let greeting = system_prompt(TherapyStage::Greeting, Some("anxious"));
        assert!(!greeting.contains("anxious"));
    }

    #[test]
    fn missing_mood_reads_as_unknown() {
        let prompt = system_prompt(TherapyStage::MoodAssessment, None);
        assert!(prompt.contains("appears to be unknown"));
    }

    #[test]
    fn completed_stage_uses_base_prompt_only() {
        assert_eq!(system_prompt(TherapyStage::Completed, None), BASE_PROMPT);
    }

    #[test]
    fn each_active_stage_adds_a_suffix() {
        for stage in [
            TherapyStage::Greeting,
            TherapyStage::MoodAssessment,
            TherapyStage::ActiveTherapy,
            TherapyStage::CopingStrategies,
            TherapyStage::Closing,
        ] {
            assert!(system_prompt(stage, None).len() > BASE_PROMPT.len());
        }
    }

    #[test]
    fn prompt_keeps_exactly_the_last_ten_turns_in_order() {
        let history = turns(15);
        let prompt = conversation_prompt("SYSTEM", &history, DEFAULT_HISTORY_WINDOW);

        for i in 0..5 {
            assert!(!prompt.contains(&format!("message {}\n", i)));
        }
        let positions: Vec<usize> = (5..15)
            .map(|i| prompt.find(&format!("message {}\n", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(recent_turns(&history, 10).len(), 10);
    }

    #[test]
    fn prompt_labels_speakers_and_ends_with_cursor() {
        let history = turns(2);
        let prompt = conversation_prompt("SYSTEM", &history, 10);

        assert!(prompt.starts_with("SYSTEM\n\nConversation History:\n"));
        assert!(prompt.contains("Human: message 0\n"));
        assert!(prompt.contains("Kalm AI: message 1\n"));
        assert!(prompt.ends_with("\nKalm AI:"));
    }

    #[test]
    fn short_history_is_sent_whole() {
        let history = turns(3);
        assert_eq!(recent_turns(&history, 10).len(), 3);
        assert!(recent_turns(&[], 10).is_empty());
    }
}
