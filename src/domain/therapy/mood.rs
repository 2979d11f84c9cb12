//! Lexical mood tagging of caller utterances.
//!
//! The label seeds the mood-assessment prompt and the analytics
//! distribution. It is never spoken to the caller.

/// Mood labels and the cue words that select them, in priority order.
const MOOD_CUES: &[(&str, &[&str])] = &[
    (
        "anxious",
        &["anxious", "anxiety", "nervous", "worried", "worry", "panic", "scared", "afraid"],
    ),
    (
        "sad",
        &["sad", "depressed", "down", "unhappy", "hopeless", "crying", "grief", "heartbroken"],
    ),
    ("angry", &["angry", "mad", "furious", "frustrated", "annoyed", "irritated"]),
    ("stressed", &["stressed", "stress", "overwhelmed", "pressure", "burned out", "burnt out"]),
    ("lonely", &["lonely", "alone", "isolated"]),
    ("tired", &["tired", "exhausted", "drained", "can't sleep", "cannot sleep"]),
    ("hopeful", &["hopeful", "better", "optimistic", "good", "happy"]),
    ("calm", &["calm", "relaxed", "peaceful", "okay", "fine"]),
];

/// Words that cancel a cue appearing shortly after them ("not okay").
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nor", "hardly", "isn't", "don't", "doesn't", "didn't",
    "wasn't", "aren't", "ain't", "won't",
];

/// How many words before a cue are searched for a negator.
const NEGATION_REACH: usize = 3;

/// Returns the first mood with a cue that appears as a whole word (or
/// phrase) and is not negated by one of the preceding few words.
pub fn detect_mood(utterance: &str) -> Option<&'static str> {
    let words = words(utterance);

    MOOD_CUES
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| affirms(&words, cue)))
        .map(|(mood, _)| *mood)
}

fn words(utterance: &str) -> Vec<String> {
    utterance
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' => '\'',
            c if c.is_alphanumeric() || c == '\'' => c,
            _ => ' ',
        })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

fn affirms(words: &[String], cue: &str) -> bool {
    let cue: Vec<&str> = cue.split(' ').collect();
    words.windows(cue.len()).enumerate().any(|(at, window)| {
        window.iter().zip(&cue).all(|(word, part)| word == part)
            && !words[at.saturating_sub(NEGATION_REACH)..at]
                .iter()
                .any(|word| NEGATORS.contains(&word.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_anxiety() {
        assert_eq!(detect_mood("I feel anxious"), Some("anxious"));
        assert_eq!(detect_mood("I'm so WORRIED about tomorrow."), Some("anxious"));
    }

    #[test]
    fn matches_whole_words_only() {
        // "sadness" is not the cue "sad", and "madam" is not "mad"
        assert_eq!(detect_mood("madam, sadness"), None);
    }

    #[test]
    fn multi_word_cues_match() {
        assert_eq!(detect_mood("honestly I'm burned out"), Some("stressed"));
        assert_eq!(detect_mood("I can't sleep at night"), Some("tired"));
    }

    #[test]
    fn earlier_moods_take_priority() {
        assert_eq!(detect_mood("I'm fine but a bit nervous"), Some("anxious"));
    }

    #[test]
    fn negated_positive_cues_are_ignored() {
        assert_eq!(detect_mood("I'm not okay"), None);
        assert_eq!(detect_mood("I'm not fine"), None);
        assert_eq!(detect_mood("I am not good at all"), None);
        assert_eq!(detect_mood("Nothing is getting better"), None);
        assert_eq!(detect_mood("I really don\u{2019}t feel calm"), None);
    }

    #[test]
    fn negated_cue_falls_through_to_an_affirmed_one() {
        assert_eq!(detect_mood("I'm not calm, I feel so alone"), Some("lonely"));
        assert_eq!(detect_mood("I'm no longer worried, just exhausted"), Some("tired"));
    }

    #[test]
    fn negator_far_before_cue_does_not_cancel_it() {
        assert_eq!(
            detect_mood("No, it was a long week and now I feel calm"),
            Some("calm")
        );
    }

    #[test]
    fn neutral_text_has_no_mood() {
        assert_eq!(detect_mood("I called about my appointment"), None);
        assert_eq!(detect_mood(""), None);
    }
}
