//! Crisis keyword scan.

/// Phrases that trigger crisis-resource messaging.
pub const CRISIS_KEYWORDS: [&str; 5] = [
    "suicide",
    "kill myself",
    "end it all",
    "hurt myself",
    "no point living",
];

/// Case-insensitive substring match against [`CRISIS_KEYWORDS`].
pub fn contains_crisis_language(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CRISIS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
