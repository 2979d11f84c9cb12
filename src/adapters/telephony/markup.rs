//! Voice markup builder for Africa's Talking call responses.
//!
//! Three document shapes cover the whole call flow: speak and hang up,
//! speak then record, and speak then collect digits. Every interpolated
//! value, text and attribute alike, passes through [`escape_markup`].

use std::fmt::Write;

/// Default recording cap in seconds.
pub const DEFAULT_RECORD_MAX_LENGTH: u32 = 30;
/// Default silence/input timeout in seconds.
pub const DEFAULT_INPUT_TIMEOUT: u32 = 10;
/// Default key that ends a recording or digit entry.
pub const DEFAULT_FINISH_KEY: &str = "#";
/// Default synthesized voice.
pub const DEFAULT_VOICE: &str = "woman";

use crate::domain::therapy::NO_INPUT_MESSAGE;

/// A complete response document for one call step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceDocument {
    /// Speak the text; the provider ends the call afterwards.
    Speak { text: String },
    /// Speak a prompt, then record the caller and post the result to `callback_url`.
    Record {
        prompt: String,
        callback_url: String,
        max_length: u32,
        timeout: u32,
        finish_key: String,
        trim_silence: bool,
    },
    /// Speak a prompt and collect digits; speaks a fixed notice on timeout.
    Menu {
        prompt: String,
        callback_url: String,
        timeout: u32,
        finish_key: String,
    },
}

impl VoiceDocument {
    pub fn speak(text: impl Into<String>) -> Self {
        VoiceDocument::Speak { text: text.into() }
    }

    /// Record with defaults: 30s cap, 10s timeout, `#` to finish, silence trimmed.
    pub fn record(prompt: impl Into<String>, callback_url: impl Into<String>) -> Self {
        VoiceDocument::Record {
            prompt: prompt.into(),
            callback_url: callback_url.into(),
            max_length: DEFAULT_RECORD_MAX_LENGTH,
            timeout: DEFAULT_INPUT_TIMEOUT,
            finish_key: DEFAULT_FINISH_KEY.to_string(),
            trim_silence: true,
        }
    }

    /// Menu with defaults: 10s timeout, `#` to finish.
    pub fn menu(prompt: impl Into<String>, callback_url: impl Into<String>) -> Self {
        VoiceDocument::Menu {
            prompt: prompt.into(),
            callback_url: callback_url.into(),
            timeout: DEFAULT_INPUT_TIMEOUT,
            finish_key: DEFAULT_FINISH_KEY.to_string(),
        }
    }

    /// Overrides the recording cap. No effect on other shapes.
    pub fn with_max_length(mut self, secs: u32) -> Self {
        if let VoiceDocument::Record { max_length, .. } = &mut self {
            *max_length = secs;
        }
        self
    }

    /// Overrides the input timeout. No effect on `Speak`.
    pub fn with_timeout(mut self, secs: u32) -> Self {
        match &mut self {
            VoiceDocument::Record { timeout, .. } | VoiceDocument::Menu { timeout, .. } => {
                *timeout = secs
            }
            VoiceDocument::Speak { .. } => {}
        }
        self
    }

    /// True when the provider hangs up after this document.
    pub fn ends_call(&self) -> bool {
        matches!(self, VoiceDocument::Speak { .. })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VoiceDocument::Speak { .. } => "speak",
            VoiceDocument::Record { .. } => "record",
            VoiceDocument::Menu { .. } => "menu",
        }
    }

    /// Renders the full XML document using `voice` for every spoken element.
    pub fn render(&self, voice: &str) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>\n");

        match self {
            VoiceDocument::Speak { text } => {
                render_say(&mut xml, voice, text, 1);
            }
            VoiceDocument::Record {
                prompt,
                callback_url,
                max_length,
                timeout,
                finish_key,
                trim_silence,
            } => {
                let _ = writeln!(
                    xml,
                    "  <Record finishOnKey=\"{}\" maxLength=\"{}\" timeout=\"{}\" trimSilence=\"{}\" playBeep=\"true\" callbackUrl=\"{}\">",
                    escape_markup(finish_key),
                    max_length,
                    timeout,
                    trim_silence,
                    escape_markup(callback_url)
                );
                render_say(&mut xml, voice, prompt, 2);
                xml.push_str("  </Record>\n");
            }
            VoiceDocument::Menu {
                prompt,
                callback_url,
                timeout,
                finish_key,
            } => {
                let _ = writeln!(
                    xml,
                    "  <GetDigits timeout=\"{}\" finishOnKey=\"{}\" callbackUrl=\"{}\">",
                    timeout,
                    escape_markup(finish_key),
                    escape_markup(callback_url)
                );
                render_say(&mut xml, voice, prompt, 2);
                xml.push_str("  </GetDigits>\n");
                render_say(&mut xml, voice, NO_INPUT_MESSAGE, 1);
            }
        }

        xml.push_str("</Response>");
        xml
    }
}

fn render_say(xml: &mut String, voice: &str, text: &str, indent: usize) {
    let _ = writeln!(
        xml,
        "{}<Say voice=\"{}\">{}</Say>",
        "  ".repeat(indent),
        escape_markup(voice),
        escape_markup(text)
    );
}

/// Drops characters XML cannot carry or that have no place in speech:
/// C0 controls other than tab, LF and CR, plus DEL and the U+FFFE/U+FFFF
/// non-characters.
pub fn strip_control_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{0}'..='\u{1F}' | '\u{7F}' | '\u{FFFE}' | '\u{FFFF}' => false,
            _ => true,
        })
        .collect()
}

/// Strips control characters and escapes the five reserved characters.
///
/// Carriage returns become a character reference so parsers do not fold
/// them into line feeds.
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in strip_control_chars(s).chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            other => out.push(other),
        }
    }
    out
}
