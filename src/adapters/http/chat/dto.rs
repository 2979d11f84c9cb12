//! Chat request and response shapes for the XML, JSON and form adapters.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::adapters::telephony::{escape_markup, strip_control_chars};

/// Outcome label carried in every chat response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Success,
    AiError,
    Error,
}

impl ChatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatStatus::Success => "success",
            ChatStatus::AiError => "ai_error",
            ChatStatus::Error => "error",
        }
    }
}

/// JSON or form chat request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Chat response, rendered as JSON or XML.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub status: ChatStatus,
    pub message: String,
}

impl ChatResponse {
    pub fn new(status: ChatStatus, message: impl AsRef<str>) -> Self {
        Self {
            status,
            message: strip_control_chars(message.as_ref()),
        }
    }

    /// `<response><status/><message/></response>` with escaped text.
    pub fn to_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>\n  <status>{}</status>\n  <message>{}</message>\n</response>",
            self.status.as_str(),
            escape_markup(&self.message)
        )
    }
}

/// Text of the first `message` element in any XML document.
///
/// Returns `None` when the document is malformed or has no such element.
pub fn parse_xml_message(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut depth_in_message = 0usize;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth_in_message > 0 {
                    depth_in_message += 1;
                } else if e.name().as_ref() == b"message" {
                    depth_in_message = 1;
                }
            }
            Ok(Event::Empty(e)) if depth_in_message == 0 && e.name().as_ref() == b"message" => {
                return Some(String::new());
            }
            Ok(Event::Text(t)) if depth_in_message > 0 => {
                text.push_str(&t.unescape().ok()?);
            }
            Ok(Event::CData(c)) if depth_in_message > 0 => {
                text.push_str(std::str::from_utf8(&c).ok()?);
            }
            Ok(Event::End(_)) if depth_in_message > 0 => {
                depth_in_message -= 1;
                if depth_in_message == 0 {
                    return Some(text);
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_from_request_document() {
        let xml = "<request><message>Hello &amp; welcome</message></request>";
        assert_eq!(parse_xml_message(xml).as_deref(), Some("Hello & welcome"));
    }

    #[test]
    fn any_root_is_accepted() {
        let xml = "<?xml version=\"1.0\"?><chat><meta/><message><![CDATA[a < b]]></message></chat>";
        assert_eq!(parse_xml_message(xml).as_deref(), Some("a < b"));
    }

    #[test]
    fn missing_or_malformed_message_is_none() {
        assert_eq!(parse_xml_message("<request><text>hi</text></request>"), None);
        assert_eq!(parse_xml_message("not xml at all"), None);
        assert_eq!(parse_xml_message("<request><message>unclosed"), None);
    }

    #[test]
    fn xml_response_escapes_reply() {
        let xml = ChatResponse::new(ChatStatus::Success, "1 < 2 & \u{1}ok").to_xml();
        assert!(xml.contains("<status>success</status>"));
        assert!(xml.contains("<message>1 &lt; 2 &amp; ok</message>"));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_value(ChatResponse::new(ChatStatus::AiError, "x")).unwrap();
        assert_eq!(json["status"], "ai_error");
    }
}
