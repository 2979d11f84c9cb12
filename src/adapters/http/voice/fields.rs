//! Webhook field extraction.
//!
//! Providers post either form-encoded or JSON bodies, sometimes with the
//! identifiers in the query string, and spell the same field several
//! ways. [`WebhookFields`] merges all of it into one map; body values win
//! over query values.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};

/// Accepted spellings of the session identifier.
pub const SESSION_ID_FIELDS: &[&str] = &["sessionId", "session_id", "SessionId"];
/// Accepted spellings of the caller number.
pub const CALLER_NUMBER_FIELDS: &[&str] = &[
    "callerNumber",
    "caller_number",
    "CallerNumber",
    "phoneNumber",
    "phone_number",
    "from",
];
/// Accepted spellings of the recording reference.
pub const RECORDING_URL_FIELDS: &[&str] = &["recordingUrl", "recording_url", "RecordingUrl"];
/// Accepted spellings of a provider-side transcript.
pub const TRANSCRIPTION_FIELDS: &[&str] = &["transcription", "transcript", "speechText"];

/// All fields of a webhook delivery. Extraction never fails: an
/// unreadable body yields whatever the query string carried.
#[derive(Debug, Clone, Default)]
pub struct WebhookFields(HashMap<String, String>);

impl WebhookFields {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// First non-blank value among `names`, in the order given.
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(String::from)
    }

    pub fn session_id(&self) -> Option<String> {
        self.first_of(SESSION_ID_FIELDS)
    }

    pub fn caller_number(&self) -> Option<String> {
        self.first_of(CALLER_NUMBER_FIELDS)
    }

    pub fn recording_url(&self) -> Option<String> {
        self.first_of(RECORDING_URL_FIELDS)
    }

    pub fn transcription(&self) -> Option<String> {
        self.first_of(TRANSCRIPTION_FIELDS)
    }

    fn merge(&mut self, other: HashMap<String, String>) {
        self.0.extend(other);
    }
}

#[async_trait]
impl<S> FromRequest<S> for WebhookFields
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = WebhookFields::default();
        if let Ok(Query(query)) = Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
            fields.merge(query);
        }

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            match Json::<HashMap<String, serde_json::Value>>::from_request(req, state).await {
                Ok(Json(body)) => fields.merge(
                    body.into_iter()
                        .filter_map(|(k, v)| json_scalar(v).map(|v| (k, v)))
                        .collect(),
                ),
                Err(e) => tracing::warn!(error = %e, "Unreadable JSON webhook body"),
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(body)) => fields.merge(body),
                Err(e) => tracing::warn!(error = %e, "Unreadable form webhook body"),
            }
        }

        Ok(fields)
    }
}

fn json_scalar(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    async fn extract(req: Request) -> WebhookFields {
        WebhookFields::from_request(req, &()).await.unwrap()
    }

    #[test]
    fn aliases_resolve_in_order() {
        let fields = WebhookFields::from_pairs([
            ("SessionId", "S-upper"),
            ("session_id", "S-snake"),
            ("from", "+254711111111"),
        ]);
        assert_eq!(fields.session_id().as_deref(), Some("S-snake"));
        assert_eq!(fields.caller_number().as_deref(), Some("+254711111111"));
        assert!(fields.recording_url().is_none());
    }

    #[test]
    fn blank_values_are_skipped() {
        let fields = WebhookFields::from_pairs([("sessionId", "  "), ("SessionId", "S1")]);
        assert_eq!(fields.session_id().as_deref(), Some("S1"));
    }

    #[tokio::test]
    async fn reads_form_body() {
        let req = HttpRequest::post("/api/voice/callback")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("sessionId=ATVId_1&callerNumber=%2B254700000000&isActive=1"))
            .unwrap();

        let fields = extract(req).await;
        assert_eq!(fields.session_id().as_deref(), Some("ATVId_1"));
        assert_eq!(fields.caller_number().as_deref(), Some("+254700000000"));
    }

    #[tokio::test]
    async fn reads_json_body_with_scalars() {
        let req = HttpRequest::post("/api/voice/process-recording")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"session_id": 42, "recording_url": "https://media.example.org/r.mp3", "meta": {"x": 1}}"#,
            ))
            .unwrap();

        let fields = extract(req).await;
        assert_eq!(fields.session_id().as_deref(), Some("42"));
        assert_eq!(
            fields.recording_url().as_deref(),
            Some("https://media.example.org/r.mp3")
        );
    }

    #[tokio::test]
    async fn body_overrides_query() {
        let req = HttpRequest::post("/api/voice/callback?sessionId=Q1&phoneNumber=%2B254700000001")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("sessionId=B1"))
            .unwrap();

        let fields = extract(req).await;
        assert_eq!(fields.session_id().as_deref(), Some("B1"));
        assert_eq!(fields.caller_number().as_deref(), Some("+254700000001"));
    }

    #[tokio::test]
    async fn malformed_body_still_yields_query_fields() {
        let req = HttpRequest::post("/api/voice/callback?sessionId=Q1")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let fields = extract(req).await;
        assert_eq!(fields.session_id().as_deref(), Some("Q1"));
    }
}
