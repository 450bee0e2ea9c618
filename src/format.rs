//! Response rendering - status classification and JSON pretty-printing

use crate::models::ResponseEnvelope;
use crate::settings::Settings;

/// Display bucket for a status code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientOrServerError,
    /// Transport failures (0), 1xx and 3xx
    Other,
}

pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        400..=u16::MAX => StatusClass::ClientOrServerError,
        _ => StatusClass::Other,
    }
}

/// Render the envelope body for display. Never fails.
pub fn render(envelope: &ResponseEnvelope, auto_format: bool) -> String {
    render_body(&envelope.data, auto_format)
}

/// Pretty-print JSON-looking text when `auto_format` is on.
///
/// Text whose first non-whitespace character is not `{` or `[`, or which
/// fails to parse, comes back verbatim.
pub fn render_body(data: &str, auto_format: bool) -> String {
    if !auto_format || !looks_like_json(data) {
        return data.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| data.to_string()),
        Err(e) => {
            tracing::trace!(error = %e, "Body looked like JSON but did not parse");
            data.to_string()
        }
    }
}

fn looks_like_json(data: &str) -> bool {
    matches!(data.trim_start().chars().next(), Some('{') | Some('['))
}

/// Everything the response panel shows for one envelope
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseView {
    pub status: u16,
    pub status_text: String,
    pub class: StatusClass,
    /// Empty when header display is switched off
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub time_ms: u64,
}

impl ResponseView {
    pub fn new(envelope: &ResponseEnvelope, settings: &Settings, time_ms: u64) -> Self {
        let status_text = if envelope.status_text.is_empty() {
            String::from("None")
        } else {
            envelope.status_text.clone()
        };
        let headers = if settings.show_headers {
            envelope
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        } else {
            Vec::new()
        };
        ResponseView {
            status: envelope.status,
            status_text,
            class: classify(envelope.status),
            headers,
            body: render(envelope, settings.auto_format),
            time_ms,
        }
    }
}
