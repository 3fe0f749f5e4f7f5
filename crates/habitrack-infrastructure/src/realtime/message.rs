use serde::Deserialize;
use serde_json::{json, Value};

use habitrack_domain::realtime::RealtimeEvent;

/// Frame received from the realtime endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Connected { channels: Vec<String> },
    Event(RealtimeEvent),
    Error { code: i64, message: String },
    Response { to: String, success: bool },
    Pong,
    Unknown(String),
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    events: Vec<String>,
    #[serde(default)]
    channels: Vec<String>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    payload: Value,
}

impl From<RawEvent> for RealtimeEvent {
    fn from(raw: RawEvent) -> Self {
        // older servers send epoch seconds, newer ones an ISO string
        let timestamp = match raw.timestamp {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        RealtimeEvent {
            events: raw.events,
            channels: raw.channels,
            timestamp,
            payload: raw.payload,
        }
    }
}

pub fn parse_server_message(text: &str) -> Result<ServerMessage, serde_json::Error> {
    let raw: RawMessage = serde_json::from_str(text)?;

    let message = match raw.kind.as_str() {
        "connected" => ServerMessage::Connected {
            channels: raw
                .data
                .get("channels")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        },
        "event" => ServerMessage::Event(serde_json::from_value::<RawEvent>(raw.data)?.into()),
        "error" => ServerMessage::Error {
            code: raw.data.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: raw
                .data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown realtime error")
                .to_string(),
        },
        "response" => ServerMessage::Response {
            to: raw
                .data
                .get("to")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            success: raw
                .data
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        "pong" => ServerMessage::Pong,
        other => ServerMessage::Unknown(other.to_string()),
    };

    Ok(message)
}

pub fn authentication_message(session_secret: &str) -> String {
    json!({
        "type": "authentication",
        "data": { "session": session_secret },
    })
    .to_string()
}

pub fn ping_message() -> String {
    json!({ "type": "ping" }).to_string()
}
