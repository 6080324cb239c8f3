//! Inbound Slack event decoding.
//!
//! Accepts either a full Events API envelope (the `event` field of an
//! `event_callback`) or a bare event object, and classifies it into an
//! [`EventKind`]. Decoding never fails outward: undecodable payloads
//! become the `Error` kind so the classifier's error arm handles them.

use serde::Deserialize;

use crate::types::{EventEnvelope, EventKind};

/// Typed view of the fields we care about in a Slack event object.
#[derive(Debug, Clone, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    channel: Option<String>,
}

/// Decode one inbound payload into an envelope for dispatch.
///
/// `team_id` comes from the request headers, not the payload.
pub fn parse_event(team_id: &str, payload: &str) -> EventEnvelope {
    let value: serde_json::Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => return error_envelope(team_id, e.to_string(), payload),
    };

    // Events API wraps the event in an envelope; legacy posts send it bare.
    let event_value = value.get("event").cloned().unwrap_or(value);

    let raw: RawEvent = match serde_json::from_value(event_value.clone()) {
        Ok(raw) => raw,
        Err(e) => return error_envelope(team_id, e.to_string(), payload),
    };

    let kind = match (raw.event_type.as_str(), raw.subtype.as_deref()) {
        ("message", Some("channel_join")) => EventKind::ChannelJoin {
            joined_user_id: raw.user.clone().unwrap_or_default(),
        },
        ("message", None) => EventKind::Message {
            text: raw.text.clone().unwrap_or_default(),
        },
        _ => EventKind::Unknown {
            event_type: raw.event_type.clone(),
            raw: event_value,
        },
    };

    EventEnvelope {
        team_id: team_id.to_string(),
        channel_id: raw.channel,
        from_user_id: raw.user,
        kind,
    }
}

fn error_envelope(team_id: &str, message: String, received: &str) -> EventEnvelope {
    EventEnvelope {
        team_id: team_id.to_string(),
        channel_id: None,
        from_user_id: None,
        kind: EventKind::Error {
            message,
            received: received.to_string(),
        },
    }
}
