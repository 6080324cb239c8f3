use serde::{Deserialize, Serialize};

/// Per-team bot identity, resolved through the token store.
///
/// The dispatch core only reads this record: the Identity Guard compares
/// sender ids against it, and reply posting borrows the bot access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    pub team_id: String,
    /// User token of whoever installed the app.
    pub access_token: String,
    /// Slack user id of the installer. Onboarding messages go here.
    pub user_id: String,
    /// Token the bot posts with.
    pub bot_access_token: String,
    pub bot_user_id: String,
    pub bot_id: String,
}

/// One decoded inbound event plus its team context.
///
/// Created per request, dispatched once, then discarded.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub team_id: String,
    pub channel_id: Option<String>,
    pub from_user_id: Option<String>,
    pub kind: EventKind,
}

/// Classified event kinds. Each maps to one dispatch arm.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// An ordinary channel message.
    Message { text: String },
    /// Someone joined a channel the bot can see.
    ChannelJoin { joined_user_id: String },
    /// An event type we don't handle. Kept raw for diagnostics.
    Unknown {
        event_type: String,
        raw: serde_json::Value,
    },
    /// The payload could not be decoded at all.
    Error { message: String, received: String },
}

/// An ordered sequence of reply lines for one channel.
///
/// Some trigger rules answer with more than one message; lines are posted
/// one `chat.postMessage` call each, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}
