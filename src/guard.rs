//! Identity guard: stops the bot from replying to its own messages.
//!
//! Two cooperating heckler bots would otherwise chain replies forever.

use crate::types::{BotIdentity, EventEnvelope};

/// True when the event came from this bot's own identity for the team —
/// either its bot user id or its bot id.
pub fn is_self(envelope: &EventEnvelope, identity: &BotIdentity) -> bool {
    match envelope.from_user_id.as_deref() {
        Some(sender) => sender == identity.bot_user_id || sender == identity.bot_id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;

    fn identity() -> BotIdentity {
        BotIdentity {
            team_id: "T123".to_string(),
            access_token: "xoxp-test".to_string(),
            user_id: "U001".to_string(),
            bot_access_token: "xoxb-test".to_string(),
            bot_user_id: "U999".to_string(),
            bot_id: "B555".to_string(),
        }
    }

    fn envelope_from(user: Option<&str>) -> EventEnvelope {
        EventEnvelope {
            team_id: "T123".to_string(),
            channel_id: Some("C456".to_string()),
            from_user_id: user.map(str::to_string),
            kind: EventKind::Message {
                text: "Boo!".to_string(),
            },
        }
    }

    #[test]
    fn bot_user_id_is_self() {
        assert!(is_self(&envelope_from(Some("U999")), &identity()));
    }

    #[test]
    fn bot_id_is_self() {
        assert!(is_self(&envelope_from(Some("B555")), &identity()));
    }

    #[test]
    fn other_user_is_not_self() {
        assert!(!is_self(&envelope_from(Some("U777")), &identity()));
    }

    #[test]
    fn missing_sender_is_not_self() {
        assert!(!is_self(&envelope_from(None), &identity()));
    }
}
