//! Event classifier and dispatch.
//!
//! Each inbound envelope is classified and handled independently; no
//! state survives across events. Outbound calls go through the injected
//! [`ChatApi`] collaborator and their failures are logged and swallowed —
//! the worst observable outcome is a missing reply.

use std::sync::Arc;

use crate::ambient::AmbientResponder;
use crate::config::BotConfig;
use crate::guard::is_self;
use crate::traits::ChatApi;
use crate::triggers::TriggerTable;
use crate::types::{BotIdentity, EventEnvelope, EventKind, Reply};

/// Where the companion bot stands in this team and channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompanionPresence {
    InChannel,
    InstalledElsewhere,
    NotInstalled,
}

pub struct Dispatcher {
    table: Arc<TriggerTable>,
    ambient: Arc<AmbientResponder>,
    api: Arc<dyn ChatApi>,
    config: Arc<BotConfig>,
}

impl Dispatcher {
    pub fn new(
        table: Arc<TriggerTable>,
        ambient: Arc<AmbientResponder>,
        api: Arc<dyn ChatApi>,
        config: Arc<BotConfig>,
    ) -> Self {
        Self {
            table,
            ambient,
            api,
            config,
        }
    }

    /// Classify one envelope and run its handler to completion.
    pub async fn dispatch(&self, envelope: EventEnvelope, identity: BotIdentity) {
        match envelope.kind.clone() {
            EventKind::Message { text } => self.handle_message(&envelope, &identity, &text).await,
            EventKind::ChannelJoin { joined_user_id } => {
                self.handle_channel_join(&envelope, &identity, &joined_user_id)
                    .await
            }
            EventKind::Unknown { event_type, raw } => {
                self.handle_unknown(&identity, &event_type, &raw).await
            }
            EventKind::Error { message, received } => handle_error(&message, &received),
        }
    }

    /// Message arm: identity guard, trigger table, then the ambient roll.
    async fn handle_message(&self, envelope: &EventEnvelope, identity: &BotIdentity, text: &str) {
        tracing::debug!(team = %identity.team_id, "handling message: {}", text);

        let Some(channel) = envelope.channel_id.as_deref() else {
            tracing::warn!(team = %identity.team_id, "message event without a channel");
            return;
        };
        let from_self = is_self(envelope, identity);

        if let Some(rule) = self.table.find_match(text) {
            if rule.guarded && from_self {
                return;
            }
            self.post_reply(&identity.bot_access_token, channel, rule.reply())
                .await;
            return;
        }

        if from_self {
            return;
        }

        if let Some(phrase) = self.ambient.maybe_respond() {
            self.post_reply(&identity.bot_access_token, channel, Reply::single(phrase))
                .await;
        }
    }

    /// Channel-join arm: only reacts when the joiner is this bot, then greets
    /// (or summons) the companion bot depending on its presence.
    async fn handle_channel_join(
        &self,
        envelope: &EventEnvelope,
        identity: &BotIdentity,
        joined_user_id: &str,
    ) {
        if joined_user_id != identity.bot_user_id {
            return; // it wasn't us
        }
        let Some(channel) = envelope.channel_id.as_deref() else {
            return;
        };

        let token = &identity.bot_access_token;
        let text = match self.companion_presence(token, channel).await {
            Ok(CompanionPresence::InChannel) => "Statlerbot! There you are, old chum.".to_string(),
            Ok(CompanionPresence::InstalledElsewhere) => {
                "Statlerbot, where are you? Can someone invite Statlerbot into the channel?"
                    .to_string()
            }
            Ok(CompanionPresence::NotInstalled) => format!(
                "Statlerbot, where are you? Can someone <{}|install Statlerbot> into this team?",
                self.config.companion_install_url
            ),
            Err(e) => {
                tracing::warn!(team = %identity.team_id, error = %e, "companion lookup failed");
                return;
            }
        };

        self.post_reply(token, channel, Reply::single(text)).await;
    }

    /// Unknown arm: log it; a `bb.team_added` subtype kicks off onboarding.
    async fn handle_unknown(
        &self,
        identity: &BotIdentity,
        event_type: &str,
        raw: &serde_json::Value,
    ) {
        tracing::warn!(event_type, raw = %raw, "unknown event");

        if event_type != "bb.team_added" {
            return;
        }

        // We've just been added to the team. Message the app installer.
        let token = &identity.bot_access_token;
        self.post_reply(
            token,
            &identity.user_id,
            Reply::single("Thanks for installing me!"),
        )
        .await;

        let followup = match self.find_companion(token).await {
            Ok(Some(_)) => {
                "Just invite Statlerbot and me into any channel, and we'll get to heckling."
                    .to_string()
            }
            Ok(None) => format!(
                "Please also install <{}|my friend Statlerbot!>, then invite us into any channel to start heckling!",
                self.config.companion_install_url
            ),
            Err(e) => {
                tracing::warn!(team = %identity.team_id, error = %e, "companion lookup failed");
                return;
            }
        };

        self.post_reply(token, &identity.user_id, Reply::single(followup))
            .await;
    }

    /// Find the companion bot's user id in this workspace, if installed.
    async fn find_companion(&self, token: &str) -> Result<Option<String>, crate::error::BotError> {
        let members = self.api.list_members(token).await?;
        Ok(members
            .into_iter()
            .find(|member| {
                member.is_bot
                    && member.api_app_id.as_deref() == Some(self.config.companion_app_id.as_str())
            })
            .map(|member| member.id))
    }

    async fn companion_presence(
        &self,
        token: &str,
        channel: &str,
    ) -> Result<CompanionPresence, crate::error::BotError> {
        let Some(companion_id) = self.find_companion(token).await? else {
            return Ok(CompanionPresence::NotInstalled);
        };
        let members = self.api.channel_members(token, channel).await?;
        if members.iter().any(|id| id == &companion_id) {
            Ok(CompanionPresence::InChannel)
        } else {
            Ok(CompanionPresence::InstalledElsewhere)
        }
    }

    /// Post reply lines in order. A failed line is logged and the rest still go out.
    async fn post_reply(&self, token: &str, channel: &str, reply: Reply) {
        for line in &reply.lines {
            if let Err(e) = self.api.post_message(token, channel, line).await {
                tracing::warn!(channel, error = %e, "failed to post reply line");
            }
        }
    }
}

/// Error arm: report and stop. Never retried, never raises.
fn handle_error(message: &str, received: &str) {
    tracing::error!(received, "event error: {}", message);
}
