use async_trait::async_trait;

use crate::error::BotError;
use crate::types::BotIdentity;

/// A workspace member as returned by the membership lookup.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: String,
    pub is_bot: bool,
    /// App id the bot user belongs to, when Slack exposes it.
    pub api_app_id: Option<String>,
}

/// Outbound Slack collaborator: posting replies and membership lookups.
///
/// Tokens are passed per call because each inbound request may belong to a
/// different team; the implementation keeps one pooled HTTP client.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Post one line of text to a channel (or to a user id for a DM).
    async fn post_message(&self, token: &str, channel: &str, text: &str)
        -> Result<(), BotError>;

    /// List all members of the workspace.
    async fn list_members(&self, token: &str) -> Result<Vec<Member>, BotError>;

    /// List the user ids present in a channel.
    async fn channel_members(&self, token: &str, channel: &str)
        -> Result<Vec<String>, BotError>;
}

/// Per-team credential store. The dispatch path only reads it.
#[async_trait]
pub trait TeamTokenStore: Send + Sync {
    async fn get_token_for_team(&self, team_id: &str) -> Option<BotIdentity>;
    async fn set_token(&self, identity: BotIdentity);
}
