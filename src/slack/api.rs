//! Slack Web API client.
//!
//! Wraps `chat.postMessage`, `users.list` and `conversations.members`
//! behind the [`ChatApi`] trait. One pooled HTTP client with a bounded
//! timeout serves every team; the bot token is passed per call because
//! each inbound request may belong to a different team.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BotError;
use crate::traits::{ChatApi, Member};

#[derive(Clone)]
pub struct SlackApiClient {
    client: reqwest::Client,
    api_base: String,
}

/// Response from `chat.postMessage`.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Response from `users.list`.
#[derive(Debug, Deserialize)]
struct UsersListResponse {
    ok: bool,
    #[serde(default)]
    members: Vec<UserEntry>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    id: String,
    #[serde(default)]
    is_bot: bool,
    #[serde(default)]
    profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    api_app_id: Option<String>,
}

/// Response from `conversations.members`.
#[derive(Debug, Deserialize)]
struct ConversationMembersResponse {
    ok: bool,
    #[serde(default)]
    members: Vec<String>,
    error: Option<String>,
}

impl SlackApiClient {
    pub fn new(api_base: &str, timeout_secs: u64) -> Result<Self, BotError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BotError::Internal(format!("HTTP client init: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.api_base, method)
    }
}

#[async_trait]
impl ChatApi for SlackApiClient {
    async fn post_message(
        &self,
        token: &str,
        channel: &str,
        text: &str,
    ) -> Result<(), BotError> {
        let payload = serde_json::json!({
            "channel": channel,
            "text": text,
        });

        let resp = self
            .client
            .post(self.url("chat.postMessage"))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::SendFailed(format!("chat.postMessage failed: {}", e)))?;

        let posted: PostMessageResponse = resp
            .json()
            .await
            .map_err(|e| BotError::ParseError(format!("chat.postMessage parse: {}", e)))?;

        if !posted.ok {
            return Err(BotError::SendFailed(format!(
                "chat.postMessage rejected: {}",
                posted.error.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(())
    }

    async fn list_members(&self, token: &str) -> Result<Vec<Member>, BotError> {
        let resp = self
            .client
            .get(self.url("users.list"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BotError::LookupFailed(format!("users.list failed: {}", e)))?;

        let users: UsersListResponse = resp
            .json()
            .await
            .map_err(|e| BotError::ParseError(format!("users.list parse: {}", e)))?;

        if !users.ok {
            return Err(BotError::LookupFailed(format!(
                "users.list rejected: {}",
                users.error.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(users
            .members
            .into_iter()
            .map(|user| Member {
                id: user.id,
                is_bot: user.is_bot,
                api_app_id: user.profile.and_then(|p| p.api_app_id),
            })
            .collect())
    }

    async fn channel_members(
        &self,
        token: &str,
        channel: &str,
    ) -> Result<Vec<String>, BotError> {
        let resp = self
            .client
            .get(self.url("conversations.members"))
            .bearer_auth(token)
            .query(&[("channel", channel)])
            .send()
            .await
            .map_err(|e| BotError::LookupFailed(format!("conversations.members failed: {}", e)))?;

        let members: ConversationMembersResponse = resp
            .json()
            .await
            .map_err(|e| BotError::ParseError(format!("conversations.members parse: {}", e)))?;

        if !members.ok {
            return Err(BotError::LookupFailed(format!(
                "conversations.members rejected: {}",
                members.error.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(members.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_trailing_slash_normalized() {
        let client = SlackApiClient::new("https://slack.com/api/", 15).unwrap();
        assert_eq!(
            client.url("chat.postMessage"),
            "https://slack.com/api/chat.postMessage"
        );
    }

    #[test]
    fn users_list_response_deserialization() {
        let json = r#"{
            "ok": true,
            "members": [
                {"id": "U1", "is_bot": false},
                {"id": "U2", "is_bot": true, "profile": {"api_app_id": "A0FL18L8H"}}
            ]
        }"#;
        let resp: UsersListResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.members.len(), 2);
        assert!(resp.members[1].is_bot);
        assert_eq!(
            resp.members[1]
                .profile
                .as_ref()
                .and_then(|p| p.api_app_id.as_deref()),
            Some("A0FL18L8H")
        );
    }

    #[test]
    fn conversation_members_response_deserialization() {
        let json = r#"{"ok":true,"members":["U1","U2","U3"]}"#;
        let resp: ConversationMembersResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.members, vec!["U1", "U2", "U3"]);
    }

    #[test]
    fn post_message_error_response() {
        let json = r#"{"ok":false,"error":"channel_not_found"}"#;
        let resp: PostMessageResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("channel_not_found"));
    }
}
