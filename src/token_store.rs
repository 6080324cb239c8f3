//! Per-team credential storage.
//!
//! The reference deployment runs behind a proxy that injects the full
//! credential set on every request, so an in-memory map is enough; the
//! trait boundary leaves room for a persistent store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::traits::TeamTokenStore;
use crate::types::BotIdentity;

#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<String, BotIdentity>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamTokenStore for InMemoryTokenStore {
    async fn get_token_for_team(&self, team_id: &str) -> Option<BotIdentity> {
        self.tokens.read().await.get(team_id).cloned()
    }

    async fn set_token(&self, identity: BotIdentity) {
        self.tokens
            .write()
            .await
            .insert(identity.team_id.clone(), identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(team_id: &str, bot_user_id: &str) -> BotIdentity {
        BotIdentity {
            team_id: team_id.to_string(),
            access_token: "xoxp-test".to_string(),
            user_id: "U001".to_string(),
            bot_access_token: "xoxb-test".to_string(),
            bot_user_id: bot_user_id.to_string(),
            bot_id: "B123".to_string(),
        }
    }

    #[tokio::test]
    async fn set_then_get_roundtrip() {
        let store = InMemoryTokenStore::new();
        store.set_token(identity("T123", "U999")).await;

        let resolved = store.get_token_for_team("T123").await.unwrap();
        assert_eq!(resolved.bot_user_id, "U999");
    }

    #[tokio::test]
    async fn unknown_team_returns_none() {
        let store = InMemoryTokenStore::new();
        assert!(store.get_token_for_team("T404").await.is_none());
    }

    #[tokio::test]
    async fn later_set_replaces_earlier() {
        let store = InMemoryTokenStore::new();
        store.set_token(identity("T123", "U111")).await;
        store.set_token(identity("T123", "U222")).await;

        let resolved = store.get_token_for_team("T123").await.unwrap();
        assert_eq!(resolved.bot_user_id, "U222");
    }
}
