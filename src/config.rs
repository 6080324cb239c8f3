use serde::{Deserialize, Serialize};

/// Runtime configuration for the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bind address for the webhook server.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Port for the webhook receiver server.
    #[serde(default = "default_webhook_port")]
    pub webhook_port: u16,
    /// Percent chance (d100 roll) of an ambient reply to an unmatched message.
    #[serde(default = "default_ambient_reply_percent")]
    pub ambient_reply_percent: u8,
    /// Slack app id of the companion bot (Statlerbot).
    #[serde(default = "default_companion_app_id")]
    pub companion_app_id: String,
    /// Install link offered when the companion bot is missing from a team.
    #[serde(default = "default_companion_install_url")]
    pub companion_install_url: String,
    /// Base URL for the Slack Web API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Timeout for outbound Slack API calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_webhook_port() -> u16 {
    3100
}

fn default_ambient_reply_percent() -> u8 {
    1
}

fn default_companion_app_id() -> String {
    "A0FL18L8H".to_string()
}

fn default_companion_install_url() -> String {
    "https://beepboophq.com/bots/083d21c8b3eb4886acf31f748337c1c2".to_string()
}

fn default_api_base() -> String {
    "https://slack.com/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            webhook_port: default_webhook_port(),
            ambient_reply_percent: default_ambient_reply_percent(),
            companion_app_id: default_companion_app_id(),
            companion_install_url: default_companion_install_url(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = BotConfig::default();
        assert_eq!(cfg.webhook_port, 3100);
        assert_eq!(cfg.bind_address, "0.0.0.0");
        assert_eq!(cfg.ambient_reply_percent, 1);
        assert_eq!(cfg.companion_app_id, "A0FL18L8H");
    }

    #[test]
    fn config_fields_default_when_absent() {
        let cfg: BotConfig = serde_json::from_str(r#"{"webhook_port": 9000}"#).unwrap();
        assert_eq!(cfg.webhook_port, 9000);
        assert_eq!(cfg.ambient_reply_percent, 1);
        assert_eq!(cfg.api_base, "https://slack.com/api");
    }
}
