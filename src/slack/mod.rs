//! Slack-facing glue: inbound event decoding and the outbound Web API client.

pub mod api;
pub mod events;

pub use api::SlackApiClient;
pub use events::parse_event;
