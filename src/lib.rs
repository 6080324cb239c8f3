//! Waldorfbot — a webhook-driven Slack heckler.
//!
//! Receives team events over HTTP, classifies them, and answers with
//! canned Muppet-balcony replies:
//!
//! - [`triggers`]: ordered table of anchored pattern → reply rules
//! - [`guard`]: keeps the bot from replying to itself
//! - [`dispatch`]: classifies each event and runs the matching handler
//! - [`ambient`]: the 1% random heckle for unmatched messages
//! - [`server`]: the `POST /slack/event` webhook entry point
//!
//! The Slack Web API client, token store, and HTTP plumbing are narrow
//! collaborators behind the traits in [`traits`].

pub mod ambient;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod server;
pub mod slack;
pub mod token_store;
pub mod traits;
pub mod triggers;
pub mod types;

pub use ambient::AmbientResponder;
pub use config::BotConfig;
pub use dispatch::Dispatcher;
pub use error::BotError;
pub use server::{router, AppState};
pub use slack::{parse_event, SlackApiClient};
pub use token_store::InMemoryTokenStore;
pub use traits::{ChatApi, Member, TeamTokenStore};
pub use triggers::{default_table, TriggerRule, TriggerTable};
pub use types::{BotIdentity, EventEnvelope, EventKind, Reply};
