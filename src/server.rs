//! Webhook receiver.
//!
//! `POST /slack/event` carries the per-team credential set in headers
//! (injected by the hosting proxy) and the event payload in the body —
//! JSON directly, or a form-encoded `event` parameter. Dispatch runs on
//! a spawned task so the HTTP response returns promptly; replies may
//! land after the 200 goes out.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;

use crate::dispatch::Dispatcher;
use crate::error::BotError;
use crate::slack::parse_event;
use crate::traits::TeamTokenStore;
use crate::types::BotIdentity;

/// Shared state for the webhook handlers.
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub token_store: Arc<dyn TeamTokenStore>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/slack/event", post(handle_slack_event))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn handle_slack_event(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    // The team id header is mandatory; without it there is no identity to
    // dispatch under. The classifier is never consulted.
    let identity = match identity_from_headers(&headers) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting request with missing identity headers");
            return (StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let team_id = identity.team_id.clone();
    state.token_store.set_token(identity).await;
    let Some(identity) = state.token_store.get_token_for_team(&team_id).await else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            BotError::UnknownTeam(team_id).to_string(),
        );
    };

    let Some(payload) = extract_event_payload(&headers, query.as_deref(), &body) else {
        return (StatusCode::NOT_FOUND, String::new());
    };

    let envelope = parse_event(&identity.team_id, &payload);
    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        dispatcher.dispatch(envelope, identity).await;
    });

    (StatusCode::OK, String::new())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Build the per-team identity from the proxy-injected headers.
///
/// Only the team id is mandatory; the remaining fields default to empty,
/// matching the original deployment's lenient header handling.
pub fn identity_from_headers(headers: &HeaderMap) -> Result<BotIdentity, BotError> {
    let team_id = header_value(headers, "Bb-Slackteamid")
        .ok_or(BotError::MissingHeader("Bb-Slackteamid"))?;

    Ok(BotIdentity {
        team_id: team_id.to_string(),
        access_token: header_value(headers, "Bb-Slackaccesstoken")
            .unwrap_or_default()
            .to_string(),
        user_id: header_value(headers, "Bb-Slackuserid")
            .unwrap_or_default()
            .to_string(),
        bot_access_token: header_value(headers, "Bb-Slackbotaccesstoken")
            .unwrap_or_default()
            .to_string(),
        bot_user_id: header_value(headers, "Bb-Slackbotuserid")
            .unwrap_or_default()
            .to_string(),
        bot_id: header_value(headers, "Bb-Slackbotid")
            .unwrap_or_default()
            .to_string(),
    })
}

/// Locate the event payload: a JSON body, a form-encoded `event` body
/// parameter, or (legacy verification) an `event` query parameter.
fn extract_event_payload(headers: &HeaderMap, query: Option<&str>, body: &Bytes) -> Option<String> {
    if !body.is_empty() {
        let is_form = header_value(headers, "content-type")
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        if is_form {
            return form_event_param(body);
        }
        return String::from_utf8(body.to_vec()).ok();
    }

    query.and_then(|q| form_event_param(q.as_bytes()))
}

fn form_event_param(raw: &[u8]) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "event")
        .map(|(_, value)| value)
}
