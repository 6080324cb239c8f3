use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("event parse error: {0}")]
    ParseError(String),

    #[error("message send failed: {0}")]
    SendFailed(String),

    #[error("membership lookup failed: {0}")]
    LookupFailed(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("no token stored for team {0}")]
    UnknownTeam(String),

    #[error("internal error: {0}")]
    Internal(String),
}
