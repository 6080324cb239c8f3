use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};

use waldorfbot::{
    default_table, router, AmbientResponder, AppState, BotConfig, BotError, Dispatcher,
    InMemoryTokenStore, SlackApiClient,
};

#[derive(Parser)]
#[command(name = "waldorfbot", about = "Slack heckler bot webhook receiver")]
struct Cli {
    /// Bind address for the webhook server
    #[arg(long)]
    bind_address: Option<String>,

    /// Port for the webhook server
    #[arg(short, long)]
    port: Option<u16>,

    /// Percent chance of an ambient reply to an unmatched message
    #[arg(long)]
    ambient_reply_percent: Option<u8>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), BotError> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = BotConfig::default();
    if let Some(bind_address) = cli.bind_address {
        config.bind_address = bind_address;
    }
    if let Some(port) = cli.port {
        config.webhook_port = port;
    }
    if let Some(percent) = cli.ambient_reply_percent {
        config.ambient_reply_percent = percent;
    }
    let config = Arc::new(config);

    let table = Arc::new(default_table()?);
    info!(rules = table.len(), "trigger table loaded");

    let ambient = Arc::new(AmbientResponder::new(config.ambient_reply_percent));
    let api = Arc::new(SlackApiClient::new(
        &config.api_base,
        config.request_timeout_secs,
    )?);
    let dispatcher = Arc::new(Dispatcher::new(table, ambient, api, config.clone()));

    let state = Arc::new(AppState {
        dispatcher,
        token_store: Arc::new(InMemoryTokenStore::new()),
    });

    let addr = format!("{}:{}", config.bind_address, config.webhook_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BotError::Connection(format!("bind failed: {}", e)))?;

    info!(addr = %addr, "waldorfbot webhook server listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| BotError::Connection(format!("server error: {}", e)))?;

    Ok(())
}
