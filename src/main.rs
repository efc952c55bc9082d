//! Diamond Bot - WebSocket client for the tick-based diamond capture game
//!
//! This is the main entry point for the bot. It handles:
//! - Connecting and registering with the game server
//! - Decoding each tick snapshot into the state model
//! - Invoking the pluggable strategy and replying with commands

mod bot;
mod config;
mod game;
mod ws;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::GreedyBot;
use crate::config::Config;
use crate::ws::run_session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Diamond Bot");

    let strategy = GreedyBot::new();
    run_session(&config, strategy).await?;

    // The match is over once the server closes the connection
    info!("Connection closed, shutting down");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
