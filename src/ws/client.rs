//! Connection handling and the per-tick processing loop.
//!
//! One connection, one in-flight tick at a time. Registration is the first
//! outbound message; afterwards every inbound text frame is one full game
//! snapshot and produces at most one COMMAND reply, tagged with the same
//! tick so the server can correlate them. A lost connection ends the match;
//! reconnection is deliberately not attempted here.

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::bot::Strategy;
use crate::config::Config;
use crate::game::{encode_commands, GameError, GameTick};
use crate::ws::protocol::ClientMessage;

/// Errors that make one tick unanswerable
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Inbound payload failed to parse or misses required fields
    #[error("Malformed tick payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The payload violates a protocol invariant (e.g. own team missing)
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Loop phase; `Processing` spans the handling of exactly one payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingTick,
    Processing,
}

/// Drives one tick iteration: payload in, state model, strategy, reply out.
/// Owns no game logic and holds no game state across ticks.
pub struct TickRunner<S> {
    strategy: S,
    phase: Phase,
}

impl<S: Strategy> TickRunner<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            phase: Phase::AwaitingTick,
        }
    }

    /// Process one raw tick payload into the COMMAND reply.
    ///
    /// `Err` means no reply may be sent for this tick: either the payload
    /// was malformed or the client's own team was absent. A failing
    /// strategy is not an error here; it degrades to an empty batch.
    pub fn handle_payload(&mut self, raw: &str) -> Result<ClientMessage, ClientError> {
        self.phase = Phase::Processing;
        let result = self.process(raw);
        self.phase = Phase::AwaitingTick;
        result
    }

    fn process(&mut self, raw: &str) -> Result<ClientMessage, ClientError> {
        let tick: GameTick = serde_json::from_str(raw)?;
        let team = tick.my_team()?;

        info!(tick = tick.tick, total_tick = tick.total_tick, "Playing tick");
        for rejection in &team.errors {
            warn!(tick = tick.tick, "Bot command error: {rejection}");
        }

        let intents = match self.strategy.decide(&tick) {
            Ok(intents) => intents,
            Err(e) => {
                error!(tick = tick.tick, error = %e, "Strategy failed, sending empty batch");
                Vec::new()
            }
        };

        Ok(encode_commands(tick.tick, intents))
    }
}

/// Connect, register, and run the tick loop until the connection closes
pub async fn run_session(config: &Config, strategy: impl Strategy) -> anyhow::Result<()> {
    info!(url = %config.server_url, "Connecting to game server");
    let (socket, _) = connect_async(config.server_url.as_str()).await?;
    let (mut sink, mut stream) = socket.split();

    // Registration must be the first outbound message on the connection
    let registration = match &config.token {
        Some(token) => {
            info!("Registering with token");
            ClientMessage::register_with_token(token)
        }
        None => {
            info!(team_name = %config.team_name, "Registering with team name");
            ClientMessage::register_with_team_name(&config.team_name)
        }
    };
    sink.send(Message::Text(serde_json::to_string(&registration)?))
        .await?;

    let mut runner = TickRunner::new(strategy);

    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => match runner.handle_payload(&text) {
                Ok(reply) => {
                    sink.send(Message::Text(serde_json::to_string(&reply)?))
                        .await?;
                }
                Err(e) => {
                    // Fatal for this tick only; wait for the next payload
                    error!(error = %e, "Dropping tick without a reply");
                }
            },
            Message::Binary(_) => {
                warn!("Received binary message, ignoring");
            }
            Message::Ping(_) | Message::Pong(_) => {
                debug!("Received keepalive frame");
            }
            Message::Close(_) => {
                info!("Server closed the connection");
                break;
            }
            Message::Frame(_) => {}
        }
    }

    info!("Session ended");
    Ok(())
}
