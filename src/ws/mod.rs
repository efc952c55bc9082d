//! WebSocket transport: wire messages and the tick session loop

pub mod client;
pub mod protocol;

pub use client::{run_session, TickRunner};
