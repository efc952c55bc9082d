//! Pluggable decision logic.
//!
//! The tick loop only knows this trait; any implementation producing one
//! intent batch per tick can be swapped in without touching transport code.

pub mod greedy;

pub use greedy::GreedyBot;

use crate::game::{GameTick, UnitIntent};

/// Decision function invoked once per tick with the fresh state snapshot.
///
/// A returned `Err` never crashes the loop: it is logged and replaced with
/// an empty action batch so the reply still makes the tick deadline.
pub trait Strategy {
    fn decide(&mut self, tick: &GameTick) -> anyhow::Result<Vec<UnitIntent>>;
}
