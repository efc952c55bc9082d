//! Command encoding: per-unit intents into the outgoing wire envelope.
//!
//! The encoder is purely structural. It never checks an action against unit
//! state; the server is authoritative and reports violations through the
//! next tick's team `errors`.

use serde::{Deserialize, Serialize};

use super::Position;
use crate::ws::protocol::{Action, ClientMessage};

/// Actions a unit can take in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitAction {
    Spawn,
    Move,
    Summon,
    Drop,
    Vine,
    Attack,
    None,
}

/// One unit's intended action for the current tick. The protocol requires a
/// target position even for actions that do not logically need one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitIntent {
    pub unit_id: String,
    pub action: UnitAction,
    pub target: Position,
}

impl UnitIntent {
    pub fn new(unit_id: impl Into<String>, action: UnitAction, target: Position) -> Self {
        Self {
            unit_id: unit_id.into(),
            action,
            target,
        }
    }
}

/// Wrap a batch of intents into the COMMAND reply for `tick`. One action
/// entry per intent, each tagged `type: "UNIT"`, order preserved.
pub fn encode_commands(tick: u32, intents: Vec<UnitIntent>) -> ClientMessage {
    ClientMessage::Command {
        tick,
        actions: intents
            .into_iter()
            .map(|intent| Action::Unit {
                action: intent.action,
                unit_id: intent.unit_id,
                target: intent.target,
            })
            .collect(),
    }
}
