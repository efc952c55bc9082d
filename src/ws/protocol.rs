//! WebSocket protocol message definitions
//! These are the wire types for client-server communication

use serde::{Deserialize, Serialize};

use crate::game::{Position, UnitAction};

/// One entry in a COMMAND reply. Only the UNIT action type exists today;
/// the tag is kept so future non-unit action types stay representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "UNIT", rename_all = "camelCase")]
    Unit {
        action: UnitAction,
        unit_id: String,
        target: Position,
    },
}

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Registration, the first message on a fresh connection. Exactly one
    /// of `token` and `team_name` is populated.
    #[serde(rename = "REGISTER", rename_all = "camelCase")]
    Register {
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        team_name: Option<String>,
    },

    /// Per-tick command batch, tagged with the tick it answers
    #[serde(rename = "COMMAND")]
    Command { tick: u32, actions: Vec<Action> },
}

impl ClientMessage {
    /// Authenticated registration
    pub fn register_with_token(token: impl Into<String>) -> Self {
        Self::Register {
            token: Some(token.into()),
            team_name: None,
        }
    }

    /// Name-based registration
    pub fn register_with_team_name(team_name: impl Into<String>) -> Self {
        Self::Register {
            token: None,
            team_name: Some(team_name.into()),
        }
    }
}
