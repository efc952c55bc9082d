//! Core game modules: state model and command encoding

pub mod command;
pub mod state;

pub use command::{encode_commands, UnitAction, UnitIntent};
pub use state::{
    Diamond, GameConfig, GameMap, GameTick, Position, Team, Tile, Unit, UnitLastState,
};

/// Validation errors raised by the state model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A queried position lies outside the grid. Never silently clamped.
    #[error("Point {{{}, {}}} is out of bounds!", .0.x, .0.y)]
    OutOfBounds(Position),

    /// The payload's `teams` list is missing the client's own team
    #[error("Own team {0} is missing from the tick payload")]
    MissingTeam(String),
}
