//! Typed, validated view over one raw tick payload.
//!
//! A `GameTick` is deserialized fresh from every server message, queried by
//! the strategy for exactly one command batch, then discarded. The client
//! never mutates game state; the next snapshot is the only source of truth.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::GameError;

/// Grid coordinate. Signed so out-of-range values survive parsing and get
/// rejected by bounds checks instead of failing to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Tile types of the map grid, indexed `[x][y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tile {
    Empty,
    Wall,
    Spawn,
}

/// Position and interactions of a unit before this tick's resolution
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitLastState {
    pub position_before: Option<Position>,
    pub was_vined_by: Option<String>,
    pub was_attacked_by: Option<String>,
}

/// One controllable unit. `position` is undefined until a SPAWN resolves.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub team_id: String,
    pub position: Option<Position>,
    #[serde(default)]
    pub path: Vec<Position>,
    pub has_diamond: bool,
    pub diamond_id: Option<String>,
    pub has_spawned: bool,
    pub is_summoning: bool,
    #[serde(default)]
    pub last_state: Option<UnitLastState>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub score: i32,
    pub units: Vec<Unit>,
    /// Why the previous tick's commands were rejected. Informational only.
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diamond {
    pub id: String,
    pub position: Position,
    pub summon_level: u32,
    pub points: u32,
    /// Unit currently carrying this diamond, if any
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMap {
    pub tiles: Vec<Vec<Tile>>,
    pub diamonds: Vec<Diamond>,
}

/// Per-match constants, fixed for the whole match
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub points_per_diamond: u32,
    pub maximum_diamond_summon_level: u32,
    pub initial_diamond_summon_level: u32,
}

/// Full game snapshot for one tick
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTick {
    pub tick: u32,
    pub total_tick: u32,
    pub team_id: String,
    pub teams: Vec<Team>,
    pub map: GameMap,
    pub game_config: GameConfig,
    /// Command resolution order per tick, keyed by tick index. Retained
    /// verbatim for strategies that want lookahead tie-break reasoning.
    #[serde(default)]
    pub team_play_orderings: BTreeMap<u32, Vec<String>>,
}

impl GameTick {
    /// Horizontal size of the map, in tiles
    pub fn width(&self) -> i32 {
        self.map.tiles.len() as i32
    }

    /// Vertical size of the map, in tiles
    pub fn height(&self) -> i32 {
        self.map.tiles.first().map_or(0, |column| column.len() as i32)
    }

    /// Fails when the position is outside `[0, width) x [0, height)`
    pub fn validate_tile_exists(&self, position: Position) -> Result<(), GameError> {
        if position.x < 0
            || position.y < 0
            || position.x >= self.width()
            || position.y >= self.height()
        {
            return Err(GameError::OutOfBounds(position));
        }
        Ok(())
    }

    /// Tile at `position`. Bounds are checked before any grid index, even
    /// when the caller already trusts the value.
    pub fn tile_at(&self, position: Position) -> Result<Tile, GameError> {
        self.validate_tile_exists(position)?;
        Ok(self.map.tiles[position.x as usize][position.y as usize])
    }

    /// Teams keyed by id. Ids are unique, so every team gets one entry.
    pub fn teams_by_id(&self) -> HashMap<&str, &Team> {
        self.teams
            .iter()
            .map(|team| (team.id.as_str(), team))
            .collect()
    }

    /// The team this client controls. A payload without it is a protocol
    /// violation and fatal for the tick.
    pub fn my_team(&self) -> Result<&Team, GameError> {
        self.teams
            .iter()
            .find(|team| team.id == self.team_id)
            .ok_or_else(|| GameError::MissingTeam(self.team_id.clone()))
    }

    /// Every SPAWN tile, in row-major (x then y) scan order
    pub fn spawn_points(&self) -> Vec<Position> {
        let mut spawn_points = Vec::new();
        for (x, column) in self.map.tiles.iter().enumerate() {
            for (y, tile) in column.iter().enumerate() {
                if *tile == Tile::Spawn {
                    spawn_points.push(Position::new(x as i32, y as i32));
                }
            }
        }
        spawn_points
    }

    /// Resolution order of team commands for the current tick, when known
    pub fn current_play_ordering(&self) -> Option<&[String]> {
        self.team_play_orderings
            .get(&self.tick)
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> GameTick {
        // 3x2 grid with spawns at (0,1) and (2,1), a wall at (1,0)
        serde_json::from_value(serde_json::json!({
            "tick": 4,
            "totalTick": 100,
            "teamId": "team-a",
            "teams": [
                {
                    "id": "team-a",
                    "name": "Alpha",
                    "score": 10,
                    "units": [
                        {
                            "id": "u1",
                            "teamId": "team-a",
                            "position": {"x": 0, "y": 0},
                            "path": [],
                            "hasDiamond": false,
                            "diamondId": null,
                            "hasSpawned": true,
                            "isSummoning": false,
                            "lastState": {
                                "positionBefore": {"x": 0, "y": 0},
                                "wasVinedBy": null,
                                "wasAttackedBy": null
                            }
                        }
                    ],
                    "errors": ["unit u1: invalid move target"]
                },
                {
                    "id": "team-b",
                    "name": "Beta",
                    "score": 4,
                    "units": [],
                    "errors": []
                }
            ],
            "map": {
                "tiles": [
                    ["EMPTY", "SPAWN"],
                    ["WALL", "EMPTY"],
                    ["EMPTY", "SPAWN"]
                ],
                "diamonds": [
                    {
                        "id": "d1",
                        "position": {"x": 1, "y": 1},
                        "summonLevel": 1,
                        "points": 50,
                        "ownerId": null
                    }
                ]
            },
            "gameConfig": {
                "pointsPerDiamond": 50,
                "maximumDiamondSummonLevel": 5,
                "initialDiamondSummonLevel": 1
            },
            "teamPlayOrderings": {
                "4": ["team-b", "team-a"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn dimensions_derive_from_grid() {
        let tick = fixture();
        assert_eq!(tick.width(), 3);
        assert_eq!(tick.height(), 2);
    }

    #[test]
    fn tile_at_returns_grid_value_for_every_in_bounds_position() {
        let tick = fixture();
        for x in 0..tick.width() {
            for y in 0..tick.height() {
                let position = Position::new(x, y);
                let tile = tick.tile_at(position).unwrap();
                assert_eq!(tile, tick.map.tiles[x as usize][y as usize]);
            }
        }
        assert_eq!(tick.tile_at(Position::new(1, 0)).unwrap(), Tile::Wall);
    }

    #[test]
    fn tile_at_rejects_out_of_bounds_naming_the_point() {
        let tick = fixture();
        for position in [
            Position::new(3, 0),
            Position::new(0, 2),
            Position::new(-1, 0),
            Position::new(0, -1),
        ] {
            let err = tick.tile_at(position).unwrap_err();
            match err {
                GameError::OutOfBounds(p) => assert_eq!(p, position),
                other => panic!("unexpected error: {other}"),
            }
        }
        let message = tick.tile_at(Position::new(3, 0)).unwrap_err().to_string();
        assert!(message.contains("{3, 0}"), "message was: {message}");
    }

    #[test]
    fn spawn_points_are_row_major_and_idempotent() {
        let tick = fixture();
        let first = tick.spawn_points();
        assert_eq!(first, vec![Position::new(0, 1), Position::new(2, 1)]);
        assert_eq!(tick.spawn_points(), first);
    }

    #[test]
    fn teams_by_id_has_one_entry_per_team() {
        let tick = fixture();
        let by_id = tick.teams_by_id();
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id["team-a"].name, "Alpha");
        assert_eq!(by_id["team-b"].name, "Beta");
        assert_eq!(by_id[tick.team_id.as_str()].id, tick.team_id);
    }

    #[test]
    fn my_team_fails_when_own_team_is_missing() {
        let mut tick = fixture();
        tick.teams.retain(|team| team.id != "team-a");
        let err = tick.my_team().unwrap_err();
        assert!(matches!(err, GameError::MissingTeam(ref id) if id == "team-a"));
    }

    #[test]
    fn current_play_ordering_reads_the_current_tick_entry() {
        let tick = fixture();
        assert_eq!(
            tick.current_play_ordering().unwrap(),
            ["team-b".to_string(), "team-a".to_string()]
        );
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let tick: GameTick = serde_json::from_value(serde_json::json!({
            "tick": 0,
            "totalTick": 10,
            "teamId": "t",
            "teams": [{
                "id": "t",
                "name": "T",
                "score": 0,
                "units": [{
                    "id": "u",
                    "teamId": "t",
                    "position": null,
                    "hasDiamond": false,
                    "diamondId": null,
                    "hasSpawned": false,
                    "isSummoning": false
                }]
            }],
            "map": {"tiles": [["EMPTY"]], "diamonds": []},
            "gameConfig": {
                "pointsPerDiamond": 25,
                "maximumDiamondSummonLevel": 5,
                "initialDiamondSummonLevel": 1
            }
        }))
        .unwrap();

        let unit = &tick.teams[0].units[0];
        assert!(unit.position.is_none());
        assert!(unit.path.is_empty());
        assert!(unit.last_state.is_none());
        assert!(tick.team_play_orderings.is_empty());
        assert!(tick.current_play_ordering().is_none());
    }
}
