//! Default strategy: spawn, chase the nearest free diamond, summon it up,
//! drop before the match ends. No path-finding; the server walks units
//! toward whatever destination we send.

use rand::Rng;
use tracing::debug;

use crate::bot::Strategy;
use crate::game::{Diamond, GameTick, Position, Tile, Unit, UnitAction, UnitIntent};

/// Ticks of margin kept before match end so a summon can still pay off
const SUMMON_CUTOFF_TICKS: u32 = 7;

/// Greedy diamond-chasing bot, the shipped baseline strategy
#[derive(Debug, Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        debug!("Initializing greedy bot");
        Self
    }

    fn random_position(&self, tick: &GameTick) -> Position {
        let mut rng = rand::thread_rng();
        Position::new(
            rng.gen_range(0..tick.width().max(1)),
            rng.gen_range(0..tick.height().max(1)),
        )
    }

    fn random_spawn_point(&self, tick: &GameTick) -> Option<Position> {
        let spawns = tick.spawn_points();
        if spawns.is_empty() {
            return None;
        }
        let mut rng = rand::thread_rng();
        Some(spawns[rng.gen_range(0..spawns.len())])
    }

    fn nearest_free_diamond<'a>(&self, tick: &'a GameTick, from: Position) -> Option<&'a Diamond> {
        tick.map
            .diamonds
            .iter()
            .filter(|diamond| diamond.owner_id.is_none())
            .min_by_key(|diamond| {
                let dx = (diamond.position.x - from.x) as i64;
                let dy = (diamond.position.y - from.y) as i64;
                dx * dx + dy * dy
            })
    }

    /// First adjacent EMPTY tile, scanning left, right, up, down
    fn free_adjacent_tile(&self, tick: &GameTick, position: Position) -> Option<Position> {
        let candidates = [
            Position::new(position.x - 1, position.y),
            Position::new(position.x + 1, position.y),
            Position::new(position.x, position.y - 1),
            Position::new(position.x, position.y + 1),
        ];
        candidates
            .into_iter()
            .find(|candidate| tick.tile_at(*candidate) == Ok(Tile::Empty))
    }

    fn carried_diamond_is_maxed(&self, tick: &GameTick, unit: &Unit) -> bool {
        let Some(diamond_id) = &unit.diamond_id else {
            return false;
        };
        tick.map
            .diamonds
            .iter()
            .any(|diamond| {
                &diamond.id == diamond_id
                    && diamond.summon_level >= tick.game_config.maximum_diamond_summon_level
            })
    }

    fn intent_for(&self, tick: &GameTick, unit: &Unit) -> UnitIntent {
        if !unit.has_spawned {
            let target = self
                .random_spawn_point(tick)
                .unwrap_or_else(|| self.random_position(tick));
            return UnitIntent::new(&unit.id, UnitAction::Spawn, target);
        }

        let Some(position) = unit.position else {
            // Spawned but no resolved position yet; nothing sensible to do
            return UnitIntent::new(&unit.id, UnitAction::None, Position::new(0, 0));
        };

        if !unit.has_diamond {
            return match self.nearest_free_diamond(tick, position) {
                Some(diamond) => UnitIntent::new(&unit.id, UnitAction::Move, diamond.position),
                None => UnitIntent::new(&unit.id, UnitAction::Move, self.random_position(tick)),
            };
        }

        // Carrying: drop on the final tick so the points bank
        if tick.tick + 1 >= tick.total_tick {
            let target = self.free_adjacent_tile(tick, position).unwrap_or(position);
            return UnitIntent::new(&unit.id, UnitAction::Drop, target);
        }

        if tick.tick + SUMMON_CUTOFF_TICKS < tick.total_tick
            && !unit.is_summoning
            && !self.carried_diamond_is_maxed(tick, unit)
        {
            return UnitIntent::new(&unit.id, UnitAction::Summon, position);
        }

        UnitIntent::new(&unit.id, UnitAction::Move, self.random_position(tick))
    }
}

impl Strategy for GreedyBot {
    fn decide(&mut self, tick: &GameTick) -> anyhow::Result<Vec<UnitIntent>> {
        let team = tick.my_team()?;
        Ok(team
            .units
            .iter()
            .map(|unit| self.intent_for(tick, unit))
            .collect())
    }
}
