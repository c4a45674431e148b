//! One traversal attempt from the start corner to the end corner.

use crate::model::{Direction, END_POS, Map, Position, START_POS};
use crate::state::damage::{CellDamage, apply_cell};
use crate::state::resistance::Resistances;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    None,
    Won,
    Lost,
}

/// What a move intent did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveResult {
    /// Ignored: run over, controls locked, or blocked by the grid edge.
    Ignored,
    Moved { to: Position, hit: CellDamage },
    ReachedEnd { to: Position },
    Died { to: Position, hit: CellDamage },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub position: Position,
    pub health: u32,
    pub controls_locked: bool,
    pub outcome: Outcome,
    map: Map,
    resistances: Resistances,
}

impl SessionState {
    /// Snapshots the map and resistances; neither changes for the run's lifetime.
    pub fn new(map: Map, resistances: Resistances, health: u32) -> Self {
        Self {
            position: START_POS,
            health,
            controls_locked: false,
            outcome: Outcome::None,
            map,
            resistances,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn resistances(&self) -> &Resistances {
        &self.resistances
    }

    pub fn is_active(&self) -> bool {
        self.outcome == Outcome::None && !self.controls_locked
    }

    pub fn step(&mut self, dir: Direction) -> MoveResult {
        if !self.is_active() {
            return MoveResult::Ignored;
        }
        let to = self.position.step(dir);
        if to == self.position {
            return MoveResult::Ignored;
        }
        self.position = to;
        if to == END_POS {
            self.outcome = Outcome::Won;
            return MoveResult::ReachedEnd { to };
        }
        let cell = self.map.cell(to);
        let resistance = match cell {
            crate::model::TerrainCell::Normal { element, .. } => self.resistances.get(*element),
            _ => 0.0,
        };
        let hit = apply_cell(cell, resistance);
        self.health = self.health.saturating_sub(hit.damage);
        if self.health == 0 {
            self.outcome = Outcome::Lost;
            self.controls_locked = true;
            return MoveResult::Died { to, hit };
        }
        MoveResult::Moved { to, hit }
    }
}
