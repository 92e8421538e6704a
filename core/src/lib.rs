#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use host::*;
pub use map::*;
pub use player::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod host;
mod map;
mod player;
mod types;

/// Default map size, matching the classic 80x25 terminal.
pub const DEFAULT_SIZE: Coord2 = (80, 25);

/// Tunable numbers for box effects and player health.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Damage dealt when a player opens a box without a prize.
    pub trap_damage: u32,
    /// Maximum health new players start with.
    pub max_hitpoints: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            trap_damage: 30,
            max_hitpoints: DEFAULT_MAX_HITPOINTS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub size: Coord2,
    pub rules: Rules,
}

impl EngineConfig {
    pub const fn new_unchecked(size: Coord2, rules: Rules) -> Self {
        Self { size, rules }
    }

    pub fn new((size_x, size_y): Coord2, rules: Rules) -> Self {
        let size_x = size_x.clamp(1, MAX_DIMENSION);
        let size_y = size_y.clamp(1, MAX_DIMENSION);
        Self::new_unchecked((size_x, size_y), rules)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, Rules::default())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DigOutcome {
    NoChange,
    Dug,
}

impl DigOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Dug => true,
        }
    }
}

/// Used to merge outcomes when digging several cells in one go
impl BitOr for DigOutcome {
    type Output = DigOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::NoChange, Self::NoChange) => Self::NoChange,
            _ => Self::Dug,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// What a player got out of a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Prize,
    Trap { damage: u32 },
}

impl OpenOutcome {
    pub const fn is_prize(self) -> bool {
        matches!(self, Self::Prize)
    }
}
