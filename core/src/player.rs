use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

pub const DEFAULT_MAX_HITPOINTS: u32 = 100;

/// Snapshot handed to [`StatsListener::stats_updated`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub x: Coord,
    pub y: Coord,
    pub hitpoints: u32,
    pub max_hitpoints: u32,
    pub moves: u32,
    pub prizes: u32,
    pub defeated: bool,
}

/// One player on the map.
///
/// `H` is the host capability used to draw the player and publish its stats,
/// `C` is opaque host data handed back on every callback.
#[derive(Clone, Debug)]
pub struct PlayerCore<H, C = ()> {
    position: Coord2,
    name: String,
    team: String,
    hitpoints: u32,
    max_hitpoints: u32,
    moves: u32,
    prizes: u32,
    host: H,
    context: C,
}

impl<H, C> PlayerCore<H, C> {
    pub fn new(
        x: Coord,
        y: Coord,
        name: impl Into<String>,
        team: impl Into<String>,
        host: H,
        context: C,
    ) -> Self {
        Self {
            position: (x, y),
            name: name.into(),
            team: team.into(),
            hitpoints: DEFAULT_MAX_HITPOINTS,
            max_hitpoints: DEFAULT_MAX_HITPOINTS,
            moves: 0,
            prizes: 0,
            host,
            context,
        }
    }

    /// Sets a new maximum and refills health to it. Zero is bumped to one so
    /// a fresh player never starts out defeated.
    pub fn with_max_hitpoints(mut self, max_hitpoints: u32) -> Self {
        self.max_hitpoints = max_hitpoints.max(1);
        self.hitpoints = self.max_hitpoints;
        self
    }

    pub fn x(&self) -> Coord {
        self.position.0
    }

    pub fn y(&self) -> Coord {
        self.position.1
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn hitpoints(&self) -> u32 {
        self.hitpoints
    }

    pub fn max_hitpoints(&self) -> u32 {
        self.max_hitpoints
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn prizes(&self) -> u32 {
        self.prizes
    }

    pub fn is_defeated(&self) -> bool {
        self.hitpoints == 0
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            x: self.position.0,
            y: self.position.1,
            hitpoints: self.hitpoints,
            max_hitpoints: self.max_hitpoints,
            moves: self.moves,
            prizes: self.prizes,
            defeated: self.is_defeated(),
        }
    }

    /// Moves without any validation, callers check the map first.
    pub fn move_to(&mut self, x: Coord, y: Coord) {
        self.position = (x, y);
        self.moves = self.moves.saturating_add(1);
    }

    /// Returns the remaining health. Does not publish stats.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hitpoints = self.hitpoints.saturating_sub(amount);
        if self.is_defeated() {
            log::debug!("{} was defeated at {:?}", self.name, self.position);
        }
        self.hitpoints
    }

    /// Returns the health after healing, capped at the maximum. Defeat is
    /// terminal, a defeated player stays at zero.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_defeated() {
            return 0;
        }
        self.hitpoints = self
            .hitpoints
            .saturating_add(amount)
            .min(self.max_hitpoints);
        self.hitpoints
    }

    /// Applies a prize: full health and one more prize on the tally.
    /// Does nothing for a defeated player.
    pub fn collect_prize(&mut self) {
        if self.is_defeated() {
            return;
        }
        self.hitpoints = self.max_hitpoints;
        self.prizes = self.prizes.saturating_add(1);
    }
}

impl<H: Drawer<C>, C> PlayerCore<H, C> {
    pub fn draw(&self) {
        self.host.draw_overlay(
            &self.context,
            self.position.0,
            self.position.1,
            &self.name,
            &self.team,
        );
    }
}

impl<H: StatsListener<C>, C> PlayerCore<H, C> {
    pub fn emit_stats(&self) {
        self.host.stats_updated(&self.context, &self.stats());
    }
}
