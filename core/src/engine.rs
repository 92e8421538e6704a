use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// Owns the map and mediates every player interaction with it.
///
/// Each mutating call finishes its redraws and stat callbacks before it
/// returns. Players are borrowed per call, so several of them can share one
/// engine.
#[derive(Clone, Debug)]
pub struct Engine<D, C = ()> {
    map: Map,
    rules: Rules,
    drawer: D,
    context: C,
}

impl<D: Drawer<C>, C> Engine<D, C> {
    pub fn new(drawer: D, context: C) -> Self {
        Self::with_config(EngineConfig::default(), drawer, context)
    }

    pub fn with_config(config: EngineConfig, drawer: D, context: C) -> Self {
        log::debug!(
            "Engine created with a {}x{} map",
            config.size.0,
            config.size.1
        );
        Self {
            map: Map::new(config.size),
            rules: config.rules,
            drawer,
            context,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn drawer(&self) -> &D {
        &self.drawer
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn free_cell(&self, x: Coord, y: Coord) -> bool {
        self.map.free_cell(x, y)
    }

    /// Digger callback: a `value` of zero carves the cell, anything else
    /// leaves the wall standing.
    pub fn on_dig(&mut self, x: Coord, y: Coord, value: u32) -> Result<DigOutcome> {
        self.map.validate_coords((x, y))?;
        if value != 0 {
            return Ok(DigOutcome::NoChange);
        }

        let outcome = self.map.dig(x, y)?;
        if outcome.has_update() {
            self.redraw_at(x, y);
        }
        Ok(outcome)
    }

    pub fn draw_map(&self) {
        self.map.draw(&self.drawer, &self.context);
    }

    pub fn redraw_at(&self, x: Coord, y: Coord) {
        self.map.redraw_at(&self.drawer, &self.context, x, y);
    }

    pub fn place_box(&mut self, x: Coord, y: Coord) -> Result<()> {
        self.map.place_box(x, y).inspect_err(|err| {
            log::debug!("place_box at ({}, {}) rejected: {}", x, y, err);
        })?;
        self.redraw_at(x, y);
        Ok(())
    }

    pub fn mark_wasmprize(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        self.map.mark_prize(x, y)
    }

    /// Builds a player on a free cell using this engine's health rules.
    pub fn spawn_player<H, PC>(
        &self,
        x: Coord,
        y: Coord,
        name: impl Into<String>,
        team: impl Into<String>,
        host: H,
        context: PC,
    ) -> Result<PlayerCore<H, PC>> {
        self.map.validate_coords((x, y))?;
        if !self.map.free_cell(x, y) {
            return Err(GameError::Blocked);
        }
        Ok(PlayerCore::new(x, y, name, team, host, context)
            .with_max_hitpoints(self.rules.max_hitpoints))
    }

    /// Opens the box at `(x, y)` on behalf of `player`.
    ///
    /// A prize restores the player to full health and bumps their prize
    /// count, an empty box is a trap dealing [`Rules::trap_damage`]. Either
    /// way the player's stats are published once.
    pub fn open_box<H, PC>(
        &mut self,
        player: &mut PlayerCore<H, PC>,
        x: Coord,
        y: Coord,
    ) -> Result<OpenOutcome>
    where
        H: Drawer<PC> + StatsListener<PC>,
    {
        check_alive(player)?;
        let contents = self.map.open_box(x, y).inspect_err(|err| {
            log::debug!("open_box at ({}, {}) rejected: {}", x, y, err);
        })?;

        let outcome = match contents {
            BoxContents::Prize => {
                player.collect_prize();
                OpenOutcome::Prize
            }
            BoxContents::Empty => {
                let damage = self.rules.trap_damage;
                player.take_damage(damage);
                OpenOutcome::Trap { damage }
            }
        };
        log::debug!("{} opened box at ({}, {}): {:?}", player.name(), x, y, outcome);

        self.redraw_at(x, y);
        if player.position() == (x, y) {
            player.draw();
        }
        player.emit_stats();
        Ok(outcome)
    }

    /// Moves `player` onto a free cell. A rejected move leaves the player
    /// where it was and draws nothing.
    pub fn move_player<H, PC>(
        &mut self,
        player: &mut PlayerCore<H, PC>,
        x: Coord,
        y: Coord,
    ) -> Result<()>
    where
        H: Drawer<PC> + StatsListener<PC>,
    {
        check_alive(player)?;
        self.map.validate_coords((x, y))?;
        if !self.map.free_cell(x, y) {
            log::debug!("{} blocked at ({}, {})", player.name(), x, y);
            return Err(GameError::Blocked);
        }

        let (old_x, old_y) = player.position();
        player.move_to(x, y);
        self.redraw_at(old_x, old_y);
        self.redraw_at(x, y);
        player.draw();
        player.emit_stats();
        Ok(())
    }

    /// Runs a generator over the map and redraws the whole grid.
    pub fn generate(&mut self, generator: impl MapGenerator) -> DigOutcome {
        let outcome = generator.generate(&mut self.map);
        if outcome.has_update() {
            self.draw_map();
        }
        outcome
    }

    /// Places up to `count` boxes on random free cells and hides the prize in
    /// one of them. Returns the cells that received a box.
    pub fn scatter_boxes(&mut self, count: usize, seed: u64) -> Result<Vec<Coord2>> {
        let placed = BoxScatter::new(seed, count).scatter(&mut self.map)?;
        for &(x, y) in &placed {
            self.redraw_at(x, y);
        }
        Ok(placed)
    }
}

fn check_alive<H, PC>(player: &PlayerCore<H, PC>) -> Result<()> {
    if player.is_defeated() {
        log::debug!("{} is defeated, command rejected", player.name());
        Err(GameError::Defeated)
    } else {
        Ok(())
    }
}
