use serde::{Deserialize, Serialize};

pub const WALL_GLYPH: &str = "#";
pub const FLOOR_GLYPH: &str = ".";
pub const BOX_GLYPH: &str = "*";

/// Terrain of a single map cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Wall,
    /// Open ground laid down by a generator.
    Floor,
    /// Open ground carved out of a wall at runtime.
    Dug,
}

impl Terrain {
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Wall
    }
}

/// A container sitting on a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxState {
    pub prize: bool,
    pub opened: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub container: Option<BoxState>,
}

impl Cell {
    pub const fn is_walkable(self) -> bool {
        self.terrain.is_walkable()
    }

    pub const fn has_unopened_box(self) -> bool {
        matches!(self.container, Some(BoxState { opened: false, .. }))
    }

    /// Opened boxes are left behind but drawn as plain floor.
    pub const fn glyph(self) -> &'static str {
        match (self.terrain, self.container) {
            (Terrain::Wall, _) => WALL_GLYPH,
            (_, Some(BoxState { opened: false, .. })) => BOX_GLYPH,
            _ => FLOOR_GLYPH,
        }
    }
}
