use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whether an opened box held a prize.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxContents {
    Prize,
    Empty,
}

/// Grid of cells indexed as `[x, y]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    cells: Array2<Cell>,
    box_count: Saturating<CellCount>,
}

impl Map {
    /// Creates an all-wall map. Each axis is clamped to `1..=MAX_DIMENSION`.
    pub fn new((size_x, size_y): Coord2) -> Self {
        let size = (
            size_x.clamp(1, MAX_DIMENSION),
            size_y.clamp(1, MAX_DIMENSION),
        );
        if size != (size_x, size_y) {
            log::warn!(
                "Map size clamped, requested {}x{} but got {}x{}",
                size_x,
                size_y,
                size.0,
                size.1
            );
        }
        Self {
            cells: Array2::default(size.to_nd_index()),
            box_count: Saturating(0),
        }
    }

    /// Read from the grid itself, so a deserialized map can never disagree
    /// with its own cells.
    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn box_count(&self) -> CellCount {
        self.box_count.0
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (size_x, size_y) = self.size();
        x >= 0 && y >= 0 && x < size_x && y < size_y
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.in_bounds(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    /// All cells in column-major order, the same order `draw` emits them.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// Walkable cells, whether or not they hold a box.
    pub fn free_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_walkable())
            .map(|(coords, _)| coords)
    }

    /// Positions of boxes that can still be opened.
    pub fn unopened_boxes(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.has_unopened_box())
            .map(|(coords, _)| coords)
    }

    /// Whether a player may stand on `(x, y)`. Boxes do not block walking,
    /// players step onto them to open them.
    pub fn free_cell(&self, x: Coord, y: Coord) -> bool {
        self.cell_at((x, y)).is_some_and(Cell::is_walkable)
    }

    pub fn dig(&mut self, x: Coord, y: Coord) -> Result<DigOutcome> {
        let coords = self.validate_coords((x, y))?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.terrain {
            Terrain::Wall => {
                cell.terrain = Terrain::Dug;
                DigOutcome::Dug
            }
            Terrain::Floor | Terrain::Dug => DigOutcome::NoChange,
        })
    }

    /// Lays down generator floor. Cells that are already open keep their terrain.
    pub fn carve(&mut self, x: Coord, y: Coord) -> Result<DigOutcome> {
        let coords = self.validate_coords((x, y))?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.terrain {
            Terrain::Wall => {
                cell.terrain = Terrain::Floor;
                DigOutcome::Dug
            }
            Terrain::Floor | Terrain::Dug => DigOutcome::NoChange,
        })
    }

    pub fn place_box(&mut self, x: Coord, y: Coord) -> Result<()> {
        let coords = self.validate_coords((x, y))?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if !cell.is_walkable() {
            return Err(GameError::InvalidTransition);
        }
        if cell.container.is_some() {
            return Err(GameError::Occupied);
        }

        cell.container = Some(BoxState::default());
        self.box_count += 1;
        Ok(())
    }

    pub fn mark_prize(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        let coords = self.validate_coords((x, y))?;

        match &mut self.cells[coords.to_nd_index()].container {
            Some(BoxState { opened: true, .. }) | None => Err(GameError::InvalidTransition),
            Some(BoxState { prize: true, .. }) => Ok(MarkOutcome::NoChange),
            Some(state) => {
                state.prize = true;
                Ok(MarkOutcome::Changed)
            }
        }
    }

    /// Opens the box at `(x, y)`. The box stays on the cell in its opened state.
    pub fn open_box(&mut self, x: Coord, y: Coord) -> Result<BoxContents> {
        let coords = self.validate_coords((x, y))?;

        match &mut self.cells[coords.to_nd_index()].container {
            Some(state) if !state.opened => {
                state.opened = true;
                Ok(if state.prize {
                    BoxContents::Prize
                } else {
                    BoxContents::Empty
                })
            }
            _ => Err(GameError::InvalidTransition),
        }
    }

    pub fn glyph_at(&self, x: Coord, y: Coord) -> Option<&'static str> {
        self.cell_at((x, y)).map(Cell::glyph)
    }

    /// Emits a single cell. Coordinates off the map draw nothing.
    pub fn redraw_at<C: ?Sized>(&self, drawer: &impl Drawer<C>, context: &C, x: Coord, y: Coord) {
        if let Some(glyph) = self.glyph_at(x, y) {
            drawer.draw(context, x, y, glyph);
        }
    }

    /// Emits every cell of the grid.
    pub fn draw<C: ?Sized>(&self, drawer: &impl Drawer<C>, context: &C) {
        for ((x, y), cell) in self.iter_cells() {
            drawer.draw(context, x, y, cell.glyph());
        }
    }

    /// Collects the walkable cells, used by the random box scatter.
    pub(crate) fn free_cell_list(&self) -> Vec<Coord2> {
        self.free_cells()
            .filter(|&coords| self.cells[coords.to_nd_index()].container.is_none())
            .collect()
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use core::cell::RefCell;

    fn open_map(size: Coord2, open: &[Coord2]) -> Map {
        let mut map = Map::new(size);
        for &(x, y) in open {
            map.dig(x, y).unwrap();
        }
        map
    }

    #[derive(Default)]
    struct Canvas {
        drawn: RefCell<Vec<(Coord2, String)>>,
    }

    impl Drawer<()> for Canvas {
        fn draw(&self, _context: &(), x: Coord, y: Coord, glyph: &str) {
            self.drawn.borrow_mut().push(((x, y), glyph.to_string()));
        }
    }

    #[test]
    fn new_map_is_all_wall_and_clamped() {
        let map = Map::new((0, 3));
        assert_eq!(map.size(), (1, 3));
        assert_eq!(map.total_cells(), 3);
        assert!(map.iter_cells().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn out_of_bounds_is_never_free_and_rejected() {
        let mut map = open_map((3, 3), &[(0, 0)]);
        for coords in [(-1, 0), (0, -1), (3, 0), (0, 3), (Coord::MIN, Coord::MAX)] {
            assert!(!map.free_cell(coords.0, coords.1));
            assert_eq!(map.dig(coords.0, coords.1), Err(GameError::OutOfBounds));
            assert_eq!(map.place_box(coords.0, coords.1), Err(GameError::OutOfBounds));
            assert_eq!(map.mark_prize(coords.0, coords.1), Err(GameError::OutOfBounds));
            assert_eq!(map.open_box(coords.0, coords.1), Err(GameError::OutOfBounds));
        }
    }

    #[test]
    fn dig_is_one_way_and_idempotent() {
        let mut map = Map::new((3, 3));
        assert!(!map.free_cell(1, 1));

        assert_eq!(map.dig(1, 1), Ok(DigOutcome::Dug));
        assert_eq!(map.cell_at((1, 1)).unwrap().terrain, Terrain::Dug);
        assert!(map.free_cell(1, 1));

        let before = map.clone();
        assert_eq!(map.dig(1, 1), Ok(DigOutcome::NoChange));
        assert_eq!(map, before);
    }

    #[test]
    fn carve_does_not_overwrite_dug_cells() {
        let mut map = open_map((2, 1), &[(0, 0)]);
        assert_eq!(map.carve(0, 0), Ok(DigOutcome::NoChange));
        assert_eq!(map.carve(1, 0), Ok(DigOutcome::Dug));
        assert_eq!(map.cell_at((0, 0)).unwrap().terrain, Terrain::Dug);
        assert_eq!(map.cell_at((1, 0)).unwrap().terrain, Terrain::Floor);
        assert_eq!(map.dig(1, 0), Ok(DigOutcome::NoChange));
    }

    #[test]
    fn place_box_rejects_walls_and_occupied_cells_without_mutation() {
        let mut map = open_map((3, 1), &[(0, 0)]);

        let before = map.clone();
        assert_eq!(map.place_box(1, 0), Err(GameError::InvalidTransition));
        assert_eq!(map, before);

        assert_eq!(map.place_box(0, 0), Ok(()));
        assert_eq!(map.box_count(), 1);

        let before = map.clone();
        assert_eq!(map.place_box(0, 0), Err(GameError::Occupied));
        assert_eq!(map, before);
    }

    #[test]
    fn boxes_do_not_block_walking() {
        let mut map = open_map((1, 1), &[(0, 0)]);
        map.place_box(0, 0).unwrap();
        assert!(map.free_cell(0, 0));
    }

    #[test]
    fn opened_box_still_occupies_its_cell() {
        let mut map = open_map((1, 1), &[(0, 0)]);
        map.place_box(0, 0).unwrap();
        map.open_box(0, 0).unwrap();
        assert_eq!(map.place_box(0, 0), Err(GameError::Occupied));
    }

    #[test]
    fn mark_prize_requires_unopened_box() {
        let mut map = open_map((2, 1), &[(0, 0), (1, 0)]);
        assert_eq!(map.mark_prize(0, 0), Err(GameError::InvalidTransition));

        map.place_box(0, 0).unwrap();
        assert_eq!(map.mark_prize(0, 0), Ok(MarkOutcome::Changed));
        assert_eq!(map.mark_prize(0, 0), Ok(MarkOutcome::NoChange));

        map.open_box(0, 0).unwrap();
        assert_eq!(map.mark_prize(0, 0), Err(GameError::InvalidTransition));
    }

    #[test]
    fn open_box_reports_contents_once() {
        let mut map = open_map((2, 1), &[(0, 0), (1, 0)]);
        map.place_box(0, 0).unwrap();
        map.place_box(1, 0).unwrap();
        map.mark_prize(1, 0).unwrap();

        assert_eq!(map.open_box(0, 0), Ok(BoxContents::Empty));
        assert_eq!(map.open_box(1, 0), Ok(BoxContents::Prize));
        assert_eq!(map.open_box(1, 0), Err(GameError::InvalidTransition));
        assert_eq!(map.unopened_boxes().count(), 0);
    }

    #[test]
    fn open_box_on_bare_floor_is_invalid() {
        let mut map = open_map((1, 1), &[(0, 0)]);
        assert_eq!(map.open_box(0, 0), Err(GameError::InvalidTransition));
    }

    #[test]
    fn draw_emits_every_cell_and_redraw_one() {
        let mut map = open_map((2, 2), &[(1, 1)]);
        map.place_box(1, 1).unwrap();
        let canvas = Canvas::default();

        map.draw(&canvas, &());
        assert_eq!(canvas.drawn.borrow().len(), 4);
        assert!(canvas
            .drawn
            .borrow()
            .contains(&((1, 1), BOX_GLYPH.to_string())));

        canvas.drawn.borrow_mut().clear();
        map.redraw_at(&canvas, &(), 0, 1);
        map.redraw_at(&canvas, &(), 9, 9);
        assert_eq!(
            canvas.drawn.borrow().as_slice(),
            &[((0, 1), WALL_GLYPH.to_string())]
        );
    }

    #[test]
    fn deserialized_map_takes_its_size_from_the_cells() {
        let mut json = serde_json::to_value(Map::new((1, 1))).unwrap();
        json["size"] = serde_json::json!([5, 5]);
        let map: Map = serde_json::from_value(json).unwrap();

        assert_eq!(map.size(), (1, 1));
        assert_eq!(map.total_cells(), 1);
        assert!(!map.free_cell(3, 3));
        assert_eq!(map.glyph_at(3, 3), None);
    }

    #[test]
    fn free_cell_list_skips_boxes() {
        let mut map = open_map((3, 1), &[(0, 0), (1, 0)]);
        map.place_box(0, 0).unwrap();
        assert_eq!(map.free_cell_list(), alloc::vec![(1, 0)]);
    }
}
