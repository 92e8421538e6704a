use alloc::vec::Vec;

use super::*;

const MIN_ROOM_SIDE: Coord = 2;
const MAX_ROOM_SIDE: Coord = 8;

/// Rectangular room in map coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub origin: Coord2,
    pub size: Coord2,
}

impl Room {
    pub const fn center(&self) -> Coord2 {
        (
            self.origin.0 + self.size.0 / 2,
            self.origin.1 + self.size.1 / 2,
        )
    }

    /// Overlap test that also counts touching rooms, so walls stay between them.
    pub const fn touches(&self, other: &Room) -> bool {
        self.origin.0 - 1 < other.origin.0 + other.size.0
            && other.origin.0 - 1 < self.origin.0 + self.size.0
            && self.origin.1 - 1 < other.origin.1 + other.size.1
            && other.origin.1 - 1 < self.origin.1 + self.size.1
    }

    fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (x0, y0) = self.origin;
        let (w, h) = self.size;
        (x0..x0 + w).flat_map(move |x| (y0..y0 + h).map(move |y| (x, y)))
    }
}

/// Carves random non-overlapping rooms joined by L-shaped corridors.
///
/// The same seed and map size always produce the same layout. At least one
/// room is carved even when every placement attempt fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomsGenerator {
    seed: u64,
    room_attempts: u32,
}

impl RoomsGenerator {
    pub fn new(seed: u64, room_attempts: u32) -> Self {
        Self {
            seed,
            room_attempts,
        }
    }

    /// Lays out the rooms for a map of `size` without touching any map.
    pub fn plan(&self, size: Coord2) -> Vec<Room> {
        use rand::prelude::*;

        let (area_origin, area_size) = inner_area(size);
        let max_w = area_size.0.min(MAX_ROOM_SIDE);
        let max_h = area_size.1.min(MAX_ROOM_SIDE);
        let min_w = MIN_ROOM_SIDE.min(max_w);
        let min_h = MIN_ROOM_SIDE.min(max_h);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..self.room_attempts {
            let w = rng.random_range(min_w..=max_w);
            let h = rng.random_range(min_h..=max_h);
            let x = rng.random_range(area_origin.0..=area_origin.0 + area_size.0 - w);
            let y = rng.random_range(area_origin.1..=area_origin.1 + area_size.1 - h);
            let room = Room {
                origin: (x, y),
                size: (w, h),
            };
            if rooms.iter().all(|other| !room.touches(other)) {
                rooms.push(room);
            }
        }

        if rooms.is_empty() {
            log::warn!("No room fit after {} attempts, carving one", self.room_attempts);
            rooms.push(Room {
                origin: area_origin,
                size: (min_w, min_h),
            });
        }
        rooms
    }
}

impl MapGenerator for RoomsGenerator {
    fn generate(self, map: &mut Map) -> DigOutcome {
        let rooms = self.plan(map.size());
        let mut outcome = DigOutcome::NoChange;

        for room in &rooms {
            for (x, y) in room.cells() {
                outcome = outcome | carve(map, x, y);
            }
        }
        for pair in rooms.windows(2) {
            let (from, to) = (pair[0].center(), pair[1].center());
            for x in from.0.min(to.0)..=from.0.max(to.0) {
                outcome = outcome | carve(map, x, from.1);
            }
            for y in from.1.min(to.1)..=from.1.max(to.1) {
                outcome = outcome | carve(map, to.0, y);
            }
        }

        log::debug!("Carved {} rooms with seed {}", rooms.len(), self.seed);
        outcome
    }
}

/// Leaves a one-cell wall border when the map is big enough for it.
fn inner_area((w, h): Coord2) -> (Coord2, Coord2) {
    let (x0, inner_w) = if w >= 3 { (1, w - 2) } else { (0, w) };
    let (y0, inner_h) = if h >= 3 { (1, h - 2) } else { (0, h) };
    ((x0, y0), (inner_w, inner_h))
}

fn carve(map: &mut Map, x: Coord, y: Coord) -> DigOutcome {
    map.carve(x, y).unwrap_or(DigOutcome::NoChange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_layout() {
        let mut a = Map::new((40, 20));
        let mut b = Map::new((40, 20));
        RoomsGenerator::new(42, 30).generate(&mut a);
        RoomsGenerator::new(42, 30).generate(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn rooms_stay_inside_the_border() {
        let mut map = Map::new((30, 15));
        RoomsGenerator::new(7, 40).generate(&mut map);

        let (w, h) = map.size();
        for ((x, y), cell) in map.iter_cells() {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                assert_eq!(cell.terrain, Terrain::Wall, "border cell ({x}, {y}) carved");
            }
        }
        assert!(map.free_cells().count() > 0);
    }

    #[test]
    fn planned_rooms_do_not_touch() {
        let rooms = RoomsGenerator::new(5, 50).plan((60, 30));
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.touches(b));
            }
        }
    }

    #[test]
    fn zero_attempts_still_carves_a_room() {
        let mut map = Map::new((10, 10));
        let outcome = RoomsGenerator::new(1, 0).generate(&mut map);
        assert_eq!(outcome, DigOutcome::Dug);
        assert_eq!(map.free_cells().count(), 4);
    }

    #[test]
    fn tiny_maps_are_handled() {
        let mut map = Map::new((1, 1));
        RoomsGenerator::new(9, 5).generate(&mut map);
        assert!(map.free_cell(0, 0));
    }

    #[test]
    fn every_room_is_reachable_along_corridors() {
        let mut map = Map::new((50, 25));
        let generator = RoomsGenerator::new(99, 25);
        let rooms = generator.plan(map.size());
        generator.generate(&mut map);

        for pair in rooms.windows(2) {
            let (from, to) = (pair[0].center(), pair[1].center());
            assert!(map.free_cell(to.0, from.1));
            assert!(map.free_cell(from.0, from.1));
            assert!(map.free_cell(to.0, to.1));
        }
    }

    #[test]
    fn solid_generator_changes_nothing() {
        let mut map = Map::new((4, 4));
        assert_eq!(SolidGenerator.generate(&mut map), DigOutcome::NoChange);
        assert_eq!(map.free_cells().count(), 0);
    }
}
