use alloc::vec::Vec;

use super::*;

/// Drops boxes on random free cells and hides a single prize among them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxScatter {
    seed: u64,
    count: usize,
}

impl BoxScatter {
    pub fn new(seed: u64, count: usize) -> Self {
        Self { seed, count }
    }

    /// Returns the cells that received a box, in placement order.
    pub fn scatter(self, map: &mut Map) -> Result<Vec<Coord2>> {
        use rand::prelude::*;

        let mut cells = map.free_cell_list();
        if cells.len() < self.count {
            log::warn!(
                "Not enough free cells for boxes, requested {} but only fits {}",
                self.count,
                cells.len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        cells.shuffle(&mut rng);
        cells.truncate(self.count);

        for &(x, y) in &cells {
            map.place_box(x, y)?;
        }
        if let Some(&(x, y)) = cells.choose(&mut rng) {
            map.mark_prize(x, y)?;
        }
        Ok(cells)
    }
}
