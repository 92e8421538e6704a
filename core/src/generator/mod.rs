use crate::*;
pub use rooms::*;
pub use scatter::*;

mod rooms;
mod scatter;

pub trait MapGenerator {
    /// Lays out terrain on `map`, reporting whether any cell changed.
    fn generate(self, map: &mut Map) -> DigOutcome;
}

/// Leaves the map as solid rock, for hosts that dig everything themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SolidGenerator;

impl MapGenerator for SolidGenerator {
    fn generate(self, _map: &mut Map) -> DigOutcome {
        DigOutcome::NoChange
    }
}
