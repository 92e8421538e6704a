/// Single coordinate axis used for map width, height, and positions.
///
/// Signed so that hosts can hand over negative positions, which are then
/// rejected as out of bounds instead of wrapping around.
pub type Coord = i32;

/// Count type used for cell and box counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Largest width or height a map may have.
pub const MAX_DIMENSION: Coord = 4096;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates that were already bounds-checked.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}
