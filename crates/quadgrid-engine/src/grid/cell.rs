use crate::coords::Vec2;

/// Number of rows and columns.
pub const GRID_DIM: usize = 4;

/// Center coordinate (NDC) of grid line `i` in `0..4`.
#[inline]
pub fn center_of(i: usize) -> f32 {
    debug_assert!(i < GRID_DIM);
    -0.75 + 0.5 * i as f32
}

/// A `(row, col)` address. Row 0 is the top row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Resting center of the cell. Rows are inverted so row 0 renders on top.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(center_of(self.col), center_of(GRID_DIM - 1 - self.row))
    }
}

/// Iterates every cell in draw order: row-major, top row first, left to right.
pub fn cells() -> impl Iterator<Item = GridCell> {
    (0..GRID_DIM).flat_map(|row| (0..GRID_DIM).map(move |col| GridCell::new(row, col)))
}
