//! Grid addressing.
//!
//! The grid is fixed at 4×4 cells spanning NDC `[-1, 1]²`. Cells are derived
//! on demand and never stored.

mod cell;

pub use cell::{GRID_DIM, GridCell, cells, center_of};
