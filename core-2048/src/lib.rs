//! Grid primitives shared by the engine: coordinates, the tile grid, move
//! directions and the single-line merge.

pub mod direction;
pub mod grid;
pub mod line;

pub use direction::Direction;
pub use grid::{Coord, Grid};
pub use line::{merge_line, MergedLine};
