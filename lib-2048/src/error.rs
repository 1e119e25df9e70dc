use thiserror::Error;

use crate::{channel::BoxError, grid::Coord};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a grid of {rows}x{cols} needs at least two cells")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("starting grid is {actual_rows}x{actual_cols}, expected {rows}x{cols}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
    #[error("cell {coord} holds {value}, which is not a tile value")]
    InvalidTile { coord: Coord, value: u32 },
    #[error("no empty cell left to spawn a tile into")]
    NoEmptyCell,
    #[error("notification handler failed: {0}")]
    Subscriber(#[from] BoxError),
}
