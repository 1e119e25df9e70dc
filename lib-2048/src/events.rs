//! Notification payloads and the per-engine channel registry.
//!
//! Payloads own copies of the engine state they describe, so subscribers can
//! keep them around without aliasing the engine.

use crate::{
    channel::Channel,
    grid::{Coord, Grid},
    logic::Engine,
    Direction,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Restarted {
    pub cells: Grid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellsMoved {
    pub direction: Direction,
    pub cells: Grid,
    /// Distance travelled by the tile that started at each coordinate.
    pub shifts: Grid<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCreated {
    pub coord: Coord,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreUpdated {
    pub score: u64,
    /// Present only when this update set a new best score.
    pub best: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Events {
    pub restarted: Channel<Engine, Restarted>,
    pub moved_up: Channel<Engine, CellsMoved>,
    pub moved_down: Channel<Engine, CellsMoved>,
    pub moved_left: Channel<Engine, CellsMoved>,
    pub moved_right: Channel<Engine, CellsMoved>,
    pub cell_created: Channel<Engine, CellCreated>,
    pub score_updated: Channel<Engine, ScoreUpdated>,
    pub game_over: Channel<Engine, ()>,
}

impl Events {
    pub fn moved(&self, direction: Direction) -> &Channel<Engine, CellsMoved> {
        match direction {
            Direction::Up => &self.moved_up,
            Direction::Down => &self.moved_down,
            Direction::Left => &self.moved_left,
            Direction::Right => &self.moved_right,
        }
    }
}
