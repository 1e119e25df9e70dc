use std::cell::{Cell, RefCell};

use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

use crate::{
    config::Config,
    error::EngineError,
    events::{CellCreated, CellsMoved, Events, Restarted, ScoreUpdated},
    grid::{Coord, Grid},
    line::merge_line,
    Direction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Another move was still in progress; nothing happened.
    Ignored,
    /// No tile could move or merge in that direction.
    Blocked,
    Moved { gained: u64 },
}

struct Board {
    cells: Grid,
    shifts: Grid<usize>,
    empty: FxHashSet<Coord>,
    score: u64,
    best: u64,
    game_over: bool,
}

impl Board {
    fn new(cells: Grid) -> Self {
        let shifts = Grid::new(cells.rows(), cells.cols());
        let empty = cells.empty_coords().collect();

        Self {
            cells,
            shifts,
            empty,
            score: 0,
            best: 0,
            game_over: false,
        }
    }

    fn reset(&mut self) {
        self.cells.fill(0);
        self.shifts.fill(0);
        self.empty.clear();
        self.empty.extend(self.cells.coords());
        self.score = 0;
        self.game_over = false;
    }

    /// Slides every line towards `direction`. Returns the points gained, or
    /// `None` when no cell changed.
    fn slide(&mut self, direction: Direction) -> Option<u64> {
        let (rows, cols) = (self.cells.rows(), self.cells.cols());
        let mut changed = false;
        let mut gained = 0;

        for index in 0..direction.line_count(rows, cols) {
            let coords: Vec<Coord> = direction.line(rows, cols, index).collect();
            let line: Vec<u32> = coords.iter().map(|&coord| self.cells[coord]).collect();

            let merged = merge_line(&line);
            gained += merged.score;

            let writes = coords.into_iter().zip(merged.values).zip(merged.shifts);

            for ((coord, value), shift) in writes {
                self.cells[coord] = value;
                self.shifts[coord] = shift;

                changed |= self.track_empty(coord, value);
            }
        }

        self.score += gained;

        changed.then_some(gained)
    }

    /// Keeps the empty-set in step with a write. A cell that was occupied
    /// and is now empty means something moved, which is what gets reported.
    fn track_empty(&mut self, coord: Coord, value: u32) -> bool {
        if value == 0 {
            self.empty.insert(coord)
        } else {
            self.empty.remove(&coord);
            false
        }
    }

    fn settle_score(&mut self) -> ScoreUpdated {
        let best = (self.score > self.best).then(|| {
            self.best = self.score;
            self.best
        });

        ScoreUpdated {
            score: self.score,
            best,
        }
    }
}

/// Releases the move lock on every exit path, unwinding included.
struct MoveGuard<'a> {
    locked: &'a Cell<bool>,
}

impl<'a> MoveGuard<'a> {
    fn acquire(locked: &'a Cell<bool>) -> Option<Self> {
        (!locked.replace(true)).then(|| Self { locked })
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.locked.set(false);
    }
}

/// Grid state plus the move, spawn and game-over rules.
///
/// All operations take `&self`: subscribers receive the engine as the sender
/// of every notification and may call back into it. Engine state is never
/// borrowed while a notification is being delivered.
pub struct Engine {
    board: RefCell<Board>,
    rng: RefCell<ChaCha8Rng>,
    locked: Cell<bool>,
    events: Events,
}

impl Engine {
    /// Creates an engine with an all-empty grid. Call [`Engine::restart`] to
    /// place the opening tiles.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self::from_board(config, Grid::new(config.rows, config.cols)))
    }

    /// Creates an engine starting from `cells` instead of an empty grid.
    pub fn with_grid(config: Config, cells: Grid) -> Result<Self, EngineError> {
        config.validate()?;

        if (cells.rows(), cells.cols()) != (config.rows, config.cols) {
            return Err(EngineError::GridMismatch {
                rows: config.rows,
                cols: config.cols,
                actual_rows: cells.rows(),
                actual_cols: cells.cols(),
            });
        }

        if let Some((coord, value)) = cells
            .iter()
            .find(|&(_, value)| value != 0 && (value == 1 || !value.is_power_of_two()))
        {
            return Err(EngineError::InvalidTile { coord, value });
        }

        Ok(Self::from_board(config, cells))
    }

    fn from_board(config: Config, cells: Grid) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        debug!(
            "engine created: {}x{}, seed {:?}",
            config.rows, config.cols, config.seed
        );

        Self {
            board: RefCell::new(Board::new(cells)),
            rng: RefCell::new(rng),
            locked: Cell::new(false),
            events: Events::default(),
        }
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn rows(&self) -> usize {
        self.board.borrow().cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.borrow().cells.cols()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn score(&self) -> u64 {
        self.board.borrow().score
    }

    pub fn best_score(&self) -> u64 {
        self.board.borrow().best
    }

    pub fn grid(&self) -> Grid {
        self.board.borrow().cells.clone()
    }

    /// Shift record of the most recent effective move.
    pub fn shifts(&self) -> Grid<usize> {
        self.board.borrow().shifts.clone()
    }

    /// The tracked empty-set, sorted row by row.
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut empty: Vec<_> = self.board.borrow().empty.iter().copied().collect();
        empty.sort_unstable();
        empty
    }

    pub fn is_moving(&self) -> bool {
        self.locked.get()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.borrow().game_over
    }

    /// Clears the grid and the current score, then places two tiles. The best
    /// score survives.
    pub fn restart(&self) -> Result<(), EngineError> {
        let cells = {
            let mut board = self.board.borrow_mut();
            board.reset();
            board.cells.clone()
        };

        info!("restarting {}x{} game", cells.rows(), cells.cols());
        self.events.restarted.publish(self, &Restarted { cells })?;

        self.create_random_cell()?;
        self.create_random_cell()?;

        Ok(())
    }

    pub fn move_up(&self) -> Result<MoveOutcome, EngineError> {
        self.shift(Direction::Up)
    }

    pub fn move_down(&self) -> Result<MoveOutcome, EngineError> {
        self.shift(Direction::Down)
    }

    pub fn move_left(&self) -> Result<MoveOutcome, EngineError> {
        self.shift(Direction::Left)
    }

    pub fn move_right(&self) -> Result<MoveOutcome, EngineError> {
        self.shift(Direction::Right)
    }

    /// Slides all tiles towards `direction`.
    ///
    /// A call made while another move is still running (for instance from a
    /// subscriber) returns [`MoveOutcome::Ignored`] without touching state.
    /// A move that changes nothing publishes nothing and spawns nothing.
    pub fn shift(&self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        let Some(_guard) = MoveGuard::acquire(&self.locked) else {
            trace!("{direction:?} ignored, move in progress");
            return Ok(MoveOutcome::Ignored);
        };

        let moved = {
            let mut board = self.board.borrow_mut();

            board.slide(direction).map(|gained| {
                let payload = CellsMoved {
                    direction,
                    cells: board.cells.clone(),
                    shifts: board.shifts.clone(),
                };

                (gained, payload)
            })
        };

        let Some((gained, payload)) = moved else {
            debug!("{direction:?} blocked");
            return Ok(MoveOutcome::Blocked);
        };

        debug!("{direction:?} moved, +{gained}");
        self.events.moved(direction).publish(self, &payload)?;

        let update = self.board.borrow_mut().settle_score();
        self.events.score_updated.publish(self, &update)?;

        self.create_random_cell()?;

        Ok(MoveOutcome::Moved { gained })
    }

    /// Places a 2 (probability 0.9) or a 4 on a uniformly chosen empty cell.
    ///
    /// Filling the last empty cell runs game-over detection.
    pub fn create_random_cell(&self) -> Result<CellCreated, EngineError> {
        let created = {
            let mut board = self.board.borrow_mut();
            let slot_count = board.empty.len();

            if slot_count == 0 {
                return Err(EngineError::NoEmptyCell);
            }

            let roll = self.rng.borrow_mut().gen_range(0..(slot_count * 10));
            let coord = board
                .empty
                .iter()
                .nth(roll / 10)
                .copied()
                .ok_or(EngineError::NoEmptyCell)?;
            let value = if roll % 10 == 0 { 4 } else { 2 };

            board.empty.remove(&coord);
            board.cells[coord] = value;

            CellCreated { coord, value }
        };

        trace!("spawned {} at {}", created.value, created.coord);
        self.events.cell_created.publish(self, &created)?;

        if self.board.borrow().empty.is_empty() {
            self.detect_game_over()?;
        }

        Ok(created)
    }

    /// Only called on a full grid, where an equal neighbour pair is the only
    /// thing that can still move.
    fn detect_game_over(&self) -> Result<(), EngineError> {
        let over = {
            let mut board = self.board.borrow_mut();
            board.game_over = !board.cells.has_equal_neighbours();
            board.game_over
        };

        if over {
            info!("game over, score {}", self.score());
            self.events.game_over.publish(self, &())?;
        }

        Ok(())
    }
}
