use crate::error::EngineError;

/// Construction parameters for an [`Engine`](crate::Engine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Seed for tile spawning. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Config {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            seed: None,
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Restart places two tiles, so anything smaller than two cells is
    /// rejected along with zero-sized grids.
    pub fn validate(&self) -> Result<(), EngineError> {
        let cells = self.rows.checked_mul(self.cols);

        match cells {
            Some(cells) if self.rows > 0 && self.cols > 0 && cells >= 2 => Ok(()),
            _ => Err(EngineError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(4, 4)
    }
}
