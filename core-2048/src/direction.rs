use crate::grid::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Up, Self::Down, Self::Right, Self::Left].into_iter()
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Number of independent lines a move in this direction touches: one per
    /// column for vertical moves, one per row for horizontal ones.
    pub const fn line_count(self, rows: usize, cols: usize) -> usize {
        if self.is_vertical() {
            cols
        } else {
            rows
        }
    }

    /// Coordinates of line `index`, ordered from the edge the tiles slide
    /// towards to the opposite edge.
    pub fn line(self, rows: usize, cols: usize, index: usize) -> impl Iterator<Item = Coord> {
        let len = if self.is_vertical() { rows } else { cols };

        (0..len).map(move |k| match self {
            Self::Up => Coord::new(k, index),
            Self::Down => Coord::new(rows - 1 - k, index),
            Self::Left => Coord::new(index, k),
            Self::Right => Coord::new(index, cols - 1 - k),
        })
    }
}
