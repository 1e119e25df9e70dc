use std::{
    fmt,
    ops::{Index, IndexMut},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Fixed-size rectangular grid stored in row-major order.
///
/// `Grid<u32>` holds tile values (`0` for an empty cell); `Grid<usize>` is
/// used for the per-move shift record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T = u32> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![T::default(); rows * cols],
        }
    }

    /// Builds a grid from nested rows. Returns `None` when there are no rows,
    /// no columns, or the rows differ in length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first()?.as_ref().len();

        if cols == 0 || rows.iter().any(|row| row.as_ref().len() != cols) {
            return None;
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();

        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, coord: Coord) -> Option<T> {
        (coord.row < self.rows && coord.col < self.cols).then(|| self.cells[self.offset(coord)])
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;

        (0..self.rows * cols).map(move |i| Coord::new(i / cols, i % cols))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }

    const fn offset(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }
}

impl Grid<u32> {
    pub fn empty_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|&(_, value)| value == 0)
            .map(|(coord, _)| coord)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Whether any cell has an orthogonal neighbour holding the same value.
    ///
    /// On a full grid this is the only way a move can still have an effect.
    pub fn has_equal_neighbours(&self) -> bool {
        let horizontal = (0..self.rows).any(|r| self.row(r).windows(2).any(|w| w[0] == w[1]));

        let vertical = (1..self.rows).any(|r| {
            self.row(r - 1)
                .iter()
                .zip(self.row(r))
                .any(|(above, below)| above == below)
        });

        horizontal || vertical
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &T {
        assert!(coord.col < self.cols, "column {} out of range", coord.col);
        &self.cells[coord.row * self.cols + coord.col]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut T {
        assert!(coord.col < self.cols, "column {} out of range", coord.col);
        &mut self.cells[coord.row * self.cols + coord.col]
    }
}
