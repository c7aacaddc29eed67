use rand::Rng;

use super::state::Cell;

/// Dimensions of the board and cell <-> dense index conversion.
///
/// Dense indices are column-major: `col * rows + row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0
            && (cell.col as usize) < self.cols
            && cell.row >= 0
            && (cell.row as usize) < self.rows
    }

    /// Dense index of an in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.col as usize * self.rows + cell.row as usize)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index / self.rows) as i32, (index % self.rows) as i32)
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|idx| self.cell_at(idx))
    }
}

const NOT_FREE: usize = usize::MAX;

/// The set of cells not covered by the snake.
///
/// Free cells live in a vector with swap-remove deletion; `slot` maps each
/// dense index to its position in that vector, or `NOT_FREE`. Occupy, vacate
/// and uniform pick are all O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCells {
    grid: Grid,
    free: Vec<usize>,
    slot: Vec<usize>,
}

impl FreeCells {
    /// All cells of the grid start free
    pub fn new(grid: Grid) -> Self {
        let cell_count = grid.cell_count();
        Self {
            grid,
            free: (0..cell_count).collect(),
            slot: (0..cell_count).collect(),
        }
    }

    /// Free set for a grid with the given cells occupied
    pub fn excluding<'a>(grid: Grid, occupied: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut cells = Self::new(grid);
        for &cell in occupied {
            cells.occupy(cell);
        }
        cells
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.grid
            .index_of(cell)
            .is_some_and(|idx| self.slot[idx] != NOT_FREE)
    }

    /// Mark a cell as taken. Out-of-grid or already taken cells are ignored.
    pub fn occupy(&mut self, cell: Cell) {
        let Some(idx) = self.grid.index_of(cell) else {
            return;
        };
        let pos = self.slot[idx];
        if pos == NOT_FREE {
            return;
        }
        self.free.swap_remove(pos);
        self.slot[idx] = NOT_FREE;
        if let Some(&moved) = self.free.get(pos) {
            self.slot[moved] = pos;
        }
    }

    /// Return a cell to the free set. Out-of-grid or already free cells are ignored.
    pub fn vacate(&mut self, cell: Cell) {
        let Some(idx) = self.grid.index_of(cell) else {
            return;
        };
        if self.slot[idx] != NOT_FREE {
            return;
        }
        self.slot[idx] = self.free.len();
        self.free.push(idx);
    }

    /// Uniformly random free cell, `None` when the board is full
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.free.is_empty() {
            return None;
        }
        let idx = self.free[rng.gen_range(0..self.free.len())];
        Some(self.grid.cell_at(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.free.iter().map(|&idx| self.grid.cell_at(idx))
    }
}
