//! Hamiltonian tours over the grid.
//!
//! A [`Cycle`] is a bijective successor map on the cells of a grid whose
//! single orbit covers every cell. The bot never leaves it, which is what makes
//! self-collision impossible: the body is always a contiguous run of tour
//! order, and the head only ever steps onto the cell the tail is vacating or
//! onto a free cell.

use serde::{Deserialize, Serialize};

use super::{
    error::{GameError, Result},
    grid::Grid,
    state::Cell,
};

/// How the tour is laid over the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CycleShape {
    /// Column-by-column zig-zag closed by a jump from the last cell back to
    /// `(0, 0)`. Needs an even column count.
    Serpentine,
    /// Zig-zag over rows `1..` with row 0 kept as the return lane, so every
    /// step including the closing one is a unit move. Needs one even side.
    #[default]
    Closed,
}

/// A Hamiltonian cycle over an R×C grid, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    grid: Grid,
    shape: CycleShape,
    /// Cells in tour order, starting at (0, 0)
    order: Vec<Cell>,
    /// Dense cell index -> position in `order`
    position: Vec<usize>,
}

impl Cycle {
    /// Build the default (closed) tour
    pub fn build(rows: usize, cols: usize) -> Result<Self> {
        Self::with_shape(CycleShape::Closed, rows, cols)
    }

    /// Build the column serpentine with a wrap-around closing edge
    pub fn serpentine(rows: usize, cols: usize) -> Result<Self> {
        Self::with_shape(CycleShape::Serpentine, rows, cols)
    }

    pub fn with_shape(shape: CycleShape, rows: usize, cols: usize) -> Result<Self> {
        let invalid = |reason| GameError::InvalidGrid { rows, cols, reason };

        if rows == 0 || cols == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        if rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(invalid("dimensions exceed the cell coordinate range"));
        }
        match rows.checked_mul(cols) {
            None => return Err(invalid("cell count overflows")),
            Some(cells) if cells < 4 => return Err(invalid("a tour needs at least 4 cells")),
            Some(_) => {}
        }

        let order = match shape {
            CycleShape::Serpentine => {
                if cols % 2 != 0 {
                    return Err(invalid("serpentine tour needs an even column count"));
                }
                serpentine_order(rows, cols)
            }
            CycleShape::Closed => {
                if rows < 2 || cols < 2 {
                    return Err(invalid("closed tour needs at least 2 rows and 2 columns"));
                }
                if cols % 2 == 0 {
                    comb_order(cols, rows, |lane, step| Cell::new(lane, step))
                } else if rows % 2 == 0 {
                    comb_order(rows, cols, |lane, step| Cell::new(step, lane))
                } else {
                    return Err(invalid("no closed tour exists when both dimensions are odd"));
                }
            }
        };

        let grid = Grid::new(rows, cols);
        let mut position = vec![0; grid.cell_count()];
        for (i, &cell) in order.iter().enumerate() {
            if let Some(idx) = grid.index_of(cell) {
                position[idx] = i;
            }
        }

        debug_assert_eq!(order.len(), grid.cell_count());
        Ok(Self {
            grid,
            shape,
            order,
            position,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn shape(&self) -> CycleShape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    pub fn cols(&self) -> usize {
        self.grid.cols
    }

    /// Number of cells on the tour, always `rows * cols`
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cells in tour order starting at (0, 0)
    pub fn order(&self) -> &[Cell] {
        &self.order
    }

    /// Position of a cell in tour order, `None` outside the grid
    pub fn position(&self, cell: Cell) -> Option<usize> {
        self.grid.index_of(cell).map(|idx| self.position[idx])
    }

    /// Successor of `cell` on the tour.
    ///
    /// # Panics
    ///
    /// Panics if `cell` lies outside the grid.
    pub fn next(&self, cell: Cell) -> Cell {
        let pos = self.expect_position(cell);
        self.order[(pos + 1) % self.order.len()]
    }

    /// Predecessor of `cell` on the tour.
    ///
    /// # Panics
    ///
    /// Panics if `cell` lies outside the grid.
    pub fn prev(&self, cell: Cell) -> Cell {
        let pos = self.expect_position(cell);
        self.order[(pos + self.order.len() - 1) % self.order.len()]
    }

    /// Steps forward along the tour from `from` to reach `to`
    pub fn distance(&self, from: Cell, to: Cell) -> Option<usize> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        Some((b + self.order.len() - a) % self.order.len())
    }

    /// True when every step of the tour, including the closing one, is a unit move
    pub fn is_closed(&self) -> bool {
        self.order
            .iter()
            .zip(self.order.iter().cycle().skip(1))
            .all(|(&a, &b)| a.is_adjacent(b))
    }

    /// A head-first snake of `len` cells occupying the first `len` cells of
    /// the tour, so the head sits at position `len - 1`
    pub fn seed(&self, len: usize) -> Vec<Cell> {
        self.order[..len.min(self.order.len())]
            .iter()
            .rev()
            .copied()
            .collect()
    }

    fn expect_position(&self, cell: Cell) -> usize {
        match self.position(cell) {
            Some(pos) => pos,
            None => panic!("cell {cell:?} is outside the {}x{} grid", self.rows(), self.cols()),
        }
    }
}

/// Even columns top to bottom, odd columns bottom to top
fn serpentine_order(rows: usize, cols: usize) -> Vec<Cell> {
    let mut path = Vec::with_capacity(rows * cols);
    for col in 0..cols as i32 {
        if col % 2 == 0 {
            path.extend((0..rows as i32).map(|row| Cell::new(col, row)));
        } else {
            path.extend((0..rows as i32).rev().map(|row| Cell::new(col, row)));
        }
    }
    path
}

/// Tour over `lanes` (even) lanes of `len` cells each.
///
/// Lane 0 is walked in full. Later lanes zig-zag over steps `1..len`, odd lanes
/// descending, so the last lane ends at step 1. Step 0 of lanes `lanes-1..1`
/// then forms the return lane back to the start. `to_cell` maps
/// `(lane, step)` to grid coordinates.
fn comb_order(lanes: usize, len: usize, to_cell: impl Fn(i32, i32) -> Cell) -> Vec<Cell> {
    let mut path = Vec::with_capacity(lanes * len);
    let (lanes, len) = (lanes as i32, len as i32);

    path.extend((0..len).map(|step| to_cell(0, step)));
    for lane in 1..lanes {
        if lane % 2 == 1 {
            path.extend((1..len).rev().map(|step| to_cell(lane, step)));
        } else {
            path.extend((1..len).map(|step| to_cell(lane, step)));
        }
    }
    path.extend((1..lanes).rev().map(|lane| to_cell(lane, 0)));
    path
}
