use crate::grid::{cell_nr, Grid};
use arrayvec::ArrayVec;

pub const DOWN: usize = 0;
pub const UP: usize = 1;
pub const RIGHT: usize = 2;
pub const LEFT: usize = 3;

/// Marks a missing neighbor (move that would leave the grid).
pub const DENIED: u8 = u8::MAX;

/// Precomputed orthogonal adjacency of a grid, indexed by (in order):
/// number of the cell and the direction.
///
/// Out-of-bounds moves are resolved once here, so the search and the flood-fill
/// only ever see valid cell numbers.
pub struct Neighbors {
    table: Box<[[u8; 4]]>,
}

impl Neighbors {
    /// Constructs the adjacency table for a grid of the size `cols` x `rows`.
    pub fn new(cols: u8, rows: u8) -> Self {
        let mut table = vec![[DENIED; 4]; cols as usize * rows as usize].into_boxed_slice();
        for r in 0..rows {
            for c in 0..cols {
                let cell = &mut table[cell_nr(cols, c, r) as usize];
                if r + 1 != rows { cell[DOWN] = cell_nr(cols, c, r + 1); }
                if r != 0 { cell[UP] = cell_nr(cols, c, r - 1); }
                if c + 1 != cols { cell[RIGHT] = cell_nr(cols, c + 1, r); }
                if c != 0 { cell[LEFT] = cell_nr(cols, c - 1, r); }
            }
        }
        Self { table }
    }

    /// Constructs the adjacency table matching the dimensions of `grid`.
    #[inline] pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Returns numbers of the existing neighbors of the given `cell`,
    /// in down, up, right, left order.
    #[inline(always)] pub fn of(&self, cell: u8) -> ArrayVec<u8, 4> {
        let mut result = ArrayVec::<u8, 4>::new();
        for dir in 0..4 {
            let neighbor = self.table[cell as usize][dir];
            if neighbor != DENIED {
                result.push(neighbor);
            }
        }
        result
    }
}
