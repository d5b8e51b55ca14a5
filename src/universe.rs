//! Declares the universe in which all cells of a grid reside.  The universe is a fixed-size, row-major buffer of
//! cells together with the topology that decides which cells count as neighbors of one another.  Its dimensions are
//! chosen once at construction and never change afterwards.

use serde_derive::{Deserialize, Serialize};

use crate::cell::{Cell, CellState};
use crate::error::{ConfError, OutOfBounds};
use crate::util::{get_coords, get_index, iter_neighbors};

/// Largest number of cells a single universe may hold.
pub const MAX_CELLS: usize = 1 << 24;

/// A `(row, col)` position in the universe.
pub type Coord = (usize, usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Neighborhood {
    /// All eight surrounding cells, including diagonals.
    #[default]
    Moore,
    /// Only the four orthogonally adjacent cells.
    VonNeumann,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniverseConf {
    pub rows: usize,
    pub columns: usize,
    pub neighborhood: Neighborhood,
    /// If true, the universe is a torus and edge cells see the cells on the opposite edge as neighbors.
    pub wrap: bool,
}

impl UniverseConf {
    pub fn new(rows: usize, columns: usize) -> Self {
        UniverseConf {
            rows,
            columns,
            neighborhood: Neighborhood::default(),
            wrap: false,
        }
    }

    /// Total number of cells, or `None` if `rows * columns` overflows.
    pub fn size(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

#[derive(Clone, Debug)]
pub struct Universe<S: CellState> {
    conf: UniverseConf,
    cells: Vec<Cell<S>>,
}

impl<S: CellState> Universe<S> {
    /// Creates a universe with every cell set to the alphabet's empty member.
    pub fn new(conf: UniverseConf) -> Result<Self, ConfError> {
        if conf.rows == 0 || conf.columns == 0 {
            return Err(ConfError::EmptyGrid { rows: conf.rows, columns: conf.columns });
        }

        let size = match conf.size() {
            Some(size) if size <= MAX_CELLS => size,
            _ => return Err(ConfError::GridTooLarge { rows: conf.rows, columns: conf.columns, max: MAX_CELLS }),
        };

        let cells = vec![Cell::default(); size];
        Ok(Universe { conf, cells })
    }

    pub fn get_conf(&self) -> &UniverseConf {
        &self.conf
    }

    pub fn rows(&self) -> usize {
        self.conf.rows
    }

    pub fn columns(&self) -> usize {
        self.conf.columns
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell<S>] {
        &self.cells
    }

    fn check(&self, (row, col): Coord) -> Result<usize, OutOfBounds> {
        if row < self.conf.rows && col < self.conf.columns {
            Ok(get_index(row, col, self.conf.columns))
        } else {
            Err(OutOfBounds { row, col, rows: self.conf.rows, columns: self.conf.columns })
        }
    }

    pub fn get_cell(&self, coord: Coord) -> Result<&Cell<S>, OutOfBounds> {
        let index = self.check(coord)?;
        Ok(&self.cells[index])
    }

    pub fn get_cell_mut(&mut self, coord: Coord) -> Result<&mut Cell<S>, OutOfBounds> {
        let index = self.check(coord)?;
        Ok(&mut self.cells[index])
    }

    pub fn set_cell(&mut self, coord: Coord, new_state: S) -> Result<(), OutOfBounds> {
        self.get_cell_mut(coord)?.state = new_state;
        Ok(())
    }

    /// Unchecked read used by the rule engines.  Coordinates handed out by the sweep are always in bounds, so an
    /// out-of-bounds coordinate here is a bug and panics.
    pub fn state(&self, (row, col): Coord) -> S {
        debug_assert!(row < self.conf.rows);
        self.cells[get_index(row, col, self.conf.columns)].state
    }

    pub fn set_state(&mut self, (row, col): Coord, new_state: S) {
        debug_assert!(row < self.conf.rows);
        self.cells[get_index(row, col, self.conf.columns)].state = new_state;
    }

    /// Exchanges the states of two cells.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let a_index = get_index(a.0, a.1, self.conf.columns);
        let b_index = get_index(b.0, b.1, self.conf.columns);
        self.cells.swap(a_index, b_index);
    }

    pub fn fill(&mut self, state: S) {
        for cell in &mut self.cells {
            cell.state = state;
        }
    }

    /// Returns the neighbors of `coord` as defined by this universe's topology, in a stable order.
    pub fn neighbors_of(&self, coord: Coord) -> Result<Vec<Coord>, OutOfBounds> {
        self.check(coord)?;
        let mut neighbors = Vec::with_capacity(8);
        self.neighbors_into(coord, &mut neighbors);
        Ok(neighbors)
    }

    /// Clears `buf` and fills it with the neighbors of `coord`.  Lets the sweep reuse one buffer for every cell.
    pub(crate) fn neighbors_into(&self, (row, col): Coord, buf: &mut Vec<Coord>) {
        let UniverseConf { rows, columns, neighborhood, wrap } = self.conf;
        buf.clear();
        buf.extend(iter_neighbors(row, col, rows, columns, neighborhood, wrap));
    }

    /// Iterates over the states of all cells in row-major order.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.cells.iter().map(|cell| cell.state)
    }

    /// Iterates over all cells along with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell<S>)> + '_ {
        let columns = self.conf.columns;
        self.cells.iter().enumerate().map(move |(i, cell)| (get_coords(i, columns), cell))
    }

    /// Number of cells currently in each state, in alphabet order.
    pub fn counts(&self) -> Vec<(S, usize)> {
        S::ALPHABET
            .iter()
            .map(|&state| (state, self.cells.iter().filter(|cell| cell.state == state).count()))
            .collect()
    }
}
