//! Declares a single cell of the grid.  Each cell holds exactly one state drawn from a finite alphabet that is
//! specific to the automaton variant being simulated.  Cells have no identity beyond their position in the grid;
//! they are created when the grid is built, mutated in place every step, and owned by the grid for its whole lifetime.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

/// The finite set of states that a cell of one automaton variant can take on.
///
/// `ALPHABET` lists every member in a fixed order; that order is used for statistics and for full-grid random
/// seeding.  `EMPTY` is the designated default member that unlisted layout positions take on.
pub trait CellState:
    Copy + Eq + Hash + Debug + Display + FromStr + serde::Serialize + for<'de> serde::Deserialize<'de> + Send + 'static
{
    const ALPHABET: &'static [Self];
    const EMPTY: Self;

    fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Single character used when printing a grid to a terminal.
    fn glyph(&self) -> char;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell<S> {
    pub state: S,
}

impl<S: CellState> Default for Cell<S> {
    fn default() -> Self {
        Cell { state: S::EMPTY }
    }
}

impl<S: CellState> Cell<S> {
    pub fn new(state: S) -> Self {
        Cell { state }
    }
}
