//! Populates a freshly created universe with its initial cell states, either from an explicit layout or from one
//! of the random seeding policies that variants choose between.

use log::debug;

use crate::cell::CellState;
use crate::error::ConfError;
use crate::random::RandomSource;
use crate::universe::{Coord, Universe};

pub trait Generator<S: CellState> {
    fn gen<G: RandomSource + ?Sized>(&self, universe: &mut Universe<S>, rng: &mut G) -> Result<(), ConfError>;
}

/// Random seeding policies used when a configuration doesn't supply an explicit layout.  Which one applies is a
/// property of the automaton variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seeding {
    /// Everything starts empty, then one cell of each non-empty state is placed at an independently drawn random
    /// position.  Placements may land on the same cell, in which case the later one wins.
    Local,
    /// Every cell is drawn uniformly from the whole alphabet.
    Fill,
}

impl<S: CellState> Generator<S> for Seeding {
    fn gen<G: RandomSource + ?Sized>(&self, universe: &mut Universe<S>, rng: &mut G) -> Result<(), ConfError> {
        universe.fill(S::EMPTY);
        let (rows, columns) = (universe.rows(), universe.columns());

        match *self {
            Seeding::Local => {
                for &state in S::ALPHABET.iter().filter(|state| !state.is_empty()) {
                    let coord = (rng.index(rows), rng.index(columns));
                    debug!("Seeding {} at {:?}", state, coord);
                    universe.set_state(coord, state);
                }
            }
            Seeding::Fill => {
                for row in 0..rows {
                    for col in 0..columns {
                        let state = S::ALPHABET[rng.index(S::ALPHABET.len())];
                        universe.set_state((row, col), state);
                    }
                }
            }
        }

        Ok(())
    }
}

/// An explicit initial layout.  Listed positions take the listed state; every other position is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout<S> {
    pub placements: Vec<(Coord, S)>,
}

impl<S: CellState> Layout<S> {
    pub fn new(placements: Vec<(Coord, S)>) -> Self {
        Layout { placements }
    }
}

impl<S: CellState> Generator<S> for Layout<S> {
    fn gen<G: RandomSource + ?Sized>(&self, universe: &mut Universe<S>, _: &mut G) -> Result<(), ConfError> {
        universe.fill(S::EMPTY);

        for &((row, col), state) in &self.placements {
            universe.set_cell((row, col), state).map_err(|err| ConfError::PlacementOutOfBounds {
                state: state.to_string(),
                row,
                col,
                rows: err.rows,
                columns: err.columns,
            })?;
        }

        Ok(())
    }
}
