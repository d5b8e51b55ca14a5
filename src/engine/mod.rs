//! This is the core of the simulation.  A rule engine defines how a single cell transitions given its live
//! neighbors; the serial engine drives a rule across the whole grid one cell at a time, so every mutation made for
//! one cell is already visible when the next cell is updated.

use crate::cell::CellState;
use crate::generator::Seeding;
use crate::random::RandomSource;
use crate::universe::{Coord, Universe};

pub mod iterator;
pub mod rps;
pub mod serial;

/// Everything a rule may touch while updating one cell.  Borrowed from the owning grid for the duration of a
/// single `update_cell` call.
pub struct UpdateContext<'a, S: CellState, G: RandomSource + ?Sized> {
    pub universe: &'a mut Universe<S>,
    pub rng: &'a mut G,
    /// Continuously accumulated simulation time owned by the grid; rules with time-dependent behavior advance it.
    pub elapsed_time: &'a mut f64,
}

/// The per-variant transition function.  One implementor exists per automaton variant and a grid is built around
/// exactly one of them.
pub trait Rule: Send {
    type State: CellState;

    /// Short identifier of the variant, matching the `gridType` used in configuration files.
    fn name(&self) -> &'static str;

    /// How cells are initialized when no explicit layout is supplied.
    fn seeding(&self) -> Seeding;

    /// Updates the cell at `coord`.  `neighbors` are the cell's neighbors in the grid's stable neighbor order.  The
    /// rule is free to mutate the cell itself as well as any of its neighbors.
    fn update_cell<G: RandomSource + ?Sized>(
        &mut self,
        ctx: &mut UpdateContext<'_, Self::State, G>,
        coord: Coord,
        neighbors: &[Coord],
    );
}
