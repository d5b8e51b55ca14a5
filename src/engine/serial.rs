//! A simulation engine that applies the rule to every cell sequentially.  Cells are mutated in place, so cells
//! later in the sweep see the already-updated states of cells earlier in it; the visiting order is therefore part
//! of the observable behavior and is fixed to row-major.

use crate::engine::iterator::SerialGridIterator;
use crate::engine::{Rule, UpdateContext};
use crate::random::RandomSource;
use crate::universe::{Coord, Universe};

/// Performs one full sweep: every position is visited exactly once and handed to the rule along with its current
/// neighbor list.
pub fn sweep<R: Rule, G: RandomSource + ?Sized>(
    rule: &mut R,
    universe: &mut Universe<R::State>,
    rng: &mut G,
    elapsed_time: &mut f64,
) {
    let mut neighbors: Vec<Coord> = Vec::with_capacity(8);

    for coord in SerialGridIterator::new(universe.rows(), universe.columns()) {
        universe.neighbors_into(coord, &mut neighbors);

        let mut ctx = UpdateContext {
            universe: &mut *universe,
            rng: &mut *rng,
            elapsed_time: &mut *elapsed_time,
        };
        rule.update_cell(&mut ctx, coord, &neighbors);
    }
}
