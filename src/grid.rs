//! A grid is one running simulation: a universe of cells, the rule engine of its automaton variant, its own
//! source of randomness, and the bookkeeping (generation count, elapsed time, metadata) that goes with them.
//! Grids share nothing with one another, so any number of them can be loaded and advanced side by side.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::cell::{Cell, CellState};
use crate::engine::serial::sweep;
use crate::engine::Rule;
use crate::error::{ConfError, OutOfBounds};
use crate::generator::{Generator, Layout};
use crate::random::RandomSource;
use crate::simulation::Stats;
use crate::universe::{Coord, Universe, UniverseConf};

/// Descriptive information that is carried along for display purposes and never read by the rule engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub description: String,
    /// Display color keyed by state label.
    pub colors: BTreeMap<String, String>,
}

pub struct Grid<R: Rule, G: RandomSource> {
    universe: Universe<R::State>,
    rule: R,
    rng: G,
    metadata: Metadata,
    generation: u64,
    elapsed_time: f64,
}

impl<R: Rule, G: RandomSource> Grid<R, G> {
    /// Creates a grid and populates it.  With a layout, listed positions are set and everything else is empty;
    /// without one the rule's own seeding policy is used.
    pub fn new(
        conf: UniverseConf,
        rule: R,
        metadata: Metadata,
        layout: Option<Layout<R::State>>,
        mut rng: G,
    ) -> Result<Self, ConfError> {
        let mut universe = Universe::new(conf)?;
        match layout {
            Some(layout) => layout.gen(&mut universe, &mut rng)?,
            None => rule.seeding().gen(&mut universe, &mut rng)?,
        }

        debug!(
            "Created {}x{} `{}` grid \"{}\"",
            universe.rows(),
            universe.columns(),
            rule.name(),
            metadata.title
        );

        Ok(Grid {
            universe,
            rule,
            rng,
            metadata,
            generation: 0,
            elapsed_time: 0.0,
        })
    }

    /// Runs one full row-major sweep over the grid and bumps the generation counter once.
    pub fn advance_one_step(&mut self) {
        let Grid { universe, rule, rng, elapsed_time, .. } = self;
        sweep(rule, universe, rng, elapsed_time);
        self.generation += 1;
    }

    /// Advances the grid `steps` times, exactly as if `advance_one_step` had been called that many times.
    pub fn skip_ahead(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance_one_step();
        }
    }

    pub fn neighbors_of(&self, row: usize, col: usize) -> Result<Vec<Coord>, OutOfBounds> {
        self.universe.neighbors_of((row, col))
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell<R::State>, OutOfBounds> {
        self.universe.get_cell((row, col))
    }

    pub fn cell_at_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell<R::State>, OutOfBounds> {
        self.universe.get_cell_mut((row, col))
    }

    pub fn state_at(&self, row: usize, col: usize) -> Result<R::State, OutOfBounds> {
        self.cell_at(row, col).map(|cell| cell.state)
    }

    pub fn universe(&self) -> &Universe<R::State> {
        &self.universe
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn rows(&self) -> usize {
        self.universe.rows()
    }

    pub fn columns(&self) -> usize {
        self.universe.columns()
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Per-state cell counts, recomputed from the current cells on every call.
    pub fn stats(&self) -> Stats {
        Stats {
            generation: self.generation,
            counts: self
                .universe
                .counts()
                .into_iter()
                .map(|(state, count)| (state.to_string(), count))
                .collect(),
        }
    }
}

impl<R: Rule, G: RandomSource> Display for Grid<R, G> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for row in 0..self.universe.rows() {
            let line: String = (0..self.universe.columns())
                .map(|col| self.universe.state((row, col)).glyph())
                .collect();
            writeln!(formatter, "{}", line)?;
        }
        Ok(())
    }
}
