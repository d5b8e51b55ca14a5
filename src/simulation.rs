//! Variant-independent view of a grid.  Drivers hold simulations of different automaton variants side by side,
//! so everything they need to advance and display a grid is exposed here without the variant's types.

use std::fmt::{self, Display, Formatter};

use serde_derive::Serialize;

use crate::engine::Rule;
use crate::grid::{Grid, Metadata};
use crate::random::RandomSource;

/// Cell counts per state label, in alphabet order, as of `generation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub generation: u64,
    pub counts: Vec<(String, usize)>,
}

impl Stats {
    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts.iter().find(|(l, _)| l == label).map(|&(_, count)| count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, count)| count).sum()
    }
}

impl Display for Stats {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(formatter, "generation {}:", self.generation)?;
        for (label, count) in &self.counts {
            write!(formatter, " {}={}", label, count)?;
        }
        Ok(())
    }
}

pub trait Simulation: Send {
    /// Identifier of the automaton variant driving this simulation.
    fn variant(&self) -> &'static str;

    fn step(&mut self);

    fn skip_ahead(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn metadata(&self) -> &Metadata;

    fn title(&self) -> &str {
        &self.metadata().title
    }

    fn author(&self) -> &str {
        &self.metadata().author
    }

    fn generation(&self) -> u64;

    fn stats(&self) -> Stats;

    /// State label of the cell at `(row, col)`, or `None` if that position is outside of the grid.
    fn label_at(&self, row: usize, col: usize) -> Option<String>;

    /// Labels of every cell in row-major order.
    fn labels(&self) -> Vec<String>;

    /// Display color configured for the state of the cell at `(row, col)`.
    fn color_at(&self, row: usize, col: usize) -> Option<&str> {
        let label = self.label_at(row, col)?;
        self.metadata().colors.get(&label).map(String::as_str)
    }

    /// Renders the grid as text, one glyph per cell.
    fn render(&self) -> String;
}

impl<R: Rule, G: RandomSource + Send> Simulation for Grid<R, G> {
    fn variant(&self) -> &'static str {
        self.rule().name()
    }

    fn step(&mut self) {
        self.advance_one_step();
    }

    fn skip_ahead(&mut self, steps: usize) {
        Grid::skip_ahead(self, steps);
    }

    fn rows(&self) -> usize {
        Grid::rows(self)
    }

    fn columns(&self) -> usize {
        Grid::columns(self)
    }

    fn metadata(&self) -> &Metadata {
        Grid::metadata(self)
    }

    fn generation(&self) -> u64 {
        Grid::generation(self)
    }

    fn stats(&self) -> Stats {
        Grid::stats(self)
    }

    fn label_at(&self, row: usize, col: usize) -> Option<String> {
        self.state_at(row, col).ok().map(|state| state.to_string())
    }

    fn labels(&self) -> Vec<String> {
        self.universe().states().map(|state| state.to_string()).collect()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}
