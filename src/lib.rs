//! Cellular automaton simulation engine.
//!
//! A `Grid` couples a fixed-size universe of discrete-state cells with the rule engine of one automaton variant
//! and advances it one row-major sweep at a time.  A `Driver` owns any number of independently loaded grids and
//! steps them one after another.

pub mod cell;
pub mod conf;
pub mod driver;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod random;
pub mod simulation;
pub mod universe;
pub mod util;

pub mod prelude {
    pub use crate::cell::{Cell, CellState};
    pub use crate::conf::{Params, SimulationConf, Variant};
    pub use crate::driver::middleware::{MinDelay, Middleware, StatsLogger, UniverseDisplayer};
    pub use crate::driver::{Driver, Loaded};
    pub use crate::engine::rps::{RockPaperScissors, RpsParams, RpsState};
    pub use crate::engine::{Rule, UpdateContext};
    pub use crate::error::{ConfError, OutOfBounds};
    pub use crate::generator::{Generator, Layout, Seeding};
    pub use crate::grid::{Grid, Metadata};
    pub use crate::random::{make_rng, RandomSource};
    pub use crate::simulation::{Simulation, Stats};
    pub use crate::universe::{Coord, Neighborhood, Universe, UniverseConf};
}
