//! Executes simulations, driving progress forward by repeatedly stepping every loaded grid.  Allows for things like
//! rendering, logging, rate limiting etc. to be implemented between ticks via middleware.
//!
//! Grids are advanced strictly one after another in the order they were loaded: each grid's sweep is fully applied
//! before the next grid's begins.

use std::path::Path;

use log::{info, warn};
use uuid::Uuid;

use crate::conf::SimulationConf;
use crate::error::ConfError;
use crate::simulation::Simulation;

pub mod middleware;
use self::middleware::Middleware;

/// A simulation owned by a driver along with the identifier it was assigned when loaded.
pub struct Loaded {
    pub id: Uuid,
    pub simulation: Box<dyn Simulation>,
}

#[derive(Default)]
pub struct Driver {
    simulations: Vec<Loaded>,
    middleware: Vec<Box<dyn Middleware>>,
}

impl Driver {
    pub fn new() -> Self {
        Driver::default()
    }

    pub fn with_middleware(mut self, middleware: Box<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Takes ownership of an already built simulation and appends it to the tick order.
    pub fn insert(&mut self, simulation: Box<dyn Simulation>) -> Uuid {
        let id = Uuid::new_v4();
        info!(
            "Loaded {}x{} `{}` simulation \"{}\" as {}",
            simulation.rows(),
            simulation.columns(),
            simulation.variant(),
            simulation.title(),
            id
        );
        self.simulations.push(Loaded { id, simulation });
        id
    }

    /// Builds a simulation from `conf` and loads it.  A configuration that fails to build is reported and leaves
    /// the already loaded simulations untouched.
    pub fn load(&mut self, conf: &SimulationConf) -> Result<Uuid, ConfError> {
        match conf.build() {
            Ok(simulation) => Ok(self.insert(simulation)),
            Err(err) => {
                warn!("Unable to load simulation \"{}\": {}", conf.title, err);
                Err(err)
            }
        }
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Uuid, ConfError> {
        let conf = SimulationConf::from_file(path.as_ref()).map_err(|err| {
            warn!("Unable to read simulation from {:?}: {}", path.as_ref(), err);
            err
        })?;
        self.load(&conf)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Box<dyn Simulation>> {
        let index = self.simulations.iter().position(|loaded| loaded.id == id)?;
        Some(self.simulations.remove(index).simulation)
    }

    /// Drops every loaded simulation.
    pub fn clear(&mut self) {
        self.simulations.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&dyn Simulation> {
        self.simulations
            .iter()
            .find(|loaded| loaded.id == id)
            .map(|loaded| loaded.simulation.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Loaded> + '_ {
        self.simulations.iter()
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }

    fn step_all(&mut self) {
        for loaded in self.simulations.iter_mut() {
            loaded.simulation.step();
        }
    }

    /// Advances every loaded simulation by exactly one step, running middleware around it.
    pub fn tick(&mut self) {
        for m in self.middleware.iter_mut() {
            m.before_tick(&self.simulations);
        }

        self.step_all();

        for m in self.middleware.iter_mut() {
            m.after_tick(&self.simulations);
        }
    }

    /// Performs `steps` full rounds of stepping every simulation in load order, then runs the after-tick middleware
    /// once.  Observably the same as `steps` ticks without the intermediate middleware passes.
    pub fn skip_ahead(&mut self, steps: usize) {
        info!("Skipping {} simulation(s) ahead by {} steps", self.simulations.len(), steps);
        for _ in 0..steps {
            self.step_all();
        }

        for m in self.middleware.iter_mut() {
            m.after_tick(&self.simulations);
        }
    }

    /// Ticks `ticks` times, or forever if `None`.
    pub fn run(&mut self, ticks: Option<usize>) {
        info!("Starting simulation driver...");
        match ticks {
            Some(ticks) => {
                for _ in 0..ticks {
                    self.tick();
                }
            }
            None => loop {
                self.tick();
            },
        }
    }
}
