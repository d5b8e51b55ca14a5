//! Declares additions that can be added onto the driver either before or after a tick completes.  Enables things
//! like rendering, logging, rate limiting etc.

use std::thread;
use std::time::{Duration, Instant};

use log::info;

use super::Loaded;

/// Adds some side effect on to the end or beginning of each tick.  Middleware only ever sees the simulations; it
/// never mutates cells.
pub trait Middleware {
    fn before_tick(&mut self, _: &[Loaded]) {}

    fn after_tick(&mut self, _: &[Loaded]) {}
}

/// Prints every simulation to stdout after each tick.
pub struct UniverseDisplayer;

impl Middleware for UniverseDisplayer {
    fn after_tick(&mut self, simulations: &[Loaded]) {
        for loaded in simulations {
            let sim = &loaded.simulation;
            println!("{} by {} (generation {})", sim.title(), sim.author(), sim.generation());
            println!("{}", sim.render());
        }
    }
}

/// Logs the per-state cell counts of every simulation after each tick.
pub struct StatsLogger;

impl Middleware for StatsLogger {
    fn after_tick(&mut self, simulations: &[Loaded]) {
        for loaded in simulations {
            info!("[{}] {}: {}", loaded.id, loaded.simulation.title(), loaded.simulation.stats());
        }
    }
}

/// Keeps ticks at least `min_delay` apart, sleeping off whatever is left of the interval after a fast tick.
pub struct MinDelay {
    min_delay: Duration,
    last_tick: Instant,
}

impl MinDelay {
    pub fn new(min_delay_ms: u64) -> Self {
        MinDelay::with_interval(Duration::from_millis(min_delay_ms))
    }

    /// Limits the driver to `tps` ticks per second.  A non-positive rate leaves ticks unthrottled.
    pub fn from_tps(tps: f32) -> Self {
        MinDelay::with_interval(Duration::try_from_secs_f64(1.0 / f64::from(tps)).unwrap_or(Duration::ZERO))
    }

    fn with_interval(min_delay: Duration) -> Self {
        MinDelay { min_delay, last_tick: Instant::now() }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }
}

impl Middleware for MinDelay {
    fn after_tick(&mut self, _: &[Loaded]) {
        if let Some(remaining) = self.min_delay.checked_sub(self.last_tick.elapsed()) {
            thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
    }
}

#[test]
fn min_delay_from_tps() {
    assert_eq!(MinDelay::from_tps(4.0).min_delay(), Duration::from_millis(250));
    assert_eq!(MinDelay::from_tps(1.0).min_delay(), Duration::from_millis(1000));
    assert_eq!(MinDelay::from_tps(-1.0).min_delay(), Duration::ZERO);
}

#[test]
fn min_delay_spaces_out_ticks() {
    let start = Instant::now();
    let mut delay = MinDelay::new(20);
    delay.after_tick(&[]);
    delay.after_tick(&[]);
    assert!(start.elapsed() >= Duration::from_millis(40));
}
