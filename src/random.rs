//! Source of randomness used by seeding and by the stochastic rule engines.  Every grid owns its own source so
//! that grids never share random state and a fixed seed always replays the same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn probability(&mut self) -> f64;

    /// Uniform draw in `0..len`.  `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn probability(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Creates the default PRNG, either from a fixed seed or from OS entropy.
pub fn make_rng(seed: Option<u64>) -> Pcg64 {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}
