//! Two stage Gauss-Markov pseudo range noise
use log::trace;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{constants::MAX_SPIN_UP_ITERATIONS, prelude::DVector};

mod state;

pub(crate) use state::{read_lock, write_lock};
pub use state::{NoiseState, NoiseStateHandle};

impl NoiseState {
    /// Zeroes both processes
    pub(crate) fn zero(&mut self) {
        self.prns.fill(0.0);
        self.prns1.fill(0.0);
    }

    /// Advances both processes by one `dt` (s) step, for all satellites at once.
    /// Draws one standard normal sample per satellite.
    ///
    /// ```text
    /// prns  = prns * betas1 + prns1
    /// prns1 = prns1 * exp(-betas2 * dt) + w * N(0, 1)
    /// ```
    ///
    /// The outer process is not normalized by `dt`.
    pub(crate) fn propagate<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        let draws = DVector::<f64>::from_fn(self.len(), |_, _| rng.sample(StandardNormal));

        // outer process is driven by the previous inner state
        self.prns = self.prns.component_mul(&self.betas1) + &self.prns1;

        let decay = self.betas2.map(|betas2| (-betas2 * dt).exp());
        self.prns1 = self.prns1.component_mul(&decay) + self.w.component_mul(&draws);
    }

    /// Zeroes both processes, then runs the recursion a random number of
    /// times in `1..=MAX_SPIN_UP_ITERATIONS` so the first reported sample
    /// is drawn from the stationary regime. Returns the number of iterations.
    pub(crate) fn spin_up<R: Rng>(&mut self, dt: f64, rng: &mut R) -> usize {
        self.zero();

        let iterations = rng.random_range(1..=MAX_SPIN_UP_ITERATIONS);

        for _ in 0..iterations {
            self.propagate(dt, rng);
        }

        trace!("spin-up: {} iterations", iterations);
        iterations
    }
}
