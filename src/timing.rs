//! Cycle timing for the traffic light mutator loop.
//!
//! Cycle durations are drawn uniformly from a closed interval (4–6 seconds
//! by default) using one `ChaCha8Rng` reused across cycles, so a fixed seed
//! yields a fully deterministic schedule in tests.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Timing parameters for one traffic light.
///
/// `quantum` is how long the mutator loop sleeps between elapsed-time
/// checks; transitions therefore land within one quantum of the drawn
/// target duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleTiming {
    pub min: Duration,
    pub max: Duration,
    pub quantum: Duration,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(4000),
            max: Duration::from_millis(6000),
            quantum: Duration::from_millis(1),
        }
    }
}

/// Draws target cycle durations for the mutator loop.
///
/// # Examples
///
/// ```
/// use stoplight::{CycleClock, CycleTiming};
///
/// let timing = CycleTiming::default();
/// let mut clock = CycleClock::seeded(timing, 42);
///
/// let duration = clock.next_duration();
/// assert!(duration >= timing.min && duration <= timing.max);
/// ```
pub struct CycleClock {
    timing: CycleTiming,
    rng: ChaCha8Rng,
}

impl CycleClock {
    /// Clock with an injected seed, for deterministic schedules.
    pub fn seeded(timing: CycleTiming, seed: u64) -> Self {
        Self {
            timing,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Clock seeded from OS entropy.
    pub fn from_entropy(timing: CycleTiming) -> Self {
        Self {
            timing,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn timing(&self) -> CycleTiming {
        self.timing
    }

    pub fn quantum(&self) -> Duration {
        self.timing.quantum
    }

    /// Draw the next target cycle duration, uniform over `[min, max]`
    /// inclusive at millisecond granularity.
    pub fn next_duration(&mut self) -> Duration {
        let min = self.timing.min.as_millis() as u64;
        let max = self.timing.max.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min..=max))
    }
}
