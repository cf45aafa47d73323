//! Traffic light actor: a two-phase state machine driven by a background
//! mutator loop.
//!
//! The mutator loop flips the phase between [`Phase::Red`] and
//! [`Phase::Green`] once per randomized cycle and publishes every new phase
//! through the light's [`HandoffQueue`]. Observers block in
//! [`TrafficLight::wait_for_green`] until a `Green` value comes through.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_utils::atomic::AtomicCell;
use log::debug;

use crate::queue::HandoffQueue;
use crate::thread::{Runnable, ThreadRegistry};
use crate::timing::{CycleClock, CycleTiming};

/// The externally observable state of a traffic light.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Red,
    Green,
}

impl Phase {
    /// The complement phase: `Red` ↔ `Green`.
    pub fn toggled(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    pub fn is_green(self) -> bool {
        self == Phase::Green
    }
}

/// A traffic light whose phase alternates on its own schedule.
///
/// Construction leaves the light in [`Phase::Red`]. Calling
/// [`simulate`](Self::simulate) starts the mutator loop on a worker thread
/// owned by the given [`ThreadRegistry`]; calling it twice spawns two
/// competing loops, which is a misuse the light does not guard against.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use stoplight::{CycleTiming, Phase, ThreadRegistry, TrafficLight};
///
/// let timing = CycleTiming {
///     min: Duration::from_millis(20),
///     max: Duration::from_millis(40),
///     quantum: Duration::from_millis(1),
/// };
/// let light = Arc::new(TrafficLight::with_timing_and_seed(timing, 42));
/// assert_eq!(light.current_phase(), Phase::Red);
///
/// let registry = ThreadRegistry::new();
/// light.clone().simulate(&registry);
///
/// light.wait_for_green();
/// assert_eq!(light.current_phase(), Phase::Green);
///
/// light.stop();
/// registry.join_all();
/// ```
pub struct TrafficLight {
    current: AtomicCell<Phase>,
    queue: HandoffQueue<Phase>,
    timing: CycleTiming,
    seed: Option<u64>,
    stop: AtomicBool,
}

impl TrafficLight {
    /// A red light with the default 4–6 second cycle and an entropy-seeded
    /// clock.
    pub fn new() -> Self {
        Self::with_timing(CycleTiming::default())
    }

    /// A red light with custom cycle timing.
    pub fn with_timing(timing: CycleTiming) -> Self {
        Self {
            current: AtomicCell::new(Phase::Red),
            queue: HandoffQueue::new(),
            timing,
            seed: None,
            stop: AtomicBool::new(false),
        }
    }

    /// A red light with custom timing and an injected clock seed, for
    /// deterministic schedules in tests.
    pub fn with_timing_and_seed(timing: CycleTiming, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::with_timing(timing)
        }
    }

    /// The last phase written by the mutator loop. Non-blocking; may race
    /// with an in-flight transition.
    pub fn current_phase(&self) -> Phase {
        self.current.load()
    }

    /// Low-level phase store. The mutator loop is the expected caller.
    pub fn set_current_phase(&self, phase: Phase) {
        self.current.store(phase);
    }

    /// Store the complement of `current`.
    ///
    /// `current` must be the phase the caller just read; it is supplied
    /// rather than re-read here so the mutator loop toggles exactly the
    /// value it observed.
    pub fn toggle(&self, current: Phase) {
        self.set_current_phase(current.toggled());
    }

    /// Block until the light turns green.
    ///
    /// Loops on the handoff queue, discarding every non-`Green` delivery,
    /// and returns as soon as a popped value is `Green`. Each delivery goes
    /// to exactly one consumer, so with several concurrent callers one of
    /// them can swallow a transition the others never see; the queue serves
    /// a single logical observer. Blocks forever if
    /// [`simulate`](Self::simulate) was never called.
    pub fn wait_for_green(&self) {
        loop {
            if self.queue.pop().is_green() {
                return;
            }
        }
    }

    /// Start the mutator loop on a worker thread owned by `registry`.
    /// Returns immediately.
    pub fn simulate(self: Arc<Self>, registry: &ThreadRegistry) {
        debug!("starting traffic light mutator thread");
        registry.spawn(self);
    }

    /// Ask the mutator loop to exit; it notices within one timing quantum.
    /// Blocked `wait_for_green` callers are not interrupted.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// The mutator loop. Sleeps one quantum per iteration; whenever the
    /// elapsed cycle time reaches the drawn target, toggles the phase,
    /// publishes the new value, and starts the next cycle.
    fn cycle_through_phases(&self) {
        let mut clock = match self.seed {
            Some(seed) => CycleClock::seeded(self.timing, seed),
            None => CycleClock::from_entropy(self.timing),
        };
        let mut cycle_start = Instant::now();
        let mut target = clock.next_duration();

        while !self.stop.load(Ordering::Acquire) {
            thread::sleep(clock.quantum());

            if cycle_start.elapsed() >= target {
                let phase = self.current_phase();
                self.toggle(phase);
                let next = phase.toggled();
                debug!(
                    "phase transition to {:?} after {:?} (target {:?})",
                    next,
                    cycle_start.elapsed(),
                    target
                );
                self.queue.push(next);
                cycle_start = Instant::now();
                target = clock.next_duration();
            }
        }
    }
}

impl Runnable for TrafficLight {
    fn run(&self) {
        self.cycle_through_phases();
    }
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new()
    }
}
