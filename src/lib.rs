//! A minimal concurrency pair for simulated traffic lights: a blocking
//! handoff queue that publishes phase transitions, and a [`TrafficLight`]
//! actor whose background mutator loop flips the phase on a randomized
//! 4–6 second cycle.
//!
//! Observers call [`TrafficLight::wait_for_green`] to block until the light
//! turns green; the simulation driver owns the worker threads through a
//! [`ThreadRegistry`].

pub mod light;
pub mod queue;
pub mod thread;
pub mod timing;

pub use light::{Phase, TrafficLight};
pub use queue::HandoffQueue;
pub use thread::{Runnable, ThreadRegistry};
pub use timing::{CycleClock, CycleTiming};
