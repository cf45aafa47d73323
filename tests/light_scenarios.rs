//! End-to-end traffic light scenarios exercising the public surface the
//! way a simulation driver would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use stoplight::{CycleTiming, Phase, ThreadRegistry, TrafficLight};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fast_timing() -> CycleTiming {
    CycleTiming {
        min: Duration::from_millis(80),
        max: Duration::from_millis(120),
        quantum: Duration::from_millis(1),
    }
}

#[test]
fn wait_for_green_resolves_within_one_default_cycle() {
    init_logging();

    let light = Arc::new(TrafficLight::new());
    let registry = ThreadRegistry::new();
    light.clone().simulate(&registry);

    let waiter = {
        let light = Arc::clone(&light);
        thread::spawn(move || {
            let start = Instant::now();
            light.wait_for_green();
            start.elapsed()
        })
    };

    let waited = waiter.join().unwrap();

    // The first transition lands between 4 and 6 seconds after start; allow
    // scheduling slack on top of the 6 second ceiling.
    assert!(waited >= Duration::from_millis(3900), "returned early: {:?}", waited);
    assert!(waited <= Duration::from_millis(6500), "returned late: {:?}", waited);
    assert_eq!(light.current_phase(), Phase::Green);

    light.stop();
    registry.join_all();
}

#[test]
fn wait_for_green_blocks_until_simulation_starts() {
    init_logging();

    let light = Arc::new(TrafficLight::with_timing_and_seed(fast_timing(), 17));
    let returned = Arc::new(AtomicBool::new(false));

    let waiter = {
        let light = Arc::clone(&light);
        let returned = Arc::clone(&returned);
        thread::spawn(move || {
            light.wait_for_green();
            returned.store(true, Ordering::Release);
        })
    };

    // No mutator yet: the queue stays empty and the waiter stays parked.
    thread::sleep(Duration::from_millis(150));
    assert!(!returned.load(Ordering::Acquire));

    let registry = ThreadRegistry::new();
    light.clone().simulate(&registry);

    waiter.join().unwrap();
    assert!(returned.load(Ordering::Acquire));

    light.stop();
    registry.join_all();
}

#[test]
fn observed_transition_spacing_matches_the_drawn_interval() {
    init_logging();

    let timing = fast_timing();
    let light = Arc::new(TrafficLight::with_timing_and_seed(timing, 99));
    let registry = ThreadRegistry::new();
    light.clone().simulate(&registry);

    let mut last_phase = light.current_phase();
    let mut transitions: Vec<Instant> = Vec::new();
    let deadline = Instant::now() + Duration::from_millis(1000);
    while Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
        let phase = light.current_phase();
        if phase != last_phase {
            transitions.push(Instant::now());
            last_phase = phase;
        }
    }

    light.stop();
    registry.join_all();

    assert!(transitions.len() >= 4, "too few transitions observed");
    for pair in transitions.windows(2) {
        let spacing = pair[1] - pair[0];
        // Lower bound minus sampling error; upper bound padded for
        // scheduling delays on loaded machines.
        assert!(spacing >= timing.min - Duration::from_millis(15), "spacing {:?}", spacing);
        assert!(spacing <= timing.max + Duration::from_millis(100), "spacing {:?}", spacing);
    }
}
