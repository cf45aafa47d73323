//! Worker thread ownership for simulated objects.
//!
//! A simulated object that runs background work implements [`Runnable`];
//! the simulation driver hands it to a [`ThreadRegistry`], which spawns the
//! worker and keeps the owned `JoinHandle` until shutdown.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use stoplight::{Runnable, ThreadRegistry};
//!
//! struct Ping(AtomicBool);
//!
//! impl Runnable for Ping {
//!     fn run(&self) {
//!         self.0.store(true, Ordering::Release);
//!     }
//! }
//!
//! let registry = ThreadRegistry::new();
//! let ping = Arc::new(Ping(AtomicBool::new(false)));
//! registry.spawn(ping.clone());
//! registry.join_all();
//!
//! assert!(ping.0.load(Ordering::Acquire));
//! assert_eq!(registry.len(), 0);
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::warn;
use parking_lot::Mutex;

/// Background work executed on an owned worker thread.
pub trait Runnable {
    /// Entry point invoked on the spawned thread.
    fn run(&self);
}

/// Owns the worker threads spawned on behalf of simulated objects.
///
/// The registry only stores handles; stopping the workers is the objects'
/// business. Join a worker loop only after telling it to stop.
#[derive(Default)]
pub struct ThreadRegistry {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl ThreadRegistry {
    pub fn new() -> Self {
        Self {
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawn a worker executing `runnable.run()` and take ownership of its
    /// handle.
    pub fn spawn(&self, runnable: Arc<dyn Runnable + Send + Sync>) {
        let handle = thread::spawn(move || runnable.run());
        self.register(handle);
    }

    /// Take ownership of an externally spawned worker.
    pub fn register(&self, handle: JoinHandle<()>) {
        self.handles.lock().push(handle);
    }

    /// Number of handles currently owned.
    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.lock().is_empty()
    }

    /// Join every owned worker, draining the registry.
    ///
    /// Blocks until each worker's run loop has returned. A worker that was
    /// never told to stop keeps this call blocked forever.
    pub fn join_all(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            if handle.join().is_err() {
                warn!("worker thread panicked before join");
            }
        }
    }
}
