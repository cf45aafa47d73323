//! Blocking single-delivery handoff queue.
//!
//! The queue is the only channel through which the traffic light's mutator
//! loop publishes phase transitions to blocked observers. It is unbounded,
//! protected by one lock, and delivers each pushed value to exactly one
//! `pop` call.
//!
//! # Examples
//!
//! ```
//! use stoplight::HandoffQueue;
//!
//! let queue = HandoffQueue::new();
//! queue.push(1);
//! queue.push(2);
//!
//! // Most-recently-pushed item is delivered first.
//! assert_eq!(queue.pop(), 2);
//! assert_eq!(queue.pop(), 1);
//! assert!(queue.is_empty());
//! ```

use parking_lot::{Condvar, Mutex};

/// Thread-safe unbounded buffer with blocking `pop` and notifying `push`.
///
/// Buffered items are handed out in LIFO order. For the traffic light this
/// is harmless: observers only care about eventually seeing a particular
/// phase value, not about the order of stale ones.
///
/// There is no upper bound on buffered items; a consumer that falls behind
/// a persistent producer grows the buffer without limit.
pub struct HandoffQueue<T> {
    items: Mutex<Vec<T>>,
    available: Condvar,
}

impl<T> HandoffQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            available: Condvar::new(),
        }
    }

    /// Insert `value` and wake one blocked consumer, if any.
    ///
    /// Never blocks beyond the short critical section. A consumer parked in
    /// [`pop`](Self::pop) may observe the value before this call returns.
    pub fn push(&self, value: T) {
        let mut items = self.items.lock();
        items.push(value);
        self.available.notify_one();
    }

    /// Block the calling thread until an item is available, then remove and
    /// return the most-recently-pushed one.
    ///
    /// Blocks indefinitely if no producer ever pushes; there is no timeout
    /// or cancellation path.
    pub fn pop(&self) -> T {
        let mut items = self.items.lock();
        loop {
            // Re-check emptiness after every wake: wakeups can be spurious,
            // and another waiter may have taken the item first.
            if let Some(value) = items.pop() {
                return value;
            }
            self.available.wait(&mut items);
        }
    }

    /// Number of currently buffered items. Point-in-time only.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for HandoffQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
