// Copyright 2026 the Linemorph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-based fixed-interval tick source.
//!
//! [`IntervalLoop`] drives a tick callback from a background thread at a
//! fixed cadence, [`TICK_INTERVAL`] by default. It plays the role a
//! `setInterval`-style host timer plays on the web: the animation core
//! decides *what* happens per tick, this crate decides *when* ticks happen.
//!
//! The callback returns [`ControlFlow`]: [`ControlFlow::Continue`] keeps the
//! loop armed, [`ControlFlow::Break`] disarms it from inside the tick. That
//! return-value shape lets a run end itself without the callback having to
//! reach back into the loop that is currently calling it. External code can
//! also disarm with [`stop`](IntervalLoop::stop).
//!
//! Ticks carry a monotonically increasing index that survives stop/start
//! cycles, so traces from separate runs stay ordered.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// The default tick cadence: one tick every 50 ms.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Locks a mutex, ignoring poisoning.
///
/// A panic in the tick callback poisons the lock but leaves the data in a
/// consistent state (the loop owns no cross-tick invariants of its own).
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type TickCallback = dyn FnMut(u64) -> ControlFlow<()> + Send;

struct Inner {
    /// The user-supplied callback, locked once per tick.
    callback: Mutex<Box<TickCallback>>,

    /// Monotonic tick counter across all start/stop cycles.
    tick_counter: AtomicU64,

    /// Whether the loop is currently armed.
    running: AtomicBool,

    /// Sleep duration between ticks.
    interval: Duration,
}

/// A fixed-interval animation loop backed by a worker thread.
///
/// Create with [`IntervalLoop::new`], then call [`start`](Self::start) to
/// begin receiving callbacks. The first tick fires one interval after
/// `start`, not immediately. The loop runs until the callback returns
/// [`ControlFlow::Break`], [`stop`](Self::stop) is called, or the
/// `IntervalLoop` is dropped.
pub struct IntervalLoop {
    inner: Arc<Inner>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl IntervalLoop {
    /// Creates a new `IntervalLoop` at the default [`TICK_INTERVAL`] that is
    /// **not yet running**.
    ///
    /// `callback` receives the tick index on every tick once
    /// [`start`](Self::start) is called.
    pub fn new(callback: impl FnMut(u64) -> ControlFlow<()> + Send + 'static) -> Self {
        Self::with_interval(callback, TICK_INTERVAL)
    }

    /// Creates a new `IntervalLoop` with a custom tick interval.
    pub fn with_interval(
        callback: impl FnMut(u64) -> ControlFlow<()> + Send + 'static,
        interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                callback: Mutex::new(Box::new(callback)),
                tick_counter: AtomicU64::new(0),
                running: AtomicBool::new(false),
                interval,
            }),
            worker: Mutex::new(None),
        }
    }

    /// Starts the tick loop.
    ///
    /// If already running, this is a no-op — a second `start` never spawns a
    /// second worker or doubles the tick rate.
    pub fn start(&self) {
        let mut worker = lock(&self.worker);
        if self.inner.running.load(Ordering::Acquire) {
            return;
        }

        // A worker left here disarmed itself via `Break`; it must be fully
        // gone before `running` flips back to true, or it could observe the
        // new flag and tick alongside the fresh worker.
        if let Some(previous) = worker.take() {
            let _ = previous.join();
        }
        self.inner.running.store(true, Ordering::Release);

        let inner = Arc::clone(&self.inner);
        *worker = Some(thread::spawn(move || {
            loop {
                thread::sleep(inner.interval);
                if !inner.running.load(Ordering::Acquire) {
                    break;
                }
                let tick_index = inner.tick_counter.fetch_add(1, Ordering::Relaxed);
                if lock(&inner.callback)(tick_index) == ControlFlow::Break(()) {
                    inner.running.store(false, Ordering::Release);
                    break;
                }
            }
        }));
    }

    /// Stops the tick loop.
    ///
    /// Waits for the worker thread to exit, so no tick callback runs after
    /// this returns. Idempotent, and safe to call after the callback has
    /// already disarmed the loop via [`ControlFlow::Break`]. Can be
    /// restarted by calling [`start`](Self::start) again.
    ///
    /// Must not be called from inside the tick callback — return
    /// [`ControlFlow::Break`] there instead.
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::Release);
        let handle = lock(&self.worker).take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Returns `true` if the loop is currently armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Returns the number of ticks delivered across all runs so far.
    #[must_use]
    pub fn ticks_delivered(&self) -> u64 {
        self.inner.tick_counter.load(Ordering::Relaxed)
    }
}

impl Drop for IntervalLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

impl core::fmt::Debug for IntervalLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalLoop")
            .field("running", &self.is_running())
            .field("tick_counter", &self.ticks_delivered())
            .field("interval", &self.inner.interval)
            .finish_non_exhaustive()
    }
}
