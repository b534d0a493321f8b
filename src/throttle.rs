//! Call-rate limiting for scroll handlers.
//!
//! A throttled call either runs now or is dropped. Nothing is queued and no
//! timers are involved; the decision is a timestamp comparison.

use std::cell::Cell;

/// Millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `performance.now()`, falling back to `Date.now()`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct PerformanceClock;

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        if let Some(window) = web_sys::window() {
            if let Some(perf) = window.performance() {
                return perf.now();
            }
        }
        js_sys::Date::now()
    }
}

/// Clock advanced by hand. Used by tests and benches.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Timestamp gate: admits at most one call per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Returns `true` and records `now_ms` if the call may proceed.
    ///
    /// The first call always proceeds. A clock that moved backwards restarts
    /// the window instead of blocking until it catches up.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        let pass = match self.last_ms {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= self.interval_ms,
        };
        if pass {
            self.last_ms = Some(now_ms);
        }
        pass
    }
}

/// A callback wrapped in a [`Throttle`].
pub struct Throttled<F, C> {
    callback: F,
    gate: Throttle,
    clock: C,
}

impl<F, C: Clock> Throttled<F, C> {
    pub fn new(callback: F, interval_ms: f64, clock: C) -> Self {
        Self {
            callback,
            gate: Throttle::new(interval_ms),
            clock,
        }
    }

    /// Forward `arg` to the callback if the interval has elapsed.
    ///
    /// Returns `Some` with the callback's result when forwarded, `None` when
    /// dropped.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.gate.admit(self.clock.now_ms()) {
            Some((self.callback)(arg))
        } else {
            None
        }
    }
}

/// Wrap `callback` so it runs at most once per `interval_ms`.
pub fn throttle<F, C: Clock>(callback: F, interval_ms: f64, clock: C) -> Throttled<F, C> {
    Throttled::new(callback, interval_ms, clock)
}
