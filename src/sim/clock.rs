//! Clock capability for driving steppers
//!
//! The core never reads wall time on its own: a clock is injected, so
//! the tick cadence can be driven deterministically in tests and from
//! whatever frame source the platform provides.

use std::cell::Cell;

/// Monotonic time source in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Wall clock anchored at construction.
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-cranked clock for tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt.max(0.0));
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Turns absolute clock readings into per-frame deltas for
/// [`Stepper::advance`](super::Stepper::advance).
pub struct FrameTimer<C: Clock> {
    clock: C,
    last: Option<f64>,
}

impl<C: Clock> FrameTimer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: None }
    }

    /// Delta since the previous call; zero on the first call and after
    /// [`rewind`](Self::rewind).
    pub fn frame(&mut self) -> f64 {
        let now = self.clock.now();
        let dt = match self.last {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous reading. Call when resuming after a pause so
    /// the wall time spent paused is not fed to the stepper.
    pub fn rewind(&mut self) {
        self.last = None;
    }
}
