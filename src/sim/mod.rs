//! Deterministic simulation core
//!
//! Every lab is built from the same three pieces:
//! - A numeric model: pure state math, no timers, no platform calls
//! - A stepper that advances the model at a fixed timestep and latches
//!   the milestone/finish predicates
//! - An injected clock, so tests drive ticks without wall-clock waits

pub mod clock;
pub mod model;
pub mod stepper;

pub use clock::{Clock, FrameTimer, ManualClock};
pub use model::{ClosedForm, Model, Timed};
pub use stepper::{RunPhase, Stepper, TickEvents};

#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
