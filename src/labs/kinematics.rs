//! Work, energy and power lab
//!
//! Closed-form kinematics under constant force: work = F d,
//! v = d / t, KE = m v^2 / 2, power = W / t. Zero time or distance is a
//! legal input and produces zero-valued derived quantities, never NaN.
//! The animated block runs through a [`ClosedForm`] model so the track
//! position replays at the fixed tick.

use serde::{Deserialize, Serialize};

use crate::consts::FAST_DT;
use crate::sim::{ClosedForm, Stepper, Timed};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicsParams {
    /// Applied force (N)
    pub force_n: f64,
    /// Distance traveled (m)
    pub distance_m: f64,
    /// Travel time (s)
    pub time_s: f64,
    /// Block mass (kg)
    pub mass_kg: f64,
}

impl Default for KinematicsParams {
    fn default() -> Self {
        Self {
            force_n: 10.0,
            distance_m: 5.0,
            time_s: 2.0,
            mass_kg: 2.0,
        }
    }
}

/// Derived quantities for the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    pub work_j: f64,
    pub velocity_ms: f64,
    pub kinetic_j: f64,
    pub power_w: f64,
}

impl KinematicsParams {
    /// All derived quantities. Division by a zero time yields zero
    /// velocity and power rather than infinities.
    pub fn derived(&self) -> Derived {
        let work_j = self.force_n * self.distance_m;
        let velocity_ms = if self.time_s > 0.0 {
            self.distance_m / self.time_s
        } else {
            0.0
        };
        let kinetic_j = 0.5 * self.mass_kg * velocity_ms * velocity_ms;
        let power_w = if self.time_s > 0.0 {
            work_j / self.time_s
        } else {
            0.0
        };
        Derived {
            work_j,
            velocity_ms,
            kinetic_j,
            power_w,
        }
    }

    /// Track position as a fraction of the full distance at time `t`.
    pub fn track_fraction(&self, t: f64) -> f64 {
        if self.time_s > 0.0 {
            crate::unit_clamp(t / self.time_s)
        } else {
            1.0
        }
    }
}

/// Type of the animated-block stepper.
pub type TrackModel =
    ClosedForm<KinematicsParams, f64, fn(&KinematicsParams, f64) -> f64, fn(&KinematicsParams, f64) -> bool>;

/// Stepper replaying the block position along the track; the run ends
/// when the travel time elapses.
pub fn track(params: KinematicsParams) -> Stepper<TrackModel> {
    let model: TrackModel = ClosedForm::new(
        (|params, t| params.track_fraction(t)) as fn(&KinematicsParams, f64) -> f64,
    )
    .until((|params, t| t >= params.time_s) as fn(&KinematicsParams, f64) -> bool);
    Stepper::new(model, params, FAST_DT)
}

/// Pixel offset of the block for a track of `track_len` pixels.
pub fn block_offset_px(state: &Timed<f64>, track_len: f64) -> f64 {
    state.value * track_len
}
