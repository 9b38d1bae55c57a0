//! Starch test lab
//!
//! Iodine on plant tissue: after about ten seconds the blue-black
//! complex becomes visible, and the reaction is complete at fifteen.
//! This is the one bench timer with real pause semantics - pausing
//! holds the clock and `start()` resumes it.

use serde::{Deserialize, Serialize};

use crate::consts::SECOND_DT;
use crate::render::Rgb;
use crate::sim::{Model, Stepper};

/// Seconds until the blue-black color is visible
pub const COLOR_AT_SECS: f64 = 10.0;
/// Seconds until the reaction is complete
pub const DONE_AT_SECS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StarchParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StarchState {
    /// Reaction time so far (s)
    pub seconds: f64,
}

pub struct StarchModel;

impl Model for StarchModel {
    type Params = StarchParams;
    type State = StarchState;

    fn initial(&self, _params: &StarchParams) -> StarchState {
        StarchState::default()
    }

    fn step(&self, _params: &StarchParams, prev: &StarchState, dt: f64) -> StarchState {
        StarchState {
            seconds: prev.seconds + dt,
        }
    }

    fn milestone(&self, _params: &StarchParams, state: &StarchState) -> bool {
        state.seconds >= COLOR_AT_SECS
    }

    fn finished(&self, _params: &StarchParams, state: &StarchState) -> bool {
        state.seconds >= DONE_AT_SECS
    }
}

/// Stepper at the one-second tick.
pub fn stepper() -> Stepper<StarchModel> {
    Stepper::new(StarchModel, StarchParams, SECOND_DT)
}

/// Sample color: yellowish before the reaction shows, blue-black after.
pub fn sample_color(color_visible: bool) -> Rgb {
    if color_visible {
        Rgb::new(26, 35, 126)
    } else {
        Rgb::new(240, 230, 140)
    }
}

/// Result caption under the sample box.
pub fn sample_caption(color_visible: bool) -> &'static str {
    if color_visible {
        "Blue-Black Color (Positive)"
    } else {
        "Yellowish (Negative)"
    }
}
