//! Sound wave lab
//!
//! A sine oscillator with adjustable pitch and volume. The simulation
//! state is just the scrolling phase; presentation samples the wave
//! into polyline points for the scope display.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FAST_DT;
use crate::sim::{Model, Stepper};

/// Phase advance per tick (radians) - the scroll speed of the scope
pub const PHASE_STEP: f64 = 0.1;

/// Audible range covered by the pitch slider (Hz)
pub const MIN_FREQ: f64 = 20.0;
pub const MAX_FREQ: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundParams {
    /// Pitch (Hz)
    pub frequency_hz: f64,
    /// Volume (0-1)
    pub amplitude: f64,
}

impl Default for SoundParams {
    fn default() -> Self {
        Self {
            frequency_hz: 440.0,
            amplitude: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SoundState {
    /// Scope phase offset (radians)
    pub phase: f64,
}

pub struct SoundModel;

impl Model for SoundModel {
    type Params = SoundParams;
    type State = SoundState;

    fn initial(&self, _params: &SoundParams) -> SoundState {
        SoundState::default()
    }

    fn step(&self, _params: &SoundParams, prev: &SoundState, _dt: f64) -> SoundState {
        SoundState {
            phase: (prev.phase + PHASE_STEP) % std::f64::consts::TAU,
        }
    }
}

/// Stepper at the 0.1 s scope tick.
pub fn stepper(params: SoundParams) -> Stepper<SoundModel> {
    Stepper::new(SoundModel, params, FAST_DT)
}

/// Sample the wave into `samples` polyline points. X runs 0..1 across
/// the scope; Y is the instantaneous displacement in [-1, 1], already
/// scaled by the amplitude. The scope shows `frequency / 100` cycles so
/// high pitches stay readable.
pub fn waveform(params: &SoundParams, state: &SoundState, samples: usize) -> Vec<Vec2> {
    let freq = params.frequency_hz.clamp(MIN_FREQ, MAX_FREQ);
    let amp = crate::unit_clamp(params.amplitude);
    let cycles = freq / 100.0;
    (0..samples)
        .map(|i| {
            let t = i as f64 / samples.max(1) as f64;
            let y = (std::f64::consts::TAU * cycles * t + state.phase).sin() * amp;
            Vec2::new(t as f32, y as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_scrolls_and_wraps() {
        let mut s = stepper(SoundParams::default());
        s.start();
        s.tick();
        assert!((s.state().phase - PHASE_STEP).abs() < 1e-12);
        // TAU / 0.1 ~ 62.8 ticks per revolution; phase stays bounded
        for _ in 0..1000 {
            s.tick();
        }
        assert!(s.state().phase >= 0.0 && s.state().phase < std::f64::consts::TAU);
    }

    #[test]
    fn test_waveform_amplitude_bounds() {
        let params = SoundParams {
            frequency_hz: 440.0,
            amplitude: 0.5,
        };
        let pts = waveform(&params, &SoundState::default(), 256);
        assert_eq!(pts.len(), 256);
        assert!(pts.iter().all(|p| p.y.abs() <= 0.5 + 1e-6));
        // A 440 Hz wave actually moves
        assert!(pts.iter().any(|p| p.y.abs() > 0.1));
    }

    #[test]
    fn test_waveform_silent_at_zero_amplitude() {
        let params = SoundParams {
            frequency_hz: 440.0,
            amplitude: 0.0,
        };
        let pts = waveform(&params, &SoundState::default(), 64);
        assert!(pts.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_waveform_clamps_out_of_range_pitch() {
        let low = SoundParams {
            frequency_hz: 1.0,
            amplitude: 1.0,
        };
        let clamped = SoundParams {
            frequency_hz: MIN_FREQ,
            amplitude: 1.0,
        };
        assert_eq!(
            waveform(&low, &SoundState::default(), 32),
            waveform(&clamped, &SoundState::default(), 32)
        );
    }

    #[test]
    fn test_higher_pitch_means_more_zero_crossings() {
        let crossings = |freq: f64| {
            let params = SoundParams {
                frequency_hz: freq,
                amplitude: 1.0,
            };
            let pts = waveform(&params, &SoundState::default(), 2048);
            pts.windows(2)
                .filter(|w| (w[0].y <= 0.0) != (w[1].y <= 0.0))
                .count()
        };
        assert!(crossings(880.0) > crossings(220.0));
    }
}
