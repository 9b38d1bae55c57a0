//! Heat and temperature lab
//!
//! A block of material under a constant heating power:
//! `dT = P dt / (m c)`, clamped at the 100 C boiling cap. Pause and
//! resume are part of the bench workflow, so the run never finishes on
//! its own - it just holds at the cap.

use serde::{Deserialize, Serialize};

use crate::consts::FAST_DT;
use crate::sim::{Model, Stepper};

/// Temperature ceiling of the experiment (water boiling point, C)
pub const BOILING_CAP: f64 = 100.0;

/// Materials on the bench with their specific heat capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Water,
    Aluminum,
    Copper,
    Iron,
}

impl Material {
    /// Specific heat capacity (J/kg C)
    pub fn specific_heat(&self) -> f64 {
        match self {
            Material::Water => 4186.0,
            Material::Aluminum => 900.0,
            Material::Copper => 385.0,
            Material::Iron => 450.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Material::Water => "Water",
            Material::Aluminum => "Aluminum",
            Material::Copper => "Copper",
            Material::Iron => "Iron",
        }
    }

    pub fn all() -> [Material; 4] {
        [
            Material::Water,
            Material::Aluminum,
            Material::Copper,
            Material::Iron,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatingParams {
    pub material: Material,
    /// Sample mass (kg)
    pub mass_kg: f64,
    /// Heating power (W)
    pub power_w: f64,
    /// Starting temperature (C)
    pub initial_temp_c: f64,
}

impl Default for HeatingParams {
    fn default() -> Self {
        Self {
            material: Material::Water,
            mass_kg: 1.0,
            power_w: 50.0,
            initial_temp_c: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatingState {
    /// Sample temperature (C)
    pub temp_c: f64,
}

pub struct HeatingModel;

impl Model for HeatingModel {
    type Params = HeatingParams;
    type State = HeatingState;

    fn initial(&self, params: &HeatingParams) -> HeatingState {
        HeatingState {
            temp_c: params.initial_temp_c.min(BOILING_CAP),
        }
    }

    fn step(&self, params: &HeatingParams, prev: &HeatingState, dt: f64) -> HeatingState {
        let heat_capacity = params.mass_kg * params.material.specific_heat();
        // Zero mass would divide to infinity; a massless sample just
        // doesn't heat.
        let delta = if heat_capacity > 0.0 {
            params.power_w.max(0.0) * dt / heat_capacity
        } else {
            0.0
        };
        HeatingState {
            temp_c: (prev.temp_c + delta).min(BOILING_CAP),
        }
    }

    fn milestone(&self, _params: &HeatingParams, state: &HeatingState) -> bool {
        state.temp_c >= BOILING_CAP
    }
}

/// Stepper at the 0.1 s tick.
pub fn stepper(params: HeatingParams) -> Stepper<HeatingModel> {
    Stepper::new(HeatingModel, params, FAST_DT)
}

/// Mercury column height as a fraction of the 0-100 C scale.
pub fn thermometer_fill(state: &HeatingState) -> f64 {
    crate::unit_clamp(state.temp_c / BOILING_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunPhase;

    #[test]
    fn test_heating_rate_matches_specific_heat() {
        // 50 W into 1 kg of water: 50 * 0.1 / 4186 per tick
        let mut s = stepper(HeatingParams::default());
        s.start();
        s.tick();
        let expected = 20.0 + 50.0 * 0.1 / 4186.0;
        assert!((s.state().temp_c - expected).abs() < 1e-12);

        // Copper heats far faster than water at the same power
        let mut copper = stepper(HeatingParams {
            material: Material::Copper,
            ..Default::default()
        });
        copper.start();
        copper.tick();
        assert!(copper.state().temp_c > s.state().temp_c);
    }

    #[test]
    fn test_clamps_at_boiling_and_keeps_ticking() {
        let mut s = stepper(HeatingParams {
            material: Material::Copper,
            mass_kg: 0.1,
            power_w: 500.0,
            initial_temp_c: 99.0,
        });
        s.start();
        let mut milestones = 0;
        for _ in 0..100 {
            if s.tick().milestone {
                milestones += 1;
            }
        }
        assert_eq!(s.state().temp_c, BOILING_CAP);
        assert_eq!(milestones, 1);
        // Clamped model holds at the ceiling but the run stays live
        assert_eq!(s.phase(), RunPhase::Running);
    }

    #[test]
    fn test_zero_mass_does_not_blow_up() {
        let mut s = stepper(HeatingParams {
            mass_kg: 0.0,
            ..Default::default()
        });
        s.start();
        s.tick();
        assert_eq!(s.state().temp_c, 20.0);
        assert!(s.state().temp_c.is_finite());
    }

    #[test]
    fn test_pause_resume_holds_temperature() {
        let mut s = stepper(HeatingParams::default());
        s.start();
        for _ in 0..50 {
            s.tick();
        }
        let held = s.state().temp_c;
        s.pause();
        s.tick();
        assert_eq!(s.state().temp_c, held);
        s.start();
        s.tick();
        assert!(s.state().temp_c > held);
    }

    #[test]
    fn test_thermometer_fill() {
        assert_eq!(thermometer_fill(&HeatingState { temp_c: 0.0 }), 0.0);
        assert_eq!(thermometer_fill(&HeatingState { temp_c: 50.0 }), 0.5);
        assert_eq!(thermometer_fill(&HeatingState { temp_c: 100.0 }), 1.0);
        // Sub-zero starting temperatures park the column at the bulb
        assert_eq!(thermometer_fill(&HeatingState { temp_c: -10.0 }), 0.0);
    }
}
