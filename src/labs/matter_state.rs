//! States-of-matter lab
//!
//! Closed-form phase boundaries for a water-like substance:
//! - melting point shifts linearly with pressure
//! - boiling point follows a simplified Clausius-Clapeyron curve,
//!   roughly +20 C per doubling of pressure
//! The sliders are live, so there is no run loop here - classification
//! is a pure function of the two inputs.

use serde::{Deserialize, Serialize};

use crate::render::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseOfMatter {
    Solid,
    Liquid,
    Gas,
}

impl PhaseOfMatter {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseOfMatter::Solid => "Solid",
            PhaseOfMatter::Liquid => "Liquid",
            PhaseOfMatter::Gas => "Gas",
        }
    }

    /// Box fill color for the phase display.
    pub fn color(&self) -> Rgb {
        match self {
            PhaseOfMatter::Solid => Rgb::new(144, 202, 249),
            PhaseOfMatter::Liquid => Rgb::new(100, 181, 246),
            PhaseOfMatter::Gas => Rgb::new(255, 204, 128),
        }
    }
}

/// Melting point at a given pressure: +0.5 C per atm above 1 atm.
pub fn melting_point_c(pressure_atm: f64) -> f64 {
    0.5 * (pressure_atm - 1.0)
}

/// Boiling point at a given pressure: +20 C per doubling of pressure.
/// Pressure is floored well above zero so the logarithm stays finite.
pub fn boiling_point_c(pressure_atm: f64) -> f64 {
    100.0 + 20.0 * pressure_atm.max(0.01).log2()
}

/// Classify a (temperature, pressure) pair against the two boundaries.
pub fn classify(temp_c: f64, pressure_atm: f64) -> PhaseOfMatter {
    let mp = melting_point_c(pressure_atm);
    let bp = boiling_point_c(pressure_atm);
    if temp_c < mp {
        PhaseOfMatter::Solid
    } else if temp_c < bp {
        PhaseOfMatter::Liquid
    } else {
        PhaseOfMatter::Gas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_at_one_atm() {
        assert_eq!(melting_point_c(1.0), 0.0);
        assert_eq!(boiling_point_c(1.0), 100.0);
        assert_eq!(classify(-10.0, 1.0), PhaseOfMatter::Solid);
        assert_eq!(classify(25.0, 1.0), PhaseOfMatter::Liquid);
        assert_eq!(classify(120.0, 1.0), PhaseOfMatter::Gas);
    }

    #[test]
    fn test_pressure_raises_both_boundaries() {
        // Doubling pressure adds 20 C to the boiling point
        assert!((boiling_point_c(2.0) - 120.0).abs() < 1e-9);
        assert!((boiling_point_c(4.0) - 140.0).abs() < 1e-9);
        assert!((melting_point_c(3.0) - 1.0).abs() < 1e-9);

        // 110 C is gas at 1 atm but still liquid at 2 atm
        assert_eq!(classify(110.0, 1.0), PhaseOfMatter::Gas);
        assert_eq!(classify(110.0, 2.0), PhaseOfMatter::Liquid);
    }

    #[test]
    fn test_low_pressure_stays_finite() {
        assert!(boiling_point_c(0.0).is_finite());
        assert!(boiling_point_c(-1.0).is_finite());
        // Near-vacuum: water boils well below room temperature
        assert!(boiling_point_c(0.01) < 0.0);
    }

    #[test]
    fn test_phase_colors_distinct() {
        let colors = [
            PhaseOfMatter::Solid.color(),
            PhaseOfMatter::Liquid.color(),
            PhaseOfMatter::Gas.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
