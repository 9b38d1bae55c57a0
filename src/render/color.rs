//! Color mapping for lab visuals
//!
//! Scalar quantities (pH, phase, reaction progress) map to RGB triples.
//! The universal indicator scale interpolates channel-wise between the
//! anchor colors of the printed pH chart.

use serde::{Deserialize, Serialize};

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation toward `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = crate::unit_clamp(t);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// CSS `rgb(...)` string for DOM styling.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const GREEN: Rgb = Rgb::new(0, 128, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const INDIGO: Rgb = Rgb::new(75, 0, 130);
pub const VIOLET: Rgb = Rgb::new(238, 130, 238);

/// Universal indicator anchor points: (pH, color) from the printed chart.
const UNIVERSAL_ANCHORS: [(f64, Rgb); 7] = [
    (0.0, RED),
    (3.0, ORANGE),
    (5.0, YELLOW),
    (7.0, GREEN),
    (8.0, BLUE),
    (10.0, INDIGO),
    (12.0, VIOLET),
];

/// Universal indicator color for a pH value, channel-interpolated
/// between the chart's anchor colors. Input is clamped to [0, 14].
pub fn universal_indicator(ph: f64) -> Rgb {
    let ph = ph.clamp(0.0, 14.0);
    for pair in UNIVERSAL_ANCHORS.windows(2) {
        let (lo_ph, lo) = pair[0];
        let (hi_ph, hi) = pair[1];
        if ph <= hi_ph {
            let t = (ph - lo_ph) / (hi_ph - lo_ph);
            return lo.lerp(hi, t);
        }
    }
    VIOLET
}
