//! Acids and bases mixing lab
//!
//! Two bench substances mix to the rounded average of their pH values;
//! an indicator maps the result to a color. The universal indicator
//! strip additionally gets a continuously interpolated color from
//! [`crate::render::color::universal_indicator`].

use serde::{Deserialize, Serialize};

/// Bench substances with their reference pH values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Substance {
    Hcl,
    H2so4,
    AceticAcid,
    Naoh,
    Ammonia,
    Water,
}

impl Substance {
    pub fn ph(&self) -> i32 {
        match self {
            Substance::Hcl => 1,
            Substance::H2so4 => 1,
            Substance::AceticAcid => 4,
            Substance::Naoh => 13,
            Substance::Ammonia => 11,
            Substance::Water => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Substance::Hcl => "HCl (Strong Acid)",
            Substance::H2so4 => "H2SO4 (Strong Acid)",
            Substance::AceticAcid => "CH3COOH (Weak Acid)",
            Substance::Naoh => "NaOH (Strong Base)",
            Substance::Ammonia => "NH3 (Weak Base)",
            Substance::Water => "Water",
        }
    }

    pub fn all() -> [Substance; 6] {
        [
            Substance::Hcl,
            Substance::H2so4,
            Substance::AceticAcid,
            Substance::Naoh,
            Substance::Ammonia,
            Substance::Water,
        ]
    }
}

/// Indicator papers on the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Indicator {
    #[default]
    Litmus,
    Phenolphthalein,
}

/// pH of an equal-parts mix: the rounded average of the two values.
pub fn mix_ph(a: Substance, b: Substance) -> i32 {
    ((a.ph() + b.ph()) as f64 / 2.0).round() as i32
}

/// Indicator color name for a pH value.
pub fn indicator_color(ph: i32, indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Litmus => {
            if ph < 7 {
                "red"
            } else if ph > 7 {
                "blue"
            } else {
                "purple"
            }
        }
        Indicator::Phenolphthalein => {
            if ph > 8 {
                "pink"
            } else {
                "colorless"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::{self, universal_indicator};

    #[test]
    fn test_strong_acid_plus_strong_base_neutralizes() {
        let ph = mix_ph(Substance::Hcl, Substance::Naoh);
        assert_eq!(ph, 7);
        assert_eq!(indicator_color(ph, Indicator::Litmus), "purple");
    }

    #[test]
    fn test_litmus_branches() {
        assert_eq!(
            indicator_color(mix_ph(Substance::Hcl, Substance::Water), Indicator::Litmus),
            "red"
        );
        assert_eq!(
            indicator_color(mix_ph(Substance::Naoh, Substance::Water), Indicator::Litmus),
            "blue"
        );
    }

    #[test]
    fn test_phenolphthalein_needs_strong_base() {
        // NaOH + water: (13+7)/2 = 10 -> pink
        let basic = mix_ph(Substance::Naoh, Substance::Water);
        assert_eq!(indicator_color(basic, Indicator::Phenolphthalein), "pink");
        // NH3 + water: (11+7)/2 = 9 -> pink; acetic + water: (4+7)/2 -> 6
        let weak = mix_ph(Substance::AceticAcid, Substance::Water);
        assert_eq!(indicator_color(weak, Indicator::Phenolphthalein), "colorless");
    }

    #[test]
    fn test_mix_rounds_half_up() {
        // (1+4)/2 = 2.5 rounds to 3
        assert_eq!(mix_ph(Substance::Hcl, Substance::AceticAcid), 3);
    }

    #[test]
    fn test_universal_strip_tracks_mix() {
        let neutral = mix_ph(Substance::Hcl, Substance::Naoh);
        assert_eq!(universal_indicator(neutral as f64), color::GREEN);
        let acid = mix_ph(Substance::Hcl, Substance::H2so4);
        assert_eq!(universal_indicator(acid as f64), color::RED.lerp(color::ORANGE, 1.0 / 3.0));
    }
}
