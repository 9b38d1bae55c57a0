//! Time-series collection for tables and line charts
//!
//! Steppers append one `(time, value)` row per tick; the UI renders the
//! rows as a table or scales them into a polyline. Rows are never
//! evicted - lab runs are bounded, so growth is too.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A labeled series of `(time, value)` samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, time: f64, value: f64) {
        self.points.push((time, value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Last sample, if any.
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Scale samples into a `width` x `height` box, origin top-left,
    /// y growing downward (screen convention). Value range is taken
    /// from the data; a flat series maps to the vertical center.
    pub fn polyline(&self, width: f32, height: f32) -> Vec<Vec2> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let (t0, t1) = (
            self.points.first().map(|p| p.0).unwrap_or(0.0),
            self.points.last().map(|p| p.0).unwrap_or(0.0),
        );
        let t_span = (t1 - t0).max(f64::EPSILON);

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &(_, v) in &self.points {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        let v_span = hi - lo;

        self.points
            .iter()
            .map(|&(t, v)| {
                let x = ((t - t0) / t_span) as f32 * width;
                let y = if v_span > 0.0 {
                    height - ((v - lo) / v_span) as f32 * height
                } else {
                    height / 2.0
                };
                Vec2::new(x, y)
            })
            .collect()
    }
}
