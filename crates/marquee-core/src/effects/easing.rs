//! Pure easing functions for page motion and effects.
//!
//! All curves map input [0, 1] to output [0, 1] with various acceleration
//! profiles.

use serde::{Deserialize, Serialize};

/// Easing curve selection (configurable per deck player)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingKind {
    Linear,
    /// Quadratic ease-in-out, the anchor navigation curve
    EaseInOut,
    Cubic,
    Quintic,
    ExpoOut,
}

impl EasingKind {
    /// Apply the easing function to a progress value in [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingKind::Linear => t,
            EasingKind::EaseInOut => ease_in_out_quad(t),
            EasingKind::Cubic => cubic_ease_out(t),
            EasingKind::Quintic => quintic_ease_out(t),
            EasingKind::ExpoOut => exponential_ease_out(t),
        }
    }
}

/// Quadratic ease-in-out: accelerate to the midpoint, decelerate after
#[inline]
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingKind; 5] = [
        EasingKind::Linear,
        EasingKind::EaseInOut,
        EasingKind::Cubic,
        EasingKind::Quintic,
        EasingKind::ExpoOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_midpoint() {
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 0.001);
        // Slow start, slow end
        assert!(ease_in_out_quad(0.1) < 0.1);
        assert!(ease_in_out_quad(0.9) > 0.9);
    }
}
