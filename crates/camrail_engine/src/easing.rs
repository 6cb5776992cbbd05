// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing functions applied to a segment's local progress.
//!
//! Every member maps `[0, 1]` onto `[0, 1]`, is monotonic, and hits both
//! end points exactly. Families that overshoot (back, elastic, bounce) are
//! not offered because eased progress must never move backwards.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Named easing curve for a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Easing {
    /// No easing
    #[default]
    Linear,
    /// Quadratic acceleration
    QuadraticIn,
    /// Quadratic deceleration
    QuadraticOut,
    /// Quadratic acceleration then deceleration
    QuadraticInOut,
    /// Cubic acceleration
    CubicIn,
    /// Cubic deceleration
    CubicOut,
    /// Cubic acceleration then deceleration
    CubicInOut,
    /// Quartic acceleration
    QuarticIn,
    /// Quartic deceleration
    QuarticOut,
    /// Quartic acceleration then deceleration
    QuarticInOut,
    /// Sine-shaped acceleration
    SinusoidalIn,
    /// Sine-shaped deceleration
    SinusoidalOut,
    /// Sine-shaped acceleration then deceleration
    SinusoidalInOut,
    /// Exponential acceleration
    ExponentialIn,
    /// Exponential deceleration
    ExponentialOut,
    /// Exponential acceleration then deceleration
    ExponentialInOut,
    /// Circular acceleration
    CircularIn,
    /// Circular deceleration
    CircularOut,
    /// Circular acceleration then deceleration
    CircularInOut,
}

impl Easing {
    /// Map linear progress to eased progress
    pub fn apply(self, progress: f32) -> f32 {
        if progress.is_nan() || progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let k = progress;
        match self {
            Self::Linear => k,

            Self::QuadraticIn => k * k,
            Self::QuadraticOut => k * (2.0 - k),
            Self::QuadraticInOut => in_out(k, |k| k * k),

            Self::CubicIn => k * k * k,
            Self::CubicOut => {
                let k = k - 1.0;
                k * k * k + 1.0
            }
            Self::CubicInOut => in_out(k, |k| k * k * k),

            Self::QuarticIn => k * k * k * k,
            Self::QuarticOut => {
                let k = k - 1.0;
                1.0 - k * k * k * k
            }
            Self::QuarticInOut => in_out(k, |k| k * k * k * k),

            Self::SinusoidalIn => 1.0 - (k * PI / 2.0).cos(),
            Self::SinusoidalOut => (k * PI / 2.0).sin(),
            Self::SinusoidalInOut => 0.5 * (1.0 - (PI * k).cos()),

            Self::ExponentialIn => 1024f32.powf(k - 1.0),
            Self::ExponentialOut => 1.0 - 2f32.powf(-10.0 * k),
            Self::ExponentialInOut => in_out(k, |k| 1024f32.powf(k - 1.0)),

            Self::CircularIn => 1.0 - (1.0 - k * k).sqrt(),
            Self::CircularOut => {
                let k = k - 1.0;
                (1.0 - k * k).sqrt()
            }
            Self::CircularInOut => in_out(k, |k| 1.0 - (1.0 - k * k).sqrt()),
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::QuadraticIn => "Quadratic In",
            Self::QuadraticOut => "Quadratic Out",
            Self::QuadraticInOut => "Quadratic In/Out",
            Self::CubicIn => "Cubic In",
            Self::CubicOut => "Cubic Out",
            Self::CubicInOut => "Cubic In/Out",
            Self::QuarticIn => "Quartic In",
            Self::QuarticOut => "Quartic Out",
            Self::QuarticInOut => "Quartic In/Out",
            Self::SinusoidalIn => "Sinusoidal In",
            Self::SinusoidalOut => "Sinusoidal Out",
            Self::SinusoidalInOut => "Sinusoidal In/Out",
            Self::ExponentialIn => "Exponential In",
            Self::ExponentialOut => "Exponential Out",
            Self::ExponentialInOut => "Exponential In/Out",
            Self::CircularIn => "Circular In",
            Self::CircularOut => "Circular Out",
            Self::CircularInOut => "Circular In/Out",
        }
    }

    /// Get all easing curves
    pub fn all() -> &'static [Easing] {
        &[
            Self::Linear,
            Self::QuadraticIn,
            Self::QuadraticOut,
            Self::QuadraticInOut,
            Self::CubicIn,
            Self::CubicOut,
            Self::CubicInOut,
            Self::QuarticIn,
            Self::QuarticOut,
            Self::QuarticInOut,
            Self::SinusoidalIn,
            Self::SinusoidalOut,
            Self::SinusoidalInOut,
            Self::ExponentialIn,
            Self::ExponentialOut,
            Self::ExponentialInOut,
            Self::CircularIn,
            Self::CircularOut,
            Self::CircularInOut,
        ]
    }
}

/// Build a symmetric in/out curve from an ease-in curve
fn in_out(k: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if k < 0.5 {
        0.5 * ease_in(2.0 * k)
    } else {
        1.0 - 0.5 * ease_in(2.0 - 2.0 * k)
    }
}
