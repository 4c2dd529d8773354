//! L4 Atomic Layer: Pure easing functions for scroll tweens
//!
//! Every easing maps progress in [0, 1] to eased progress. Curves that
//! overshoot (`Back`, `Elastic`) may leave [0, 1] in between but always
//! start at 0 and end at 1.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Signature of a pluggable easing function
pub type EaseFn = fn(f64) -> f64;

/// Easing profile applied to a tween
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    Linear,
    Quadratic,
    #[default]
    Circular,
    Cubic,
    Quintic,
    Exponential,
    Back,
    Bounce,
    Elastic,
    /// Caller-supplied curve; not representable in configuration files
    #[serde(skip)]
    Custom(EaseFn),
}

impl Easing {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value, clamped to [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Quadratic => quadratic(t),
            Easing::Circular => circular(t),
            Easing::Cubic => cubic_ease_out(t),
            Easing::Quintic => quintic_ease_out(t),
            Easing::Exponential => exponential_ease_out(t),
            Easing::Back => back(t),
            Easing::Bounce => bounce(t),
            Easing::Elastic => elastic(t),
            Easing::Custom(f) => f(t),
        }
    }

    /// Short name used in logs and configuration
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Quadratic => "quadratic",
            Easing::Circular => "circular",
            Easing::Cubic => "cubic",
            Easing::Quintic => "quintic",
            Easing::Exponential => "exponential",
            Easing::Back => "back",
            Easing::Bounce => "bounce",
            Easing::Elastic => "elastic",
            Easing::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            (Easing::Custom(_), _) | (_, Easing::Custom(_)) => false,
            _ => self.name() == other.name(),
        }
    }
}

/// Quadratic ease-out: f(t) = t(2 - t)
#[inline]
fn quadratic(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Circular ease-out: f(t) = sqrt(1 - (t - 1)²)
#[inline]
fn circular(t: f64) -> f64 {
    let k = t - 1.0;
    (1.0 - k * k).sqrt()
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

#[inline]
fn back(t: f64) -> f64 {
    const B: f64 = 4.0;
    let k = t - 1.0;
    k * k * ((B + 1.0) * k + B) + 1.0
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let k = t - 1.5 / D;
        N * k * k + 0.75
    } else if t < 2.5 / D {
        let k = t - 2.25 / D;
        N * k * k + 0.9375
    } else {
        let k = t - 2.625 / D;
        N * k * k + 0.984375
    }
}

fn elastic(t: f64) -> f64 {
    const F: f64 = 0.22;
    const E: f64 = 0.4;
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    E * 2.0_f64.powf(-10.0 * t) * ((t - F / 4.0) * (2.0 * PI) / F).sin() + 1.0
}
