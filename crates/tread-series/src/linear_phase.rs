//! Exact integrals for zero angular acceleration, where the phase is `b·u`.
//!
//! `b = 0` is handled by the polynomial limit, and `1 − cos(x)` is written as `2·sin²(x/2)`
//! so the results stay accurate for very small angular velocity.

use libm::{fabs, sin};

/// Below this `|b·x|`, `b·x − sin(b·x)` is evaluated from its Taylor expansion.
const SMALL_PHASE: f64 = 1e-3;

/// `∫₀ˣ cos(b·u) du`
pub fn cos_integral(x: f64, b: f64) -> f64 {
    if b == 0.0 { x } else { sin(b * x) / b }
}

/// `∫₀ˣ ∫₀ᵛ cos(b·u) du dv`
pub fn cos_double_integral(x: f64, b: f64) -> f64 {
    if b == 0.0 {
        return x * x / 2.0;
    }
    let half = sin(b * x / 2.0);
    2.0 * half * half / (b * b)
}

/// `∫₀ˣ sin(b·u) du`
pub fn sin_integral(x: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let half = sin(b * x / 2.0);
    2.0 * half * half / b
}

/// `∫₀ˣ ∫₀ᵛ sin(b·u) du dv`
pub fn sin_double_integral(x: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let phase = b * x;
    if fabs(phase) < SMALL_PHASE {
        // (p − sin p) / b² = b·x³/6 · (1 − p²/20 + p⁴/840)
        let p2 = phase * phase;
        return b * x * x * x / 6.0 * (1.0 - p2 / 20.0 + p2 * p2 / 840.0);
    }
    (phase - sin(phase)) / (b * b)
}
