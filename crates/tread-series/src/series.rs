//! Truncated power series for the integrals of `cos`/`sin` of a quadratic phase.
//!
//! For angular acceleration `a != 0` and initial angular velocity `b`, completing the
//! square gives
//!
//! ```text
//! a·u²/2 + b·u = sign(a)·(w² − w0²),   w = sqrt(|a|/2)·u + sign(a)·b / (2·sqrt(|a|/2))
//! ```
//!
//! so the integrals over `u` become Fresnel-type integrals over `w`, which are expanded as
//!
//! ```text
//! ∫cos(w²)dw = Σ (-1)^i w^(4i+1) / ((4i+1)·(2i)!)
//! ∫sin(w²)dw = Σ (-1)^i w^(4i+3) / ((4i+3)·(2i+1)!)
//! ```
//!
//! and evaluated as the polynomial difference `F(w(x)) − F(w0)`. The constant phase
//! `sign(a)·w0²` is left out; the caller undoes it with [`phase_offset`](crate::phase_offset).
//!
//! The sums cancel badly once `|w|` grows, so callers check
//! [`PhaseScale::converges_over`] before trusting a result.

use crate::error::SeriesError;
use libm::{fabs, sqrt};

/// Largest `|w|` at which the default order still agrees with quadrature to ~1e-9 relative.
pub const SERIES_RADIUS: f64 = 1.5;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of series terms used by the integrator.
///
/// One extra term is always evaluated on top of [`terms`](SeriesOrder::terms) to absorb the
/// truncation bias of the last retained term.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOrder {
    terms: usize,
}

impl SeriesOrder {
    /// Terms used when nothing else is configured.
    pub const DEFAULT_TERMS: usize = 7;
    /// Largest accepted term count. Keeps every factorial finite in `f64`.
    pub const MAX_TERMS: usize = 32;

    /// Construct a series order.
    ///
    /// # Errors
    ///
    /// Returns `Err(SeriesError::InvalidTermCount)` if `terms` is zero or above [`Self::MAX_TERMS`].
    pub const fn new(terms: usize) -> Result<Self, SeriesError> {
        if terms == 0 {
            return Err(SeriesError::InvalidTermCount("must be at least 1"));
        }
        if terms > Self::MAX_TERMS {
            return Err(SeriesError::InvalidTermCount("must not exceed MAX_TERMS"));
        }
        Ok(SeriesOrder { terms })
    }

    /// Returns the configured term count.
    pub fn terms(&self) -> usize {
        self.terms
    }

    /// Returns the number of terms actually summed (configured + 1).
    pub fn evaluated_terms(&self) -> usize {
        self.terms + 1
    }
}

impl Default for SeriesOrder {
    fn default() -> Self {
        SeriesOrder {
            terms: Self::DEFAULT_TERMS,
        }
    }
}

#[derive(Clone, Copy)]
enum Kernel {
    Cos,
    Sin,
}

impl Kernel {
    /// Exponent of the leading term.
    fn first_exponent(self) -> usize {
        match self {
            Kernel::Cos => 1,
            Kernel::Sin => 3,
        }
    }

    /// `w` raised to the leading exponent.
    fn leading_power(self, w: f64) -> f64 {
        match self {
            Kernel::Cos => w,
            Kernel::Sin => w * w * w,
        }
    }

    /// `n` such that the leading term's factorial is `n!`.
    fn first_factorial(self) -> usize {
        match self {
            Kernel::Cos => 0,
            Kernel::Sin => 1,
        }
    }
}

/// Partial sums of one series, all taken in a single pass.
struct Sums {
    /// `Σ c_i·(w^n − w0^n)`
    first: f64,
    /// `Σ c_i·(w^(n+1) − w0^(n+1)) / (n+1)`
    second: f64,
    /// `Σ c_i·w0^n`
    constant: f64,
}

/// Scale constants of one constant-acceleration interval.
///
/// Built once per segment evaluation and shared by the first and second integrals, so no
/// state outlives the call that created it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseScale {
    sign: f64,
    /// `sqrt(|a|/2)`
    sqrt_a: f64,
    inv_sqrt_a: f64,
    /// `2/|a|`
    inv_a: f64,
    /// `w0 = sign(a)·b / (2·sqrt(|a|/2))`
    shift: f64,
    terms: usize,
}

impl PhaseScale {
    /// Derive the scale constants for angular acceleration `alpha` and initial angular
    /// velocity `omega`.
    ///
    /// # Returns
    ///
    /// `None` when `alpha` is exactly zero; use [`linear_phase`](crate::linear_phase) instead.
    pub fn new(alpha: f64, omega: f64, order: SeriesOrder) -> Option<Self> {
        if alpha == 0.0 {
            return None;
        }
        let sign = if alpha > 0.0 { 1.0 } else { -1.0 };
        let magnitude = alpha * sign;
        let sqrt_a = sqrt(magnitude / 2.0);
        Some(PhaseScale {
            sign,
            sqrt_a,
            inv_sqrt_a: 1.0 / sqrt_a,
            inv_a: 2.0 / magnitude,
            shift: sign * omega / (2.0 * sqrt_a),
            terms: order.evaluated_terms(),
        })
    }

    /// The substitution variable `w` at time `x`.
    pub fn substitution(&self, x: f64) -> f64 {
        self.sqrt_a * x + self.shift
    }

    /// Whether both ends of `[0, x]` map inside [`SERIES_RADIUS`].
    ///
    /// `w` is linear in `x`, so checking the ends covers the whole interval.
    pub fn converges_over(&self, x: f64) -> bool {
        fabs(self.shift) <= SERIES_RADIUS && fabs(self.substitution(x)) <= SERIES_RADIUS
    }

    /// Approximates `∫₀ˣ cos(phase(u)) du`.
    pub fn cos_integral(&self, x: f64) -> f64 {
        self.sums(Kernel::Cos, x).first * self.inv_sqrt_a
    }

    /// Approximates `∫₀ˣ ∫₀ᵛ cos(phase(u)) du dv`.
    pub fn cos_double_integral(&self, x: f64) -> f64 {
        let sums = self.sums(Kernel::Cos, x);
        sums.second * self.inv_a - sums.constant * self.inv_sqrt_a * x
    }

    /// Approximates `∫₀ˣ sin(phase(u)) du`.
    pub fn sin_integral(&self, x: f64) -> f64 {
        self.sign * self.sums(Kernel::Sin, x).first * self.inv_sqrt_a
    }

    /// Approximates `∫₀ˣ ∫₀ᵛ sin(phase(u)) du dv`.
    pub fn sin_double_integral(&self, x: f64) -> f64 {
        let sums = self.sums(Kernel::Sin, x);
        self.sign * (sums.second * self.inv_a - sums.constant * self.inv_sqrt_a * x)
    }

    fn sums(&self, kernel: Kernel, x: f64) -> Sums {
        let w = self.substitution(x);
        let w0 = self.shift;
        let w4 = (w * w) * (w * w);
        let w04 = (w0 * w0) * (w0 * w0);

        let mut w_pow = kernel.leading_power(w);
        let mut w0_pow = kernel.leading_power(w0);
        let mut factorial = 1.0;
        let mut term_sign = 1.0;
        let mut sums = Sums {
            first: 0.0,
            second: 0.0,
            constant: 0.0,
        };

        for i in 0..self.terms {
            let exponent = (4 * i + kernel.first_exponent()) as f64;
            let denominator = term_sign * exponent * factorial;

            sums.first += (w_pow - w0_pow) / denominator;
            sums.second += (w_pow * w - w0_pow * w0) / (denominator * (exponent + 1.0));
            sums.constant += w0_pow / denominator;

            w_pow *= w4;
            w0_pow *= w04;
            let n = (2 * i + kernel.first_factorial()) as f64;
            factorial *= (n + 1.0) * (n + 2.0);
            term_sign = -term_sign;
        }

        sums
    }
}
