//! Stepped Taylor expansion of the heading phasor.
//!
//! Covers the intervals the series in `w` cannot: a small angular acceleration with a large
//! angular velocity pushes the shift `w0` far outside the series radius, and a long interval
//! does the same to `w`. Here the interval is cut into steps over which the heading turns by
//! at most [`STEP_PHASE`], and `e^{iφ(u)}` is expanded in powers of `u` on each step.

use libm::{ceil, fabs, fmax};

use crate::Point;

/// Largest heading change covered by one step (rad).
pub const STEP_PHASE: f64 = 0.5;

/// Taylor terms evaluated per step.
const STEP_TERMS: usize = 18;

/// Upper bound on the step count for a single interval.
const MAX_STEPS: f64 = 1_048_576.0;

/// Integrate `(speed + accel·u)·(cos φ(u), sin φ(u))` over `u ∈ [0, t]`, with
/// `φ(u) = alpha·u²/2 + omega·u`.
///
/// The result is in the frame whose x axis is the heading at `u = 0`.
pub fn displacement(t: f64, alpha: f64, omega: f64, accel: f64, speed: f64) -> Point {
    // φ' is linear in u, so its largest magnitude sits at an end of the interval.
    let rate = fmax(fabs(omega), fabs(omega + alpha * t));
    let turn = rate * t + fabs(alpha) * t * t / 2.0;
    let steps = ceil(turn / STEP_PHASE).clamp(1.0, MAX_STEPS);
    let h = t / steps;

    let mut total = Point::ORIGIN;
    for k in 0..steps as usize {
        let u = k as f64 * h;
        let heading = omega * u + alpha * u * u / 2.0;
        let local = step(h, alpha, omega + alpha * u, accel, speed + accel * u);
        total = total + local.rotated(heading);
    }
    total
}

/// One step with `|omega|·h + |alpha|·h²/2 ≤ STEP_PHASE`.
///
/// `d_n = c_n·hⁿ` are the scaled Taylor coefficients of `e^{iφ(u)}`, from
/// `(n + 1)·c_{n+1} = i·(omega·c_n + alpha·c_{n−1})`.
fn step(h: f64, alpha: f64, omega: f64, accel: f64, speed: f64) -> Point {
    let bh = omega * h;
    let ah = alpha * h * h;
    let mut previous = Point::ORIGIN;
    let mut current = Point::new(1.0, 0.0);
    let mut sum = Point::ORIGIN;

    for n in 0..STEP_TERMS {
        let n = n as f64;
        let weight = speed / (n + 1.0) + accel * h / (n + 2.0);
        sum = sum + Point::new(current.x * weight, current.y * weight);

        // Multiply by i and divide by n + 1.
        let re = bh * current.x + ah * previous.x;
        let im = bh * current.y + ah * previous.y;
        previous = current;
        current = Point::new(-im / (n + 1.0), re / (n + 1.0));
    }

    Point::new(sum.x * h, sum.y * h)
}
