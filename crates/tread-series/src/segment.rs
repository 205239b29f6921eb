//! Displacement over one constant-acceleration interval.

use crate::linear_phase;
use crate::series::{PhaseScale, SeriesOrder};
use crate::taylor;
use crate::Point;

/// Heading rotation that the series integrals carry on top of the true heading.
///
/// Completing the square leaves a constant phase of `omega² / (2·alpha)` inside the
/// integrated `cos`/`sin`. [`integrate_segment`] removes it before returning.
///
/// Returns 0 when `alpha` is exactly zero.
pub fn phase_offset(alpha: f64, omega: f64) -> f64 {
    if alpha == 0.0 {
        0.0
    } else {
        omega * omega / (2.0 * alpha)
    }
}

/// Integrate `(speed + accel·u)·(cos φ(u), sin φ(u))` over `u ∈ [0, t]`, with
/// `φ(u) = alpha·u²/2 + omega·u`.
///
/// Integration by parts turns the ramping speed into first and second integrals of the
/// heading terms:
///
/// ```text
/// x(t) = (speed + accel·t)·C1(t) − accel·C2(t)
/// ```
///
/// `alpha == 0` uses the exact forms. Otherwise the series is used while its substitution
/// variable stays inside [`SERIES_RADIUS`](crate::SERIES_RADIUS), and the stepped expansion in
/// [`taylor`] covers the rest.
///
/// # Arguments
///
/// * `t`: Time since the interval start.
/// * `alpha`: Angular acceleration over the interval.
/// * `omega`: Angular velocity at the interval start.
/// * `accel`: Linear acceleration over the interval.
/// * `speed`: Linear speed at the interval start.
/// * `order`: Series order for the general case.
///
/// # Returns
///
/// The displacement in the frame whose x axis is the heading at the interval start.
pub fn integrate_segment(
    t: f64,
    alpha: f64,
    omega: f64,
    accel: f64,
    speed: f64,
    order: SeriesOrder,
) -> Point {
    let reach = speed + accel * t;
    match PhaseScale::new(alpha, omega, order) {
        Some(scale) if scale.converges_over(t) => Point::new(
            reach * scale.cos_integral(t) - accel * scale.cos_double_integral(t),
            reach * scale.sin_integral(t) - accel * scale.sin_double_integral(t),
        )
        .rotated(-phase_offset(alpha, omega)),
        Some(_) => taylor::displacement(t, alpha, omega, accel, speed),
        None => Point::new(
            reach * linear_phase::cos_integral(t, omega)
                - accel * linear_phase::cos_double_integral(t, omega),
            reach * linear_phase::sin_integral(t, omega)
                - accel * linear_phase::sin_double_integral(t, omega),
        ),
    }
}
