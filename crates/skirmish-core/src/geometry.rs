//! Angle normalization and planar geometry.
//!
//! All angles are radians with 0 = North (+y) increasing clockwise, so the
//! unit vector of angle `a` is `(sin a, cos a)`. Absolute angles live in
//! `[0, 2π)`, relative angles in `(−π, π]`.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Normalize an angle into `[0, 2π)`.
pub fn normal_absolute_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly TAU
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Normalize an angle into `(−π, π]`.
pub fn normal_relative_angle(angle: f64) -> f64 {
    let a = normal_absolute_angle(angle);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

/// Unit vector pointing along `angle`.
pub fn unit_vector(angle: f64) -> DVec2 {
    DVec2::new(angle.sin(), angle.cos())
}

/// Point reached by travelling `distance` from `origin` along `angle`.
pub fn project(origin: DVec2, angle: f64, distance: f64) -> DVec2 {
    origin + unit_vector(angle) * distance
}

/// Absolute angle of the vector `v` (0 = North, clockwise).
pub fn vector_angle(v: DVec2) -> f64 {
    normal_absolute_angle(v.x.atan2(v.y))
}

/// Absolute bearing from `from` to `to`.
pub fn absolute_angle_between(from: DVec2, to: DVec2) -> f64 {
    vector_angle(to - from)
}

/// Circular interpolation from `a` toward `b` by `weight_b` along the short arc.
///
/// `weight_b = 0.0` yields `a`, `1.0` yields `b`. Result is absolute.
pub fn blend_angles(a: f64, b: f64, weight_b: f64) -> f64 {
    normal_absolute_angle(a + weight_b * normal_relative_angle(b - a))
}

/// Three-valued sign: `-1.0`, `0.0` or `1.0`.
///
/// Unlike `f64::signum`, zero (and NaN) map to `0.0`.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Replace a non-finite value by `fallback`.
pub fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}
