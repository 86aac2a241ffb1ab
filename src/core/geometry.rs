//! Pure angle and position math shared by every widget.
//!
//! Angles are radians everywhere; degrees only appear at display boundaries.
//! Non-finite inputs are not sanitized and propagate to the outputs.

use super::Point;

pub const TAU: f64 = std::f64::consts::TAU;

/// Unit-circle position at `angle`: `(cos, sin)`.
#[must_use]
pub fn point_on_circle(angle: f64) -> Point {
    Point::new(angle.cos(), angle.sin())
}

/// Position at `angle` on a circle of `radius` around `center`, in screen
/// space (y grows downwards, matching SVG).
#[must_use]
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Inverse of `point_on_circle`, normalized into `[0, 2π)`.
#[must_use]
pub fn angle_from_point(x: f64, y: f64) -> f64 {
    normalize_angle(y.atan2(x))
}

/// Rotates `point` around the origin.
#[must_use]
pub fn rotate(point: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wraps any angle into `[0, 2π)`. Negative inputs wrap instead of clamping.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[must_use]
pub fn ease_in_out_sine(t: f64) -> f64 {
    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalize_angle_wraps_negative_inputs() {
        assert_relative_eq!(
            normalize_angle(-FRAC_PI_2),
            3.0 * FRAC_PI_2,
            epsilon = 1e-12
        );
        assert_relative_eq!(normalize_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn normalize_angle_never_returns_tau_for_tiny_negative() {
        let wrapped = normalize_angle(-1e-18);
        assert!((0.0..TAU).contains(&wrapped));
    }

    #[test]
    fn non_finite_inputs_propagate() {
        assert!(normalize_angle(f64::NAN).is_nan());
        assert!(lerp(0.0, f64::INFINITY, 0.5).is_infinite());
        assert!(!point_on_circle(f64::NAN).is_finite());
    }

    #[test]
    fn rotate_quarter_turn_maps_x_axis_to_y_axis() {
        let rotated = rotate(Point::new(1.0, 0.0), FRAC_PI_2);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degree_conversions_are_inverse() {
        assert_relative_eq!(to_degrees(PI), 180.0, epsilon = 1e-12);
        assert_relative_eq!(to_radians(to_degrees(1.234)), 1.234, epsilon = 1e-12);
    }

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_relative_eq!(ease_in_out_sine(0.5), 0.5, epsilon = 1e-12);
    }
}
