//! # Coordinate and geometry utilities
//!
//! Small, allocation-free helpers shared by the orbit model, the collision scanner and the
//! route planner:
//!
//! - [`distance`] – Euclidean distance between two positions (km).
//! - [`normalize_to_visual_radius`] – rescale a vector to a fixed radius, keeping direction.
//! - [`wrap_angle_degrees`] – bring an angle difference into `[-180, 180]`.
//! - [`principal_angle`] – bring an angle into `[0, 2π)`.
//! - [`axis_rotation`] – elementary rotation matrix about a coordinate axis.
//! - [`eci_to_ecef`] – inertial → Earth-fixed rotation by the Earth rotation angle.
//! - [`centroid`] – mean of a set of positions.
//!
//! Degenerate inputs (zero-length or non-finite vectors) are checked explicitly: see
//! [`is_valid_position`].
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Degree, Kilometer, PositionVector, Radian, DPI};

/// Coordinate axis selector for [`axis_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Euclidean distance between two positions, in the unit of the inputs.
pub fn distance(a: &PositionVector, b: &PositionVector) -> Kilometer {
    (a - b).norm()
}

/// Rescale `v` to length `radius` while preserving its direction.
///
/// A zero-length (or non-finite) input has no direction; the result is then the zero vector.
pub fn normalize_to_visual_radius(v: &PositionVector, radius: f64) -> PositionVector {
    let len = v.norm();
    if len > 0.0 && len.is_finite() {
        v * (radius / len)
    } else {
        Vector3::zeros()
    }
}

/// Wrap an angle in degrees into `[-180, 180]`, so that 359° and 1° are 2° apart.
pub fn wrap_angle_degrees(v: Degree) -> Degree {
    let x = (v + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if x > 180.0 {
        x - 360.0
    } else {
        x
    }
}

/// Principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    let x = a.rem_euclid(DPI);
    if x >= DPI {
        0.0
    } else {
        x
    }
}

/// Rotation matrix of angle `alpha` (radians, counter-clockwise) about `axis`.
pub fn axis_rotation(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotate an inertial vector into the Earth-fixed frame given the Earth rotation angle θ.
///
/// This is `Rz(-θ) · r`.
pub fn eci_to_ecef(r: &PositionVector, theta: Radian) -> PositionVector {
    axis_rotation(-theta, Axis::Z) * r
}

/// A position is usable when every component is finite and it is not the zero vector.
pub fn is_valid_position(v: &PositionVector) -> bool {
    v.iter().all(|c| c.is_finite()) && v.norm_squared() > 0.0
}

/// Arithmetic mean of a set of positions, `None` for an empty set or a non-finite result.
pub fn centroid(points: &[PositionVector]) -> Option<PositionVector> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p);
    let c = sum / points.len() as f64;
    c.iter().all(|x| x.is_finite()).then_some(c)
}

/// Visualization radius (Earth radii) for an altitude, clamped to the LEO band [350, 1200] km.
pub fn visual_radius_for_altitude(altitude_km: Kilometer) -> f64 {
    let clamped = altitude_km.clamp(350.0, 1200.0);
    1.02 + (clamped - 350.0) / (1200.0 - 350.0) * 0.25
}

#[cfg(test)]
mod geometry_test {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn vec3() -> impl Strategy<Value = PositionVector> {
        (-1e5..1e5f64, -1e5..1e5f64, -1e5..1e5f64).prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in vec3(), b in vec3()) {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
            prop_assert_eq!(distance(&a, &a), 0.0);
        }

        #[test]
        fn distance_triangle_inequality(a in vec3(), b in vec3(), c in vec3()) {
            let direct = distance(&a, &c);
            let via = distance(&a, &b) + distance(&b, &c);
            prop_assert!(direct <= via + 1e-9 * via.max(1.0));
        }

        #[test]
        fn wrap_stays_in_range(v in -1e6..1e6f64) {
            let w = wrap_angle_degrees(v);
            prop_assert!((-180.0..=180.0).contains(&w));
        }
    }

    #[test]
    fn test_wrap_angle_degrees() {
        assert_relative_eq!(wrap_angle_degrees(359.0 - 1.0), -2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle_degrees(1.0 - 359.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle_degrees(90.0), 90.0);
        assert_relative_eq!(wrap_angle_degrees(-540.0), -180.0);
    }

    #[test]
    fn test_normalize_to_visual_radius() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        let n = normalize_to_visual_radius(&v, 10.0);
        assert_relative_eq!(n, Vector3::new(6.0, 8.0, 0.0), epsilon = 1e-12);

        let z = normalize_to_visual_radius(&Vector3::zeros(), 1.06);
        assert_eq!(z, Vector3::zeros());
    }

    #[test]
    fn test_eci_to_ecef_quarter_turn() {
        let r = Vector3::new(7000.0, 0.0, 0.0);
        let ecef = eci_to_ecef(&r, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(ecef, Vector3::new(0.0, -7000.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_is_valid_position() {
        assert!(is_valid_position(&Vector3::new(1.0, 0.0, 0.0)));
        assert!(!is_valid_position(&Vector3::zeros()));
        assert!(!is_valid_position(&Vector3::new(f64::NAN, 1.0, 1.0)));
    }

    #[test]
    fn test_centroid() {
        let pts = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(3.0, 2.0, -4.0)];
        assert_relative_eq!(centroid(&pts).unwrap(), Vector3::new(2.0, 1.0, -2.0));
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_visual_radius_for_altitude() {
        assert_relative_eq!(visual_radius_for_altitude(100.0), 1.02);
        assert_relative_eq!(visual_radius_for_altitude(5000.0), 1.27);
    }
}
