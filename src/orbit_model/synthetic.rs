//! Analytic circular-orbit propagator for synthetic catalog entries.
//!
//! The mean anomaly advances at a constant rate, `M(t) = M0 + n·t` with `t` in Unix
//! seconds, and the position is built in the orbital plane then rotated by the
//! inclination (about x) and the RAAN (about z). There is no eccentricity term.
use serde::Serialize;

use crate::{
    constants::{
        Degree, Kilometer, PositionVector, Radian, Seconds, EARTH_RADIUS_KM, RADEG,
        REV_PER_DAY_TO_RAD_PER_SEC,
    },
    geometry::{axis_rotation, principal_angle, Axis},
    sweeper_errors::SweeperError,
};

/// Circular orbit described by four elements and a phase.
///
/// Units
/// -----------------
/// * `semi_major_axis_km`: kilometers from the Earth's center, at least [`EARTH_RADIUS_KM`]
/// * `inclination`, `raan`, `mean_anomaly_at_epoch`: radians in `[0, 2π)`
/// * `mean_motion`: radians per second
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticOrbit {
    pub semi_major_axis_km: Kilometer,
    pub inclination: Radian,
    pub raan: Radian,
    pub mean_motion: f64,
    pub mean_anomaly_at_epoch: Radian,
}

impl SyntheticOrbit {
    /// Build a validated synthetic orbit. Angles are normalized to `[0, 2π)`.
    ///
    /// Return
    /// ----------
    /// * [`SweeperError::InvalidOrbitRecord`] if any element is non-finite or the
    ///   semi-major axis lies inside the Earth.
    pub fn new(
        semi_major_axis_km: Kilometer,
        inclination: Radian,
        raan: Radian,
        mean_motion: f64,
        mean_anomaly_at_epoch: Radian,
    ) -> Result<Self, SweeperError> {
        let all_finite = [
            semi_major_axis_km,
            inclination,
            raan,
            mean_motion,
            mean_anomaly_at_epoch,
        ]
        .iter()
        .all(|x| x.is_finite());
        if !all_finite {
            return Err(SweeperError::InvalidOrbitRecord(
                "non-finite orbital element".into(),
            ));
        }
        if semi_major_axis_km < EARTH_RADIUS_KM {
            return Err(SweeperError::InvalidOrbitRecord(format!(
                "semi-major axis {semi_major_axis_km} km is below the Earth radius"
            )));
        }

        Ok(SyntheticOrbit {
            semi_major_axis_km,
            inclination: principal_angle(inclination),
            raan: principal_angle(raan),
            mean_motion,
            mean_anomaly_at_epoch: principal_angle(mean_anomaly_at_epoch),
        })
    }

    /// Build from catalog units: altitude (km), degrees and revolutions per day.
    pub fn from_catalog_units(
        altitude_km: Kilometer,
        inclination_deg: Degree,
        raan_deg: Degree,
        mean_motion_rev_per_day: f64,
        mean_anomaly_at_epoch: Radian,
    ) -> Result<Self, SweeperError> {
        Self::new(
            EARTH_RADIUS_KM + altitude_km,
            inclination_deg * RADEG,
            raan_deg * RADEG,
            mean_motion_rev_per_day * REV_PER_DAY_TO_RAD_PER_SEC,
            mean_anomaly_at_epoch,
        )
    }

    pub fn altitude_km(&self) -> Kilometer {
        self.semi_major_axis_km - EARTH_RADIUS_KM
    }

    /// Mean anomaly at `t` seconds, in `[0, 2π)`.
    ///
    /// The drift `n·t` is wrapped before adding the epoch anomaly so that two
    /// orbits sharing a mean motion keep their phase offset exact at Unix-scale `t`.
    pub fn mean_anomaly(&self, t: Seconds) -> Radian {
        principal_angle(self.mean_anomaly_at_epoch + principal_angle(self.mean_motion * t))
    }

    /// Inertial position at `t` Unix seconds.
    pub fn inertial_position(&self, t: Seconds) -> PositionVector {
        let m = self.mean_anomaly(t);
        let in_plane = PositionVector::new(
            self.semi_major_axis_km * m.cos(),
            self.semi_major_axis_km * m.sin(),
            0.0,
        );
        axis_rotation(self.raan, Axis::Z) * (axis_rotation(self.inclination, Axis::X) * in_plane)
    }
}

#[cfg(test)]
mod synthetic_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rejects_orbit_inside_earth() {
        let err = SyntheticOrbit::new(6000.0, 0.0, 0.0, 1e-3, 0.0).unwrap_err();
        assert!(matches!(err, SweeperError::InvalidOrbitRecord(_)));

        let err = SyntheticOrbit::new(7000.0, f64::NAN, 0.0, 1e-3, 0.0).unwrap_err();
        assert!(matches!(err, SweeperError::InvalidOrbitRecord(_)));
    }

    #[test]
    fn test_angles_are_normalized() {
        let orbit = SyntheticOrbit::new(7000.0, -FRAC_PI_2, 7.0, 1e-3, -1.0).unwrap();
        assert!((0.0..crate::constants::DPI).contains(&orbit.inclination));
        assert!((0.0..crate::constants::DPI).contains(&orbit.raan));
        assert!((0.0..crate::constants::DPI).contains(&orbit.mean_anomaly_at_epoch));
    }

    #[test]
    fn test_inertial_position_keeps_radius() {
        let orbit = SyntheticOrbit::from_catalog_units(550.0, 53.0, 120.0, 15.0, 0.3).unwrap();
        for t in [0.0, 100.0, 12_345.0, 1.7e9] {
            assert_relative_eq!(
                orbit.inertial_position(t).norm(),
                orbit.semi_major_axis_km,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_polar_orbit_reaches_pole() {
        // i = 90°, RAAN = 0, M = 90° → straight up the z-axis
        let orbit = SyntheticOrbit::new(7000.0, FRAC_PI_2, 0.0, 0.0, FRAC_PI_2).unwrap();
        let r = orbit.inertial_position(0.0);
        assert_relative_eq!(r, PositionVector::new(0.0, 0.0, 7000.0), epsilon = 1e-9);
    }
}
