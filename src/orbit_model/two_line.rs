//! Two-line element records.
//!
//! The record itself is opaque to this crate: propagation is delegated to a
//! [`Propagator`](crate::orbit_model::propagator::Propagator). The few mean elements read
//! from line 2 only feed the feature-based risk model (altitude, inclination, RAAN).
use serde::Serialize;

use crate::{
    constants::{Degree, Kilometer, EARTH_RADIUS_KM, MU_EARTH, REV_PER_DAY_TO_RAD_PER_SEC},
    sweeper_errors::SweeperError,
};

/// Mean elements read from the fixed columns of TLE line 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanElements {
    pub inclination_deg: Degree,
    pub raan_deg: Degree,
    pub eccentricity: f64,
    pub mean_motion_rev_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoLineElement {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub elements: MeanElements,
}

fn field(line: &str, cols: std::ops::Range<usize>, what: &str) -> Result<f64, SweeperError> {
    line.get(cols)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| SweeperError::InvalidOrbitRecord(format!("invalid TLE {what}")))
}

impl TwoLineElement {
    /// Parse a TLE triple.
    ///
    /// Line 2 layout (0-based byte ranges)
    /// -----------------
    /// * `8..16` – inclination (deg)
    /// * `17..25` – RAAN (deg)
    /// * `26..33` – eccentricity, implied leading decimal point
    /// * `52..63` – mean motion (rev/day)
    pub fn parse(name: &str, line1: &str, line2: &str) -> Result<Self, SweeperError> {
        if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
            return Err(SweeperError::InvalidOrbitRecord(
                "TLE lines must start with '1 ' and '2 '".into(),
            ));
        }

        let inclination_deg = field(line2, 8..16, "inclination")?;
        let raan_deg = field(line2, 17..25, "RAAN")?;
        let eccentricity = line2
            .get(26..33)
            .and_then(|s| format!("0.{}", s.trim()).parse::<f64>().ok())
            .ok_or_else(|| SweeperError::InvalidOrbitRecord("invalid TLE eccentricity".into()))?;
        let mean_motion_rev_per_day = field(line2, 52..63, "mean motion")?;

        if mean_motion_rev_per_day <= 0.0 {
            return Err(SweeperError::InvalidOrbitRecord(
                "TLE mean motion must be positive".into(),
            ));
        }

        Ok(TwoLineElement {
            name: name.trim().to_string(),
            line1: line1.to_string(),
            line2: line2.to_string(),
            elements: MeanElements {
                inclination_deg,
                raan_deg,
                eccentricity,
                mean_motion_rev_per_day,
            },
        })
    }

    /// Semi-major axis from the mean motion (Kepler's third law).
    pub fn semi_major_axis_km(&self) -> Kilometer {
        let n = self.elements.mean_motion_rev_per_day * REV_PER_DAY_TO_RAD_PER_SEC;
        (MU_EARTH / (n * n)).cbrt()
    }

    pub fn altitude_km(&self) -> Kilometer {
        self.semi_major_axis_km() - EARTH_RADIUS_KM
    }
}
