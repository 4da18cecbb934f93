//! # Orbit model
//!
//! Normalizes heterogeneous catalog records into a single position function of time:
//!
//! ```text
//! position_at(record, epoch) → Earth-fixed PositionVector | SweeperError
//! ```
//!
//! - [`OrbitRecord::Synthetic`] is propagated analytically by
//!   [`SyntheticOrbit`](crate::orbit_model::synthetic::SyntheticOrbit).
//! - [`OrbitRecord::TwoLineElement`] is delegated to a
//!   [`Propagator`](crate::orbit_model::propagator::Propagator); the output is validated and
//!   rotated to the Earth-fixed frame when the propagator reports an inertial vector.
//!
//! Both paths end with the same rotation by the Earth rotation angle supplied by the
//! propagator, so synthetic and TLE objects can be compared in one frame.
//!
//! ## Failure policy
//!
//! NaN, infinite and zero vectors are rejected as [`SweeperError::DegeneratePosition`]:
//! a zero vector looks like a real answer and must never reach distances or averages.
//! Callers treat any error as "no data for this sample" and skip it.
//!
//! ## Determinism
//!
//! [`position_at`] holds no state; the same `(record, epoch)` always gives the same vector,
//! whatever the call order.
pub mod propagator;
pub mod synthetic;
pub mod two_line;

use hifitime::Epoch;
use serde::Serialize;

use crate::{
    constants::{Degree, Kilometer, PositionVector, RADEG},
    geometry::{eci_to_ecef, is_valid_position},
    sweeper_errors::SweeperError,
    time::unix_seconds,
};

use propagator::{Frame, Propagator};
use synthetic::SyntheticOrbit;
use two_line::TwoLineElement;

/// Orbit description of a tracked object. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OrbitRecord {
    Synthetic(SyntheticOrbit),
    TwoLineElement(TwoLineElement),
}

impl OrbitRecord {
    pub fn altitude_km(&self) -> Kilometer {
        match self {
            OrbitRecord::Synthetic(s) => s.altitude_km(),
            OrbitRecord::TwoLineElement(t) => t.altitude_km(),
        }
    }

    pub fn inclination_deg(&self) -> Degree {
        match self {
            OrbitRecord::Synthetic(s) => s.inclination / RADEG,
            OrbitRecord::TwoLineElement(t) => t.elements.inclination_deg,
        }
    }

    pub fn raan_deg(&self) -> Degree {
        match self {
            OrbitRecord::Synthetic(s) => s.raan / RADEG,
            OrbitRecord::TwoLineElement(t) => t.elements.raan_deg,
        }
    }
}

/// Earth-fixed position of `record` at `epoch`, in kilometers.
///
/// Arguments
/// -----------------
/// * `record` – the object's orbit description.
/// * `epoch` – simulated instant; any order of queries is allowed.
/// * `propagator` – external TLE propagator, also the source of the Earth rotation angle.
///
/// Return
/// ----------
/// * The Earth-fixed position, or an error when propagation failed or produced a
///   degenerate vector.
pub fn position_at<P: Propagator + ?Sized>(
    record: &OrbitRecord,
    epoch: Epoch,
    propagator: &P,
) -> Result<PositionVector, SweeperError> {
    let theta = propagator.earth_rotation_angle(epoch);

    let position = match record {
        OrbitRecord::Synthetic(orbit) => {
            eci_to_ecef(&orbit.inertial_position(unix_seconds(epoch)), theta)
        }
        OrbitRecord::TwoLineElement(tle) => {
            let raw = propagator.propagate(tle, epoch)?;
            if !is_valid_position(&raw) {
                return Err(SweeperError::DegeneratePosition);
            }
            match propagator.output_frame() {
                Frame::Inertial => eci_to_ecef(&raw, theta),
                Frame::EarthFixed => raw,
            }
        }
    };

    if is_valid_position(&position) {
        Ok(position)
    } else {
        Err(SweeperError::DegeneratePosition)
    }
}
