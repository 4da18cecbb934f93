#![allow(dead_code)]

use hifitime::Epoch;
use sweeper::catalog::{ObjectKind, TrackedObject};
use sweeper::constants::{PositionVector, DPI, EARTH_RADIUS_KM, MU_EARTH, SECONDS_PER_DAY};
use sweeper::orbit_model::propagator::Propagator;
use sweeper::orbit_model::synthetic::SyntheticOrbit;
use sweeper::orbit_model::two_line::TwoLineElement;
use sweeper::orbit_model::OrbitRecord;
use sweeper::sweeper_errors::SweeperError;
use sweeper::time::unix_seconds;

pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

pub fn start_epoch() -> Epoch {
    Epoch::from_unix_seconds(1_700_000_000.0)
}

/// Keplerian mean motion of a circular orbit at `altitude_km`, in revolutions per day.
pub fn rev_per_day_at(altitude_km: f64) -> f64 {
    let a = EARTH_RADIUS_KM + altitude_km;
    SECONDS_PER_DAY / (DPI * (a * a * a / MU_EARTH).sqrt())
}

pub fn synthetic(
    id: &str,
    kind: ObjectKind,
    alt: f64,
    inc: f64,
    raan: f64,
    m0: f64,
) -> TrackedObject {
    TrackedObject {
        id: id.into(),
        kind,
        record: OrbitRecord::Synthetic(
            SyntheticOrbit::from_catalog_units(alt, inc, raan, rev_per_day_at(alt), m0).unwrap(),
        ),
        health_pct: 100.0,
        battery_pct: 100.0,
    }
}

pub fn tle_object(name: &str) -> TrackedObject {
    TrackedObject {
        id: name.into(),
        kind: ObjectKind::from_tle_name(name),
        record: OrbitRecord::TwoLineElement(TwoLineElement::parse(name, ISS_L1, ISS_L2).unwrap()),
        health_pct: 100.0,
        battery_pct: 100.0,
    }
}

/// Stands in for SGP4: flies the TLE mean elements on a circular orbit, inertial frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularTlePropagator;

impl Propagator for CircularTlePropagator {
    fn propagate(
        &self,
        record: &TwoLineElement,
        epoch: Epoch,
    ) -> Result<PositionVector, SweeperError> {
        let e = &record.elements;
        let orbit = SyntheticOrbit::from_catalog_units(
            record.altitude_km(),
            e.inclination_deg,
            e.raan_deg,
            e.mean_motion_rev_per_day,
            0.0,
        )?;
        Ok(orbit.inertial_position(unix_seconds(epoch)))
    }
}

/// Propagator whose every call yields a NaN vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanPropagator;

impl Propagator for NanPropagator {
    fn propagate(
        &self,
        _record: &TwoLineElement,
        _epoch: Epoch,
    ) -> Result<PositionVector, SweeperError> {
        Ok(PositionVector::new(f64::NAN, 0.0, 0.0))
    }
}

/// [`CircularTlePropagator`] that only answers during odd Unix hours.
///
/// [`start_epoch`] falls in an even hour, so offsets below the next full hour fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct OddHoursPropagator;

impl OddHoursPropagator {
    pub fn answers_at(epoch: Epoch) -> bool {
        (unix_seconds(epoch) / 3600.0).floor() as i64 % 2 != 0
    }
}

impl Propagator for OddHoursPropagator {
    fn propagate(
        &self,
        record: &TwoLineElement,
        epoch: Epoch,
    ) -> Result<PositionVector, SweeperError> {
        if !Self::answers_at(epoch) {
            return Err(SweeperError::PropagationFailed(format!(
                "no ephemeris at {epoch}"
            )));
        }
        CircularTlePropagator.propagate(record, epoch)
    }
}
