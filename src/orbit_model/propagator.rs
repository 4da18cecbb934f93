//! Propagation primitive boundary.
//!
//! SGP4-class propagation of two-line element records is an external capability. This
//! crate only sees it through the [`Propagator`] trait: given a record and an epoch it
//! returns a position vector or a failure.
use hifitime::Epoch;

use crate::{
    constants::{PositionVector, Radian},
    orbit_model::two_line::TwoLineElement,
    sweeper_errors::SweeperError,
    time,
};

/// Reference frame of the vectors returned by [`Propagator::propagate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Earth-centered inertial; rotated to Earth-fixed by the orbit model.
    Inertial,
    /// Earth-centered Earth-fixed; used as-is.
    EarthFixed,
}

/// External two-line-element propagator.
///
/// Implementations must be pure in `(record, epoch)`: the scanner and the planner query
/// arbitrary, non-monotonic epochs.
pub trait Propagator {
    /// Position of `record` at `epoch`, in kilometers.
    fn propagate(&self, record: &TwoLineElement, epoch: Epoch)
        -> Result<PositionVector, SweeperError>;

    /// Frame of the returned vectors.
    fn output_frame(&self) -> Frame {
        Frame::Inertial
    }

    /// Earth rotation angle used for inertial → Earth-fixed conversion (GMST by default).
    fn earth_rotation_angle(&self, epoch: Epoch) -> Radian {
        time::earth_rotation_angle(epoch)
    }
}

/// Propagator for catalogs without TLE support: every TLE query fails.
///
/// Synthetic records still propagate, since they never reach [`Propagator::propagate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePropagator;

impl Propagator for UnavailablePropagator {
    fn propagate(
        &self,
        _record: &TwoLineElement,
        _epoch: Epoch,
    ) -> Result<PositionVector, SweeperError> {
        Err(SweeperError::PropagatorUnavailable)
    }
}
