//! Collector transfer path toward a capture point.
//!
//! The path interpolates between the collector position and the target with smoothstep
//! easing `p²(3 − 2p)` and projects every point back onto the collector shell, so the path
//! neither dips inside nor balloons outside that radius. The number of steps grows with
//! the time available, one per minute, bounded to `[MIN_TRANSFER_STEPS, MAX_TRANSFER_STEPS]`.
use serde::Serialize;

use crate::constants::{Kilometer, PositionVector, Seconds, EARTH_RADIUS_KM};
use crate::geometry::{is_valid_position, normalize_to_visual_radius};
use crate::sweeper_errors::SweeperError;

pub const MIN_TRANSFER_STEPS: usize = 10;
pub const MAX_TRANSFER_STEPS: usize = 50;

/// Default collector shell, 1.12 Earth radii.
pub const DEFAULT_COLLECTOR_RADIUS_KM: Kilometer = 1.12 * EARTH_RADIUS_KM;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPath {
    pub points: Vec<PositionVector>,
    /// Time between consecutive points.
    pub step_seconds: Seconds,
    pub duration_s: Seconds,
}

pub fn smoothstep(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

pub fn transfer_steps(time_available_s: Seconds) -> usize {
    let minutes = (time_available_s.max(0.0) / 60.0).floor();
    if minutes.is_finite() {
        (minutes as usize).clamp(MIN_TRANSFER_STEPS, MAX_TRANSFER_STEPS)
    } else {
        MAX_TRANSFER_STEPS
    }
}

/// Eased path from `from` to `to` on the sphere of radius `shell_radius_km`.
///
/// Arguments
/// -----------------
/// * `from`: current collector position.
/// * `to`: capture point, typically a rendezvous centroid.
/// * `time_available_s`: time until the rendezvous; negative values count as zero.
/// * `shell_radius_km`: radius every path point is projected to.
///
/// Return
/// ----------
/// * The path, or [`SweeperError::DegenerateTransfer`] when fewer than two points survive
///   (for instance when the straight segment passes through the Earth's center).
pub fn plan_transfer(
    from: &PositionVector,
    to: &PositionVector,
    time_available_s: Seconds,
    shell_radius_km: Kilometer,
) -> Result<TransferPath, SweeperError> {
    if !(shell_radius_km.is_finite() && shell_radius_km > 0.0) {
        return Err(SweeperError::InvalidParameter(format!(
            "collector shell radius must be positive, got {shell_radius_km}"
        )));
    }
    if !(from.iter().all(|c| c.is_finite()) && to.iter().all(|c| c.is_finite())) {
        return Err(SweeperError::DegenerateTransfer);
    }

    let duration_s = time_available_s.max(0.0);
    let steps = transfer_steps(duration_s);

    let points: Vec<PositionVector> = (0..=steps)
        .map(|i| from + (to - from) * smoothstep(i as f64 / steps as f64))
        .map(|p| normalize_to_visual_radius(&p, shell_radius_km))
        .filter(is_valid_position)
        .collect();

    if points.len() < 2 {
        return Err(SweeperError::DegenerateTransfer);
    }

    Ok(TransferPath {
        points,
        step_seconds: duration_s / steps as f64,
        duration_s,
    })
}
