//! # Rendezvous search
//!
//! Finds the future instant, within a horizon, at which a group of moving targets is
//! collectively closest together, and the capture point at that instant.
//!
//! ## Sampling
//!
//! The horizon is sampled every `step_minutes`, at offsets `i · step` for
//! `i = 0..=steps` with
//!
//! ```text
//! steps = min(floor(horizon_hours · 60 / step_minutes), max_steps)
//! ```
//!
//! A sample counts only when **every** target propagates at that instant. Among the valid
//! samples, the one with the smallest sum of pairwise distances wins (the earliest on ties),
//! and the capture point is the centroid of the target positions at that sample.
//!
//! When no sample is valid the search fails with [`SweeperError::NoValidRendezvous`]; there
//! is no best-effort fallback.
use hifitime::Epoch;
use itertools::Itertools;
use serde::Serialize;

use crate::catalog::TrackedObject;
use crate::constants::{Kilometer, PositionVector, Seconds};
use crate::geometry::{centroid, distance};
use crate::orbit_model::{position_at, propagator::Propagator};
use crate::sweeper_errors::SweeperError;
use crate::time::offset_epoch;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendezvousParams {
    pub horizon_hours: f64,
    pub step_minutes: f64,
    /// Upper bound on the number of steps, whatever the horizon.
    pub max_steps: usize,
}

impl Default for RendezvousParams {
    fn default() -> Self {
        RendezvousParams {
            horizon_hours: 12.0,
            step_minutes: 60.0,
            max_steps: 24,
        }
    }
}

impl RendezvousParams {
    pub fn steps(&self) -> usize {
        let raw = (self.horizon_hours * 60.0 / self.step_minutes).floor();
        if raw.is_finite() && raw > 0.0 {
            (raw as usize).min(self.max_steps)
        } else {
            0
        }
    }

    pub fn step_seconds(&self) -> Seconds {
        self.step_minutes * 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RendezvousSolution {
    #[serde(skip)]
    pub epoch: Epoch,
    /// Seconds from the search start to the rendezvous.
    pub lead_time_s: Seconds,
    pub centroid: PositionVector,
    /// Target positions at the rendezvous, in input order.
    pub positions: Vec<PositionVector>,
    /// Sum of pairwise distances between the targets at the rendezvous.
    pub total_distance_km: Kilometer,
}

fn pairwise_sum(positions: &[PositionVector]) -> Kilometer {
    positions
        .iter()
        .tuple_combinations()
        .map(|(a, b)| distance(a, b))
        .sum()
}

/// Search the horizon starting at `start` for the best rendezvous of `targets`.
///
/// Arguments
/// -----------------
/// * `targets`: the objects to gather, at least two.
/// * `start`: first sampled instant.
/// * `params`: horizon and sampling step.
/// * `propagator`: used for TLE-backed targets.
///
/// Return
/// ----------
/// * The best [`RendezvousSolution`], [`SweeperError::NotEnoughTargets`] for fewer than two
///   targets, or [`SweeperError::NoValidRendezvous`] if no sample had every target available.
pub fn find_rendezvous<P: Propagator + ?Sized>(
    targets: &[&TrackedObject],
    start: Epoch,
    params: &RendezvousParams,
    propagator: &P,
) -> Result<RendezvousSolution, SweeperError> {
    if targets.len() < 2 {
        return Err(SweeperError::NotEnoughTargets(targets.len()));
    }

    let steps = params.steps();
    let mut best: Option<RendezvousSolution> = None;

    for i in 0..=steps {
        let lead_time_s = i as f64 * params.step_seconds();
        let Some(epoch) = offset_epoch(start, lead_time_s) else {
            continue;
        };

        let Ok(positions) = targets
            .iter()
            .map(|t| position_at(&t.record, epoch, propagator))
            .collect::<Result<Vec<_>, _>>()
        else {
            continue;
        };

        let total_distance_km = pairwise_sum(&positions);
        if !total_distance_km.is_finite() {
            continue;
        }
        if best
            .as_ref()
            .is_none_or(|b| total_distance_km < b.total_distance_km)
        {
            let Some(centroid) = centroid(&positions) else {
                continue;
            };
            best = Some(RendezvousSolution {
                epoch,
                lead_time_s,
                centroid,
                positions,
                total_distance_km,
            });
        }
    }

    match best {
        Some(solution) => {
            log::debug!(
                "rendezvous of {} targets at +{:.0} s, spread {:.1} km",
                targets.len(),
                solution.lead_time_s,
                solution.total_distance_km
            );
            Ok(solution)
        }
        None => {
            log::warn!(
                "no valid rendezvous for {} targets over {} samples",
                targets.len(),
                steps + 1
            );
            Err(SweeperError::NoValidRendezvous)
        }
    }
}
