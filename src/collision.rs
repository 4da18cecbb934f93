//! # Collision scanner
//!
//! Samples the future positions of every object pair at a fixed set of lookahead offsets
//! and reports the pairs that come closer than a proximity threshold.
//!
//! ## Algorithm
//!
//! 1. Propagate every object once per offset (`N × K` queries). A failed query, or a
//!    non-finite offset, is a hole in the table, not an error.
//! 2. For every unordered pair of objects with distinct ids, and every offset where both
//!    positions exist, compare the distance with the threshold.
//! 3. Keep one warning per pair: the one with the **smallest lead time**. Its severity is
//!    derived from the distance at that lead time.
//! 4. Sort warnings by lead time, soonest first.
//!
//! The pair loop is `O(N² × K)`; the catalog caps keep `N` tractable and the scan runs on
//! its own cadence (see [`SimulationClock`](crate::simulation::SimulationClock)).
use hifitime::Epoch;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    catalog::{ObjectKind, TrackedObject},
    constants::{Kilometer, PositionVector, Seconds},
    geometry::distance,
    orbit_model::{position_at, propagator::Propagator},
    time::offset_epoch,
};

/// Default lookahead offsets: 1, 5, 10, 20, 30 and 60 minutes.
pub const DEFAULT_LOOKAHEAD_OFFSETS: [Seconds; 6] = [60.0, 300.0, 600.0, 1200.0, 1800.0, 3600.0];

/// Default proximity threshold in kilometers.
pub const PROXIMITY_THRESHOLD_KM: Kilometer = 5.0;

const CRITICAL_BELOW_KM: Kilometer = 2.0;
const HIGH_BELOW_KM: Kilometer = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    /// `< 2 km` → Critical, `< 3.5 km` → High, otherwise Medium.
    pub fn from_distance(distance_km: Kilometer) -> Self {
        if distance_km < CRITICAL_BELOW_KM {
            Severity::Critical
        } else if distance_km < HIGH_BELOW_KM {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

/// Predicted close approach between two objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionWarning {
    pub object_id_a: String,
    pub object_id_b: String,
    /// Seconds from the scan instant to the predicted approach.
    pub lead_time_s: Seconds,
    pub distance_km: Kilometer,
    pub severity: Severity,
    pub kind_a: ObjectKind,
    pub kind_b: ObjectKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanParams {
    pub lookahead_offsets: Vec<Seconds>,
    pub proximity_threshold_km: Kilometer,
}

impl Default for ScanParams {
    fn default() -> Self {
        ScanParams {
            lookahead_offsets: DEFAULT_LOOKAHEAD_OFFSETS.to_vec(),
            proximity_threshold_km: PROXIMITY_THRESHOLD_KM,
        }
    }
}

/// Scan `objects` for close approaches after `now`.
///
/// Arguments
/// -----------------
/// * `objects` – the scanned population (already capped).
/// * `now` – the current simulated instant.
/// * `params` – lookahead offsets and proximity threshold.
/// * `propagator` – TLE propagation primitive.
///
/// Return
/// ----------
/// * All warnings, sorted by ascending lead time. Display truncation is left to the caller.
pub fn scan<P: Propagator + ?Sized>(
    objects: &[TrackedObject],
    now: Epoch,
    params: &ScanParams,
    propagator: &P,
) -> Vec<CollisionWarning> {
    let offsets = &params.lookahead_offsets;
    let epochs: Vec<Option<Epoch>> = offsets.iter().map(|dt| offset_epoch(now, *dt)).collect();

    let table: Vec<Vec<Option<PositionVector>>> = objects
        .iter()
        .map(|obj| {
            epochs
                .iter()
                .map(|epoch| epoch.and_then(|e| position_at(&obj.record, e, propagator).ok()))
                .collect()
        })
        .collect();

    let mut warnings = Vec::new();

    for (i, j) in (0..objects.len()).tuple_combinations() {
        let (a, b) = (&objects[i], &objects[j]);
        if a.id == b.id {
            continue;
        }

        let mut closest: Option<(Seconds, Kilometer)> = None;
        for (k, dt) in offsets.iter().enumerate() {
            let (Some(pa), Some(pb)) = (&table[i][k], &table[j][k]) else {
                continue;
            };
            let d = distance(pa, pb);
            if d < params.proximity_threshold_km && closest.is_none_or(|(lead, _)| *dt < lead) {
                closest = Some((*dt, d));
            }
        }

        if let Some((lead_time_s, distance_km)) = closest {
            warnings.push(CollisionWarning {
                object_id_a: a.id.clone(),
                object_id_b: b.id.clone(),
                lead_time_s,
                distance_km,
                severity: Severity::from_distance(distance_km),
                kind_a: a.kind,
                kind_b: b.kind,
            });
        }
    }

    warnings.sort_by(|a, b| a.lead_time_s.total_cmp(&b.lead_time_s));

    log::debug!(
        "collision scan: {} objects, {} offsets, {} warnings",
        objects.len(),
        offsets.len(),
        warnings.len()
    );
    warnings
}
