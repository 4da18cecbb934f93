//! # Orbit clustering
//!
//! k-means over `(altitude, inclination, RAAN)` with a fixed iteration count.
//!
//! The squared distance between an item and a centroid is
//!
//! ```text
//! d² = (Δalt)² + (Δinc)² + wrap(ΔRAAN)²
//! ```
//!
//! where `wrap` folds the RAAN difference into `[0°, 180°]`, so that orbits at 359° and 1°
//! are neighbours. RAAN centroids are averaged on the circle for the same reason.
//!
//! ## Determinism
//!
//! Items are first put in a canonical order (altitude, inclination, RAAN, id). The `k`
//! initial centroids are taken evenly spaced along that order, assignments are made in that
//! order and ties go to the lowest centroid index. The result therefore does not depend on the
//! order in which items are supplied.
use std::cmp::Ordering;

use serde::Serialize;

use crate::constants::{Degree, Kilometer, RADEG};
use crate::geometry::wrap_angle_degrees;
use crate::risk::RiskSubject;

pub const DEFAULT_CLUSTER_COUNT: usize = 4;
pub const DEFAULT_ITERATIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitCentroid {
    pub altitude_km: Kilometer,
    pub inclination_deg: Degree,
    /// In `[0°, 360°)`.
    pub raan_deg: Degree,
}

impl OrbitCentroid {
    fn of(subject: &RiskSubject) -> Self {
        OrbitCentroid {
            altitude_km: subject.altitude_km,
            inclination_deg: subject.inclination_deg,
            raan_deg: subject.raan_deg.rem_euclid(360.0),
        }
    }

    fn squared_distance(&self, subject: &RiskSubject) -> f64 {
        let d_alt = subject.altitude_km - self.altitude_km;
        let d_inc = subject.inclination_deg - self.inclination_deg;
        let d_raan = wrap_angle_degrees(subject.raan_deg - self.raan_deg).abs();
        d_alt * d_alt + d_inc * d_inc + d_raan * d_raan
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clustering {
    pub centroids: Vec<OrbitCentroid>,
    /// Cluster index of each input item, in input order.
    pub assignments: Vec<usize>,
}

impl Clustering {
    /// Input indices grouped by cluster.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.centroids.len()];
        for (item, &cluster) in self.assignments.iter().enumerate() {
            groups[cluster].push(item);
        }
        groups
    }
}

fn canonical_cmp(a: &RiskSubject, b: &RiskSubject) -> Ordering {
    a.altitude_km
        .total_cmp(&b.altitude_km)
        .then(a.inclination_deg.total_cmp(&b.inclination_deg))
        .then(
            a.raan_deg
                .rem_euclid(360.0)
                .total_cmp(&b.raan_deg.rem_euclid(360.0)),
        )
        .then_with(|| a.id.cmp(&b.id))
}

fn nearest(centroids: &[OrbitCentroid], subject: &RiskSubject) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = centroid.squared_distance(subject);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

/// Mean of `members`; RAAN is a circular mean. Returns `previous` fields where undefined.
fn recenter(members: &[&RiskSubject], previous: &OrbitCentroid) -> OrbitCentroid {
    if members.is_empty() {
        return *previous;
    }
    let n = members.len() as f64;
    let altitude_km = members.iter().map(|s| s.altitude_km).sum::<f64>() / n;
    let inclination_deg = members.iter().map(|s| s.inclination_deg).sum::<f64>() / n;

    let (sin_sum, cos_sum) = members.iter().fold((0.0, 0.0), |(s, c), m| {
        let (sin, cos) = (m.raan_deg * RADEG).sin_cos();
        (s + sin, c + cos)
    });
    let raan_deg = if sin_sum.hypot(cos_sum) < 1e-9 * n {
        previous.raan_deg
    } else {
        (sin_sum.atan2(cos_sum) / RADEG).rem_euclid(360.0)
    };

    OrbitCentroid {
        altitude_km,
        inclination_deg,
        raan_deg,
    }
}

/// Cluster `subjects` into at most `k` groups.
///
/// Arguments
/// -----------------
/// * `subjects`: the items to cluster.
/// * `k`: requested number of clusters; reduced to the number of items when larger.
/// * `iterations`: number of assign/update rounds (at least one assignment is always made).
///
/// Return
/// ----------
/// * A [`Clustering`] whose assignments follow the input order. Empty input gives an empty
///   clustering.
pub fn kmeans_orbits(subjects: &[RiskSubject], k: usize, iterations: usize) -> Clustering {
    let n = subjects.len();
    let k = k.min(n);
    if k == 0 {
        return Clustering {
            centroids: Vec::new(),
            assignments: Vec::new(),
        };
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| canonical_cmp(&subjects[a], &subjects[b]));

    let mut centroids: Vec<OrbitCentroid> = (0..k)
        .map(|c| OrbitCentroid::of(&subjects[order[c * n / k]]))
        .collect();
    let mut assignments = vec![0; n];

    for round in 0..iterations.max(1) {
        for &item in &order {
            assignments[item] = nearest(&centroids, &subjects[item]);
        }
        if round + 1 == iterations.max(1) {
            break;
        }
        centroids = (0..k)
            .map(|c| {
                let members: Vec<&RiskSubject> = order
                    .iter()
                    .filter(|&&item| assignments[item] == c)
                    .map(|&item| &subjects[item])
                    .collect();
                recenter(&members, &centroids[c])
            })
            .collect();
    }

    Clustering {
        centroids,
        assignments,
    }
}
