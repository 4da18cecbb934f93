//! Delta-v estimates between circular orbital shells.
//!
//! The cost of moving from shell `a` to shell `b` is a two-burn Hohmann transfer between
//! the two radii plus a single plane change at the mean altitude:
//!
//! ```text
//! Δv = Δv_hohmann(r_a, r_b) + 2·v_circ(ā)·sin(Δθ / 2),   Δθ = |Δi| + 0.2·|ΔΩ|
//! ```
//!
//! RAAN only enters with a small weight since node drift is usually exploited rather
//! than burned for. All results are in **m/s**.
use itertools::Itertools;
use serde::Serialize;

use crate::catalog::TrackedObject;
use crate::constants::{Degree, Kilometer, EARTH_EQUATORIAL_RADIUS_KM, MU_EARTH, RADEG};
use crate::geometry::wrap_angle_degrees;
use crate::route::tour::EXACT_TOUR_LIMIT;

/// Weight of the RAAN difference in the plane-change angle.
const RAAN_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitShell {
    pub id: String,
    pub altitude_km: Kilometer,
    pub inclination_deg: Degree,
    pub raan_deg: Degree,
}

impl OrbitShell {
    pub fn of(object: &TrackedObject) -> Self {
        OrbitShell {
            id: object.id.clone(),
            altitude_km: object.record.altitude_km(),
            inclination_deg: object.record.inclination_deg(),
            raan_deg: object.record.raan_deg(),
        }
    }
}

/// Circular orbital speed at `altitude_km`, in km/s.
pub fn circular_speed(altitude_km: Kilometer) -> f64 {
    (MU_EARTH / (EARTH_EQUATORIAL_RADIUS_KM + altitude_km)).sqrt()
}

pub fn hohmann_delta_v(from_alt_km: Kilometer, to_alt_km: Kilometer) -> f64 {
    let r1 = EARTH_EQUATORIAL_RADIUS_KM + from_alt_km;
    let r2 = EARTH_EQUATORIAL_RADIUS_KM + to_alt_km;
    let v1 = (MU_EARTH / r1).sqrt();
    let v2 = (MU_EARTH / r2).sqrt();
    let a = 0.5 * (r1 + r2);
    let vp = (MU_EARTH * (2.0 / r1 - 1.0 / a)).sqrt();
    let va = (MU_EARTH * (2.0 / r2 - 1.0 / a)).sqrt();
    ((vp - v1).abs() + (v2 - va).abs()) * 1000.0
}

pub fn plane_change_delta_v(altitude_km: Kilometer, delta_deg: Degree) -> f64 {
    let v = circular_speed(altitude_km) * 1000.0;
    2.0 * v * (delta_deg.abs() * RADEG / 2.0).sin()
}

pub fn dv_between(a: &OrbitShell, b: &OrbitShell) -> f64 {
    let d_inc = (a.inclination_deg - b.inclination_deg).abs();
    let d_raan = wrap_angle_degrees(a.raan_deg - b.raan_deg).abs();
    let mean_alt = 0.5 * (a.altitude_km + b.altitude_km);
    hohmann_delta_v(a.altitude_km, b.altitude_km)
        + plane_change_delta_v(mean_alt, d_inc + RAAN_WEIGHT * d_raan)
}

/// Total delta-v of visiting `order` in sequence, rounded to the nearest m/s.
///
/// Ids missing from `shells` are skipped together with the hops that touch them.
pub fn dv_for_route(order: &[String], shells: &[OrbitShell]) -> f64 {
    let lookup = |id: &String| shells.iter().find(|s| &s.id == id);
    order
        .iter()
        .tuple_windows()
        .filter_map(|(a, b)| Some(dv_between(lookup(a)?, lookup(b)?)))
        .sum::<f64>()
        .round()
}

fn route_cost(shells: &[OrbitShell], order: &[usize]) -> f64 {
    order
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| dv_between(&shells[a], &shells[b]))
        .sum()
}

/// Visit order of `shells` with the lowest total delta-v.
///
/// Exhaustive for at most [`EXACT_TOUR_LIMIT`] shells; beyond that, greedy from the first
/// shell.
pub fn cheapest_shell_order(shells: &[OrbitShell]) -> Vec<String> {
    let n = shells.len();
    let order: Vec<usize> = if n <= EXACT_TOUR_LIMIT {
        let mut best: Option<(f64, Vec<usize>)> = None;
        for perm in (0..n).permutations(n) {
            let cost = route_cost(shells, &perm);
            if best.as_ref().is_none_or(|(c, _)| cost < *c) {
                best = Some((cost, perm));
            }
        }
        best.map(|(_, perm)| perm).unwrap_or_default()
    } else {
        let mut remaining: Vec<usize> = (1..n).collect();
        let mut order = vec![0];
        while !remaining.is_empty() {
            let last = order[order.len() - 1];
            let (pos, _) = remaining
                .iter()
                .enumerate()
                .map(|(pos, &i)| (pos, dv_between(&shells[last], &shells[i])))
                .fold((0, f64::INFINITY), |acc, cur| if cur.1 < acc.1 { cur } else { acc });
            order.push(remaining.remove(pos));
        }
        order
    };
    order.into_iter().map(|i| shells[i].id.clone()).collect()
}
