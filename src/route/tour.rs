//! Collection tours over a snapshot of target positions.
//!
//! A tour starts at the collector and visits every target exactly once, without returning.
//! Its length is the sum of the straight-line hops.
//!
//! - [`nearest_neighbour_tour`]: greedy, `O(N²)`.
//! - [`optimal_tour`]: exhaustive over all permutations for at most [`EXACT_TOUR_LIMIT`]
//!   targets, nearest neighbour beyond that.
//! - [`compare_tours`]: both, with the accuracy ratio `optimal / nearest`.
use itertools::Itertools;
use serde::Serialize;

use crate::constants::{Kilometer, PositionVector};
use crate::geometry::distance;

/// Largest target count for which every permutation is enumerated.
pub const EXACT_TOUR_LIMIT: usize = 6;

/// Two tours whose lengths differ by less than this are considered equal, in km.
pub const TOUR_TOLERANCE_KM: Kilometer = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTarget {
    pub id: String,
    pub position: PositionVector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub order: Vec<String>,
    pub total_distance_km: Kilometer,
}

impl RoutePlan {
    fn from_order(start: &PositionVector, targets: &[RouteTarget], order: &[usize]) -> Self {
        RoutePlan {
            order: order.iter().map(|&i| targets[i].id.clone()).collect(),
            total_distance_km: path_distance(start, targets, order),
        }
    }
}

/// Length of the path `start → targets[order[0]] → targets[order[1]] → …`.
pub fn path_distance(
    start: &PositionVector,
    targets: &[RouteTarget],
    order: &[usize],
) -> Kilometer {
    let mut current = start;
    let mut total = 0.0;
    for &i in order {
        total += distance(current, &targets[i].position);
        current = &targets[i].position;
    }
    total
}

fn nearest_neighbour_order(start: &PositionVector, targets: &[RouteTarget]) -> Vec<usize> {
    let mut visited = vec![false; targets.len()];
    let mut order = Vec::with_capacity(targets.len());
    let mut current = start;

    while order.len() < targets.len() {
        let next = (0..targets.len())
            .filter(|&i| !visited[i])
            .min_by(|&a, &b| {
                distance(current, &targets[a].position)
                    .total_cmp(&distance(current, &targets[b].position))
            });
        let Some(next) = next else { break };
        visited[next] = true;
        order.push(next);
        current = &targets[next].position;
    }
    order
}

pub fn nearest_neighbour_tour(start: &PositionVector, targets: &[RouteTarget]) -> RoutePlan {
    RoutePlan::from_order(start, targets, &nearest_neighbour_order(start, targets))
}

/// Shortest tour when `targets.len() <= EXACT_TOUR_LIMIT`, nearest neighbour otherwise.
pub fn optimal_tour(start: &PositionVector, targets: &[RouteTarget]) -> RoutePlan {
    if targets.len() > EXACT_TOUR_LIMIT {
        return nearest_neighbour_tour(start, targets);
    }

    let mut best: Option<(Kilometer, Vec<usize>)> = None;
    for perm in (0..targets.len()).permutations(targets.len()) {
        let d = path_distance(start, targets, &perm);
        if best.as_ref().is_none_or(|(best_d, _)| d < *best_d) {
            best = Some((d, perm));
        }
    }

    match best {
        Some((total_distance_km, order)) => RoutePlan {
            order: order.iter().map(|&i| targets[i].id.clone()).collect(),
            total_distance_km,
        },
        None => RoutePlan {
            order: Vec::new(),
            total_distance_km: 0.0,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourComparison {
    pub nearest_neighbour: RoutePlan,
    /// `None` when the target count exceeds [`EXACT_TOUR_LIMIT`].
    pub optimal: Option<RoutePlan>,
    /// `optimal / nearest`, in `(0, 1]`.
    pub accuracy: Option<f64>,
    pub nearest_is_optimal: Option<bool>,
}

pub fn compare_tours(start: &PositionVector, targets: &[RouteTarget]) -> TourComparison {
    let nearest_neighbour = nearest_neighbour_tour(start, targets);
    if targets.len() > EXACT_TOUR_LIMIT {
        return TourComparison {
            nearest_neighbour,
            optimal: None,
            accuracy: None,
            nearest_is_optimal: None,
        };
    }

    let optimal = optimal_tour(start, targets);
    let accuracy = if nearest_neighbour.total_distance_km > 0.0 {
        optimal.total_distance_km / nearest_neighbour.total_distance_km
    } else {
        1.0
    };
    let nearest_is_optimal =
        (nearest_neighbour.total_distance_km - optimal.total_distance_km).abs() < TOUR_TOLERANCE_KM;

    TourComparison {
        nearest_neighbour,
        optimal: Some(optimal),
        accuracy: Some(accuracy),
        nearest_is_optimal: Some(nearest_is_optimal),
    }
}
