//! # Monte Carlo collision projection
//!
//! Simulates a year of monthly steps under a removal [`Policy`]:
//!
//! 1. rank the remaining objects by logistic risk, highest first,
//! 2. remove the top `floor(cadence × compliance)` of them (successful deorbits),
//! 3. draw one Bernoulli trial per remaining object with probability
//!    `risk × collision_scale` and count the hits as collisions for the month.
//!
//! The generator is a [`StdRng`] seeded from [`ProjectionConfig::seed`], so the same
//! subjects and policy always give the same series.
use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::risk::{Policy, RiskSubject};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub months: usize,
    /// Calibration from risk score to monthly collision probability.
    pub collision_scale: f64,
    pub seed: u64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            months: 12,
            collision_scale: 0.015,
            seed: 12345,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthOutcome {
    /// 1-based month number.
    pub month: usize,
    pub collisions: u32,
    /// Objects actually removed this month; lower than the policy's quota once the
    /// population runs out.
    pub removed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearProjection {
    pub collisions_per_year: u32,
    pub series: Vec<MonthOutcome>,
}

/// Project collisions month by month under `policy`.
///
/// Arguments
/// -----------------
/// * `subjects`: the starting population.
/// * `policy`: removal policy; its drag multiplier feeds the risk score.
/// * `config`: number of months, calibration constant and seed.
///
/// Return
/// ----------
/// * The yearly total and one [`MonthOutcome`] per month.
pub fn project_year(
    subjects: &[RiskSubject],
    policy: &Policy,
    config: &ProjectionConfig,
) -> YearProjection {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let risks: Vec<f64> = subjects
        .iter()
        .map(|s| s.score(policy.drag_multiplier).probability)
        .collect();
    let quota = policy.removals_per_month();

    let mut pool: Vec<usize> = (0..subjects.len()).collect();
    let mut series = Vec::with_capacity(config.months);
    let mut total = 0;

    for month in 1..=config.months {
        let mut ranked = pool.clone();
        ranked.sort_by(|&a, &b| risks[b].total_cmp(&risks[a]));
        let removed: HashSet<usize> = ranked.into_iter().take(quota).collect();
        pool.retain(|i| !removed.contains(i));

        let mut collisions = 0;
        for &i in &pool {
            let p = (risks[i] * config.collision_scale).clamp(0.0, 1.0);
            if rng.random::<f64>() < p {
                collisions += 1;
            }
        }

        total += collisions;
        series.push(MonthOutcome {
            month,
            collisions,
            removed_count: removed.len(),
        });
    }

    log::debug!(
        "projected {total} collisions over {} months, {} objects left",
        config.months,
        pool.len()
    );

    YearProjection {
        collisions_per_year: total,
        series,
    }
}
