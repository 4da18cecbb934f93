//! Banded heuristic risk score, used for quick queue summaries.
//!
//! Unlike the logistic model this one is a weighted blend of lookup factors:
//! altitude band, crowding around popular inclinations, object kind, and a geomagnetic
//! (Kp) bump scaled by drag.
use serde::Serialize;

use crate::constants::{Degree, Kilometer};

/// Inclinations with heavy traffic: sun-synchronous, ISS-like and Molniya-like.
const CROWDED_INCLINATIONS: [Degree; 3] = [98.0, 52.0, 64.0];
const CROWDING_WIDTH_DEG: Degree = 3.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicOptions {
    /// Planetary K index, clamped to `[0, 9]`.
    pub kp: f64,
    pub drag_scale: f64,
}

impl Default for HeuristicOptions {
    fn default() -> Self {
        HeuristicOptions {
            kp: 3.0,
            drag_scale: 1.0,
        }
    }
}

fn altitude_factor(altitude_km: Kilometer) -> f64 {
    match altitude_km {
        a if a < 500.0 => 0.25,
        a if a < 650.0 => 0.55,
        a if a < 900.0 => 0.95,
        _ => 0.5,
    }
}

fn inclination_factor(inclination_deg: Degree) -> f64 {
    let inc = inclination_deg.rem_euclid(180.0);
    CROWDED_INCLINATIONS
        .iter()
        .map(|c| (-((inc - c) / CROWDING_WIDTH_DEG).powi(2)).exp())
        .fold(0.0, f64::max)
}

/// Heuristic score in `[0, 1]`.
pub fn heuristic_risk_score(
    altitude_km: Kilometer,
    inclination_deg: Degree,
    debris: bool,
    options: &HeuristicOptions,
) -> f64 {
    let f_kind = if debris { 1.0 } else { 0.6 };
    let kp_norm = options.kp.clamp(0.0, 9.0) / 9.0;
    let f_kp = 0.6 + 0.8 * kp_norm * options.drag_scale;

    let blend = 0.45 * altitude_factor(altitude_km)
        + 0.35 * inclination_factor(inclination_deg)
        + 0.20 * f_kind;
    (blend.clamp(0.0, 1.0) * f_kp).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub total: f64,
    pub mean: f64,
    /// Mean as a percentage string, e.g. `"42.5%"`.
    pub pct: String,
}

pub fn summarize_risk(scores: &[f64]) -> RiskSummary {
    if scores.is_empty() {
        return RiskSummary {
            total: 0.0,
            mean: 0.0,
            pct: "0.0%".into(),
        };
    }
    let total: f64 = scores.iter().sum();
    let mean = total / scores.len() as f64;
    RiskSummary {
        total,
        mean,
        pct: format!("{:.1}%", mean * 100.0),
    }
}
