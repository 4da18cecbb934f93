//! Closed-form logistic collision-risk score.
//!
//! ```text
//! z = b + w₁·(alt − 700)/200 + w₂·cos(inc) + w₃·density + w₄·ln(max(0.5, drag)) + w₅·debris
//! p = 1 / (1 + e^(−z))
//! ```
//!
//! The weights are fixed constants, not learned at runtime. Each weighted term and the
//! logit are clamped to `±LOGIT_LIMIT` so that `p` stays strictly inside `(0, 1)` in
//! double precision even for absurd inputs.
use serde::Serialize;

use crate::constants::{Degree, Kilometer, RADEG};

pub const BIAS: f64 = -1.25;
pub const W_ALTITUDE: f64 = 0.65;
pub const W_INCLINATION: f64 = -0.35;
pub const W_DENSITY: f64 = 1.8;
pub const W_DRAG: f64 = 0.9;
pub const W_DEBRIS: f64 = 0.7;

/// Altitude of the reference shell and the scale of the altitude feature, in km.
pub const REFERENCE_SHELL_KM: Kilometer = 700.0;
pub const SHELL_SCALE_KM: Kilometer = 200.0;

const LOGIT_LIMIT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFeatures {
    pub altitude_km: Kilometer,
    pub inclination_deg: Degree,
    /// Normalized local traffic density in `[0, 1]`.
    pub density: f64,
    pub drag_multiplier: f64,
    pub debris: bool,
}

/// Weighted contribution of each feature to the logit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub altitude: f64,
    pub inclination: f64,
    pub density: f64,
    pub drag: f64,
    pub debris: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScore {
    pub probability: f64,
    pub breakdown: RiskBreakdown,
}

fn bounded(term: f64) -> f64 {
    term.clamp(-LOGIT_LIMIT, LOGIT_LIMIT)
}

pub fn logistic_risk_score(features: &RiskFeatures) -> RiskScore {
    let x_alt = (features.altitude_km - REFERENCE_SHELL_KM) / SHELL_SCALE_KM;
    let x_inc = (features.inclination_deg * RADEG).cos();
    let x_dens = features.density;
    let x_drag = features.drag_multiplier.max(0.5).ln();
    let x_debris = if features.debris { 1.0 } else { 0.0 };

    let breakdown = RiskBreakdown {
        altitude: bounded(W_ALTITUDE * x_alt),
        inclination: bounded(W_INCLINATION * x_inc),
        density: bounded(W_DENSITY * x_dens),
        drag: bounded(W_DRAG * x_drag),
        debris: W_DEBRIS * x_debris,
    };

    let z = bounded(
        BIAS + breakdown.altitude
            + breakdown.inclination
            + breakdown.density
            + breakdown.drag
            + breakdown.debris,
    );

    RiskScore {
        probability: 1.0 / (1.0 + (-z).exp()),
        breakdown,
    }
}
