//! Rough lifecycle stage and remaining-lifetime estimates from altitude and drag.
use serde::Serialize;

use crate::constants::Kilometer;

/// Below this altitude decay is rapid.
const DECAY_ALT_KM: Kilometer = 400.0;
/// Above this altitude orbits are long lived.
const STABLE_ALT_KM: Kilometer = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifecycleStage {
    Healthy,
    Aging,
    Critical,
}

pub fn lifecycle_stage(altitude_km: Kilometer, drag_multiplier: f64) -> LifecycleStage {
    if altitude_km < DECAY_ALT_KM {
        LifecycleStage::Critical
    } else if altitude_km < (DECAY_ALT_KM + STABLE_ALT_KM) / 2.0 {
        if drag_multiplier > 1.2 {
            LifecycleStage::Critical
        } else {
            LifecycleStage::Aging
        }
    } else {
        LifecycleStage::Healthy
    }
}

/// Remaining orbital lifetime in days.
pub fn estimate_lifetime_days(altitude_km: Kilometer, drag_multiplier: f64) -> f64 {
    let drag = drag_multiplier.max(f64::MIN_POSITIVE);
    match altitude_km {
        a if a < 300.0 => (30.0 / drag).max(1.0),
        a if a < 400.0 => (180.0 / drag).max(30.0),
        a if a < 500.0 => (365.0 * 2.0 / drag).max(180.0),
        a if a < 600.0 => (365.0 * 5.0 / drag).max(365.0 * 2.0),
        _ => 365.0 * 10.0,
    }
}
