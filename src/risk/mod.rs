//! # Risk model
//!
//! Three independent estimators sharing one feature vocabulary (altitude, inclination,
//! local density, drag multiplier, debris flag):
//!
//! - [`logistic`]: closed-form collision-risk probability with a per-term breakdown,
//! - [`clustering`]: k-means grouping of orbits over altitude, inclination and RAAN,
//! - [`monte_carlo`]: seeded twelve-month collision projection under a removal [`Policy`].
//!
//! Two lighter helpers live alongside: [`heuristic`] (banded score used for queue
//! summaries) and [`lifecycle`] (stage and remaining-lifetime estimates).
//!
//! All estimators consume [`RiskSubject`]s, a flat snapshot of the features of one
//! catalog object. Build them from a catalog with [`RiskSubject::from_catalog`].
//!
//! ## Example
//!
//! ```rust
//! use sweeper::catalog::{Catalog, CatalogLimits};
//! use sweeper::risk::{Policy, RiskSubject};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let text = "# id,alt,inc,raan,rev/day,kind\nA,700,98,10,14.5,debris\nB,720,98,12,14.4,sat\n";
//! let catalog = Catalog::from_text(text, &CatalogLimits::default(), &mut StdRng::seed_from_u64(1));
//! let policy = Policy::new(0.5, 4, 1.0).unwrap();
//!
//! for subject in RiskSubject::from_catalog(&catalog) {
//!     let score = subject.score(policy.drag_multiplier);
//!     assert!(score.probability > 0.0 && score.probability < 1.0);
//! }
//! ```
pub mod clustering;
pub mod heuristic;
pub mod lifecycle;
pub mod logistic;
pub mod monte_carlo;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::constants::{Degree, Kilometer};
use crate::sweeper_errors::SweeperError;

use self::logistic::{logistic_risk_score, RiskFeatures, RiskScore};

/// Density used when no neighbourhood information is available.
pub const DEFAULT_DENSITY: f64 = 0.2;

/// Half-width of the altitude band used for local density.
pub const DENSITY_BAND_KM: Kilometer = 50.0;

/// Orbital features of one object, as seen by the risk estimators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSubject {
    pub id: String,
    pub altitude_km: Kilometer,
    pub inclination_deg: Degree,
    pub raan_deg: Degree,
    pub density: f64,
    pub debris: bool,
}

impl RiskSubject {
    /// Snapshot every object of a catalog, with local density computed against the
    /// rest of the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Vec<RiskSubject> {
        let altitudes: Vec<Kilometer> = catalog
            .objects()
            .iter()
            .map(|o| o.record.altitude_km())
            .collect();

        catalog
            .objects()
            .iter()
            .enumerate()
            .map(|(i, o)| RiskSubject {
                id: o.id.clone(),
                altitude_km: altitudes[i],
                inclination_deg: o.record.inclination_deg(),
                raan_deg: o.record.raan_deg(),
                density: local_density(&altitudes, i, DENSITY_BAND_KM),
                debris: o.kind.is_debris(),
            })
            .collect()
    }

    pub fn features(&self, drag_multiplier: f64) -> RiskFeatures {
        RiskFeatures {
            altitude_km: self.altitude_km,
            inclination_deg: self.inclination_deg,
            density: self.density,
            drag_multiplier,
            debris: self.debris,
        }
    }

    pub fn score(&self, drag_multiplier: f64) -> RiskScore {
        logistic_risk_score(&self.features(drag_multiplier))
    }
}

/// Fraction of the other objects whose altitude lies within `band_km` of object `index`.
///
/// Arguments
/// -----------------
/// * `altitudes`: altitude of every object in the population, in km.
/// * `index`: position of the object of interest in `altitudes`.
/// * `band_km`: half-width of the altitude band.
///
/// Return
/// ----------
/// * A value in `[0, 1]`, or [`DEFAULT_DENSITY`] when the population has no other object.
pub fn local_density(altitudes: &[Kilometer], index: usize, band_km: Kilometer) -> f64 {
    let Some(&own) = altitudes.get(index) else {
        return DEFAULT_DENSITY;
    };
    let others = altitudes.len().saturating_sub(1);
    if others == 0 {
        return DEFAULT_DENSITY;
    }
    let neighbours = altitudes
        .iter()
        .enumerate()
        .filter(|(j, alt)| *j != index && (*alt - own).abs() <= band_km)
        .count();
    neighbours as f64 / others as f64
}

/// Removal policy applied by the Monte Carlo projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Policy {
    /// Fraction of scheduled deorbits that actually succeed, in `[0, 1]`.
    pub deorbit_compliance: f64,
    /// Scheduled removals per month.
    pub cadence_per_month: u32,
    /// Atmospheric drag multiplier, at least 1.
    pub drag_multiplier: f64,
}

impl Policy {
    pub fn new(
        deorbit_compliance: f64,
        cadence_per_month: u32,
        drag_multiplier: f64,
    ) -> Result<Self, SweeperError> {
        if !(0.0..=1.0).contains(&deorbit_compliance) {
            return Err(SweeperError::InvalidPolicy(format!(
                "deorbit compliance must be in [0, 1], got {deorbit_compliance}"
            )));
        }
        if !(drag_multiplier.is_finite() && drag_multiplier >= 1.0) {
            return Err(SweeperError::InvalidPolicy(format!(
                "drag multiplier must be finite and >= 1, got {drag_multiplier}"
            )));
        }
        Ok(Policy {
            deorbit_compliance,
            cadence_per_month,
            drag_multiplier,
        })
    }

    /// Number of objects removed each month: `floor(cadence × compliance)`.
    pub fn removals_per_month(&self) -> usize {
        (self.cadence_per_month as f64 * self.deorbit_compliance).floor() as usize
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            deorbit_compliance: 0.5,
            cadence_per_month: 4,
            drag_multiplier: 1.0,
        }
    }
}
