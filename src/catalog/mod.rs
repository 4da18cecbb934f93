//! # Object catalog
//!
//! The catalog owns every [`TrackedObject`]. It is built once from input text and is
//! immutable afterwards; the scanner, the planner and the risk model only borrow it.
//!
//! ## Input formats
//!
//! Two shapes are recognized, decided from the first non-empty line:
//!
//! - **Synthetic CSV** – the line starts with `#` or contains a comma
//!   (see [`csv_reader`](crate::catalog::csv_reader)).
//! - **Three-line TLE blocks** – anything else
//!   (see [`tle_reader`](crate::catalog::tle_reader)).
//!
//! Malformed lines are skipped, never fatal.
//!
//! ## Population caps
//!
//! The collision scan is quadratic in the number of objects, so active objects and debris
//! are capped separately ([`CatalogLimits`]), keeping the first objects in input order.
pub mod csv_reader;
pub mod tle_reader;

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::orbit_model::OrbitRecord;

/// Whether an object is an operating satellite or a piece of debris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    Satellite,
    Debris,
}

impl ObjectKind {
    /// `"debris"` (any case) is debris, everything else is a satellite.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("debris") {
            ObjectKind::Debris
        } else {
            ObjectKind::Satellite
        }
    }

    /// Kind guessed from a TLE object name: catalog names tag fragments with `DEB`.
    pub fn from_tle_name(name: &str) -> Self {
        if name.split_whitespace().any(|w| w.eq_ignore_ascii_case("DEB")) {
            ObjectKind::Debris
        } else {
            ObjectKind::Satellite
        }
    }

    pub fn is_debris(&self) -> bool {
        matches!(self, ObjectKind::Debris)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedObject {
    pub id: String,
    pub kind: ObjectKind,
    pub record: OrbitRecord,
    pub health_pct: f64,
    pub battery_pct: f64,
}

/// Maximum number of objects of each kind kept by a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogLimits {
    pub max_active: usize,
    pub max_debris: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        CatalogLimits {
            max_active: 160,
            max_debris: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    objects: Vec<TrackedObject>,
}

fn looks_like_csv(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .is_some_and(|first| first.starts_with('#') || first.contains(','))
}

impl Catalog {
    /// Build a catalog from raw input text.
    ///
    /// Arguments
    /// -----------------
    /// * `text` – synthetic CSV rows or three-line TLE blocks.
    /// * `limits` – per-kind population caps.
    /// * `rng` – source of the initial phase of synthetic orbits.
    pub fn from_text<R: Rng>(text: &str, limits: &CatalogLimits, rng: &mut R) -> Self {
        let (objects, skipped) = if looks_like_csv(text) {
            csv_reader::read_synthetic_rows(text, rng)
        } else {
            let (tles, skipped) = tle_reader::read_tle_blocks(text);
            let objects = tles
                .into_iter()
                .map(|tle| TrackedObject {
                    id: tle.name.clone(),
                    kind: ObjectKind::from_tle_name(&tle.name),
                    record: OrbitRecord::TwoLineElement(tle),
                    health_pct: 100.0,
                    battery_pct: 100.0,
                })
                .collect();
            (objects, skipped)
        };

        let catalog = Self::from_objects(objects, limits);
        log::info!(
            "catalog loaded: {} active, {} debris, {} input lines skipped",
            catalog.active().count(),
            catalog.debris().count(),
            skipped
        );
        catalog
    }

    /// Build a catalog from already-constructed objects.
    ///
    /// Later objects reusing an id are dropped, then the per-kind caps are applied in
    /// input order.
    pub fn from_objects(objects: Vec<TrackedObject>, limits: &CatalogLimits) -> Self {
        let mut seen = HashSet::new();
        let (mut n_active, mut n_debris) = (0, 0);
        let mut kept = Vec::with_capacity(objects.len());

        for obj in objects {
            if !seen.insert(obj.id.clone()) {
                log::warn!("duplicate object id '{}' ignored", obj.id);
                continue;
            }
            let (count, cap) = match obj.kind {
                ObjectKind::Satellite => (&mut n_active, limits.max_active),
                ObjectKind::Debris => (&mut n_debris, limits.max_debris),
            };
            if *count < cap {
                *count += 1;
                kept.push(obj);
            }
        }

        Catalog { objects: kept }
    }

    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.iter().filter(|o| !o.kind.is_debris())
    }

    pub fn debris(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.iter().filter(|o| o.kind.is_debris())
    }
}
