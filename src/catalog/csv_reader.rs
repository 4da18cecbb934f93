//! Reader for synthetic catalog rows.
//!
//! ```text
//! name, altitudeKm, inclinationDeg, raanDeg, meanMotionRevPerDay[, kind[, healthPct[, batteryPct]]]
//! ```
//!
//! Lines starting with `#` are comments. The first five fields are required; `kind`
//! defaults to satellite and the percentages default to 100. Rows that fail to parse
//! are logged and skipped.
use csv::{ReaderBuilder, StringRecord, Trim};
use rand::Rng;

use crate::{
    catalog::{ObjectKind, TrackedObject},
    constants::DPI,
    orbit_model::{synthetic::SyntheticOrbit, OrbitRecord},
    sweeper_errors::SweeperError,
};

const DEFAULT_PERCENT: f64 = 100.0;

fn required(record: &StringRecord, idx: usize, what: &str) -> Result<f64, SweeperError> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SweeperError::InvalidOrbitRecord(format!("missing {what}")))?
        .parse::<f64>()
        .map_err(|_| SweeperError::InvalidOrbitRecord(format!("invalid {what}")))
}

fn optional_percent(record: &StringRecord, idx: usize, what: &str) -> Result<f64, SweeperError> {
    match record.get(idx).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_PERCENT),
        Some(s) => s
            .parse::<f64>()
            .map_err(|_| SweeperError::InvalidOrbitRecord(format!("invalid {what}"))),
    }
}

/// Turn one CSV record into a tracked object; the initial phase is drawn from `rng`.
fn object_from_record<R: Rng>(
    record: &StringRecord,
    rng: &mut R,
) -> Result<TrackedObject, SweeperError> {
    let name = record
        .get(0)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SweeperError::InvalidOrbitRecord("missing name".into()))?;

    let altitude_km = required(record, 1, "altitude")?;
    let inclination_deg = required(record, 2, "inclination")?;
    let raan_deg = required(record, 3, "RAAN")?;
    let mean_motion = required(record, 4, "mean motion")?;

    let kind = record
        .get(5)
        .filter(|s| !s.is_empty())
        .map(ObjectKind::from_label)
        .unwrap_or(ObjectKind::Satellite);
    let health_pct = optional_percent(record, 6, "health")?;
    let battery_pct = optional_percent(record, 7, "battery")?;

    let orbit = SyntheticOrbit::from_catalog_units(
        altitude_km,
        inclination_deg,
        raan_deg,
        mean_motion,
        rng.random::<f64>() * DPI,
    )?;

    Ok(TrackedObject {
        id: name.to_string(),
        kind,
        record: OrbitRecord::Synthetic(orbit),
        health_pct,
        battery_pct,
    })
}

/// Parse every valid synthetic row of `text`.
///
/// Return
/// ----------
/// * The parsed objects and the number of skipped rows.
pub(crate) fn read_synthetic_rows<R: Rng>(
    text: &str,
    rng: &mut R,
) -> (Vec<TrackedObject>, usize) {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let parsed = result
            .map_err(SweeperError::from)
            .and_then(|record| object_from_record(&record, rng));
        match parsed {
            Ok(obj) => out.push(obj),
            Err(err) => {
                log::warn!("skipping synthetic catalog row: {err}");
                skipped += 1;
            }
        }
    }

    (out, skipped)
}
