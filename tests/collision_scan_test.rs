mod common;

use approx::assert_relative_eq;
use common::{
    start_epoch, synthetic, tle_object, CircularTlePropagator, NanPropagator, OddHoursPropagator,
    ISS_NAME,
};
use sweeper::catalog::ObjectKind;
use sweeper::collision::{scan, ScanParams, Severity};
use sweeper::constants::EARTH_RADIUS_KM;
use sweeper::orbit_model::propagator::UnavailablePropagator;
use sweeper::time::offset_epoch;

/// Phase offset putting two objects `gap_km` apart on a circular orbit at `alt`.
fn phase_for_gap(alt: f64, gap_km: f64) -> f64 {
    2.0 * (gap_km / (2.0 * (EARTH_RADIUS_KM + alt))).asin()
}

#[test]
fn test_separated_shells_raise_nothing() {
    let objects = vec![
        synthetic("LOW", ObjectKind::Satellite, 500.0, 53.0, 0.0, 0.0),
        synthetic("MID", ObjectKind::Debris, 700.0, 97.0, 0.0, 0.0),
        synthetic("HIGH", ObjectKind::Satellite, 900.0, 30.0, 0.0, 0.0),
    ];
    let warnings = scan(
        &objects,
        start_epoch(),
        &ScanParams::default(),
        &UnavailablePropagator,
    );
    assert!(warnings.is_empty());
}

#[test]
fn test_near_miss_severity_bands() {
    for (gap, severity) in [
        (1.5, Severity::Critical),
        (3.0, Severity::High),
        (4.5, Severity::Medium),
    ] {
        let objects = vec![
            synthetic("A", ObjectKind::Satellite, 650.0, 53.0, 120.0, 0.0),
            synthetic("B", ObjectKind::Debris, 650.0, 53.0, 120.0, phase_for_gap(650.0, gap)),
        ];
        let warnings = scan(
            &objects,
            start_epoch(),
            &ScanParams::default(),
            &UnavailablePropagator,
        );
        assert_eq!(warnings.len(), 1);
        let w = &warnings[0];
        assert_eq!(w.severity, severity);
        assert_eq!(w.lead_time_s, 60.0);
        assert_relative_eq!(w.distance_km, gap, epsilon = 1e-5);
        assert_eq!((w.kind_a, w.kind_b), (ObjectKind::Satellite, ObjectKind::Debris));
    }
}

#[test]
fn test_tle_objects_go_through_the_propagator() {
    let objects = vec![tle_object(ISS_NAME), tle_object("ISS DEB")];

    let warnings = scan(
        &objects,
        start_epoch(),
        &ScanParams::default(),
        &CircularTlePropagator,
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Critical);
    assert_eq!(warnings[0].kind_b, ObjectKind::Debris);

    // same pair, but the propagator never yields a usable vector
    let none = scan(&objects, start_epoch(), &ScanParams::default(), &NanPropagator);
    assert!(none.is_empty());
}

#[test]
fn test_failed_offsets_skip_only_that_sample() {
    let objects = vec![tle_object(ISS_NAME), tle_object("ISS DEB")];
    let now = start_epoch();

    // only the one-hour offset lands in an hour the propagator answers for
    let params = ScanParams::default();
    let answered: Vec<f64> = params
        .lookahead_offsets
        .iter()
        .copied()
        .filter(|dt| OddHoursPropagator::answers_at(offset_epoch(now, *dt).unwrap()))
        .collect();
    assert_eq!(answered, vec![3600.0]);

    let warnings = scan(&objects, now, &params, &OddHoursPropagator);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].lead_time_s, 3600.0);
    assert_eq!(warnings[0].severity, Severity::Critical);
}

#[test]
fn test_non_finite_offsets_are_ignored() {
    let objects = vec![
        synthetic("A", ObjectKind::Satellite, 650.0, 53.0, 120.0, 0.0),
        synthetic("B", ObjectKind::Debris, 650.0, 53.0, 120.0, phase_for_gap(650.0, 1.5)),
    ];
    let params = ScanParams {
        lookahead_offsets: vec![f64::NAN, f64::INFINITY, 300.0],
        ..ScanParams::default()
    };
    let warnings = scan(&objects, start_epoch(), &params, &UnavailablePropagator);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].lead_time_s, 300.0);
}

#[test]
fn test_failed_objects_do_not_hide_other_pairs() {
    let objects = vec![
        tle_object(ISS_NAME),
        synthetic("A", ObjectKind::Satellite, 800.0, 98.0, 10.0, 0.0),
        synthetic("B", ObjectKind::Debris, 800.0, 98.0, 10.0, phase_for_gap(800.0, 1.0)),
        synthetic("C", ObjectKind::Debris, 400.0, 10.0, 80.0, 0.0),
    ];
    let warnings = scan(
        &objects,
        start_epoch(),
        &ScanParams::default(),
        &UnavailablePropagator,
    );
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].object_id_a, "A");
    assert_eq!(warnings[0].object_id_b, "B");
}

#[test]
fn test_warnings_sorted_by_lead_time() {
    let params = ScanParams {
        lookahead_offsets: vec![3600.0, 600.0, 60.0],
        ..ScanParams::default()
    };
    let objects = vec![
        synthetic("A", ObjectKind::Satellite, 600.0, 45.0, 0.0, 0.0),
        synthetic("B", ObjectKind::Debris, 600.0, 45.0, 0.0, phase_for_gap(600.0, 2.5)),
        synthetic("C", ObjectKind::Satellite, 1000.0, 70.0, 200.0, 1.0),
        synthetic(
            "D",
            ObjectKind::Debris,
            1000.0,
            70.0,
            200.0,
            1.0 + phase_for_gap(1000.0, 0.5),
        ),
    ];
    let warnings = scan(&objects, start_epoch(), &params, &UnavailablePropagator);
    assert_eq!(warnings.len(), 2);
    assert!(warnings
        .windows(2)
        .all(|w| w[0].lead_time_s <= w[1].lead_time_s));
    assert!(warnings.iter().all(|w| w.lead_time_s == 60.0));
}
