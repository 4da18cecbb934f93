mod common;

use approx::assert_relative_eq;
use common::{ISS_L1, ISS_L2};
use rand::{rngs::StdRng, SeedableRng};
use sweeper::catalog::{Catalog, CatalogLimits, ObjectKind};
use sweeper::orbit_model::OrbitRecord;

#[test]
fn test_tle_catalog_with_noise() {
    let text = format!(
        "ISS (ZARYA)\n{ISS_L1}\n{ISS_L2}\n\
         stray header line\n\
         COSMOS 2251 DEB\n{ISS_L1}\n{ISS_L2}\n\
         BROKEN\n1 short\n2 short\n\
         TAIL\n{ISS_L1}\n"
    );
    let catalog = Catalog::from_text(
        &text,
        &CatalogLimits::default(),
        &mut StdRng::seed_from_u64(0),
    );

    let ids: Vec<&str> = catalog.objects().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["ISS (ZARYA)", "COSMOS 2251 DEB"]);
    assert_eq!(catalog.debris().count(), 1);

    let iss = catalog.get("ISS (ZARYA)").unwrap();
    assert_relative_eq!(iss.record.inclination_deg(), 51.6416);
    assert_relative_eq!(iss.record.raan_deg(), 247.4627);
    assert!(matches!(iss.record, OrbitRecord::TwoLineElement(_)));
}

#[test]
fn test_synthetic_catalog_defaults_and_skips() {
    let text = "\
# name, alt, inc, raan, rev/day, kind, health, battery
SAT-1, 550, 53, 10, 15.1
DEB-1, 780, 98, 200, 14.4, Debris, 12, 0
BAD-1, 700, ninety, 0, 14.5
SHORT, 700
SAT-2, 1200, 30, 359, 12.9, sat, 87.5
";
    let catalog = Catalog::from_text(
        text,
        &CatalogLimits::default(),
        &mut StdRng::seed_from_u64(4),
    );
    assert_eq!(catalog.len(), 3);

    let sat = catalog.get("SAT-1").unwrap();
    assert_eq!(sat.kind, ObjectKind::Satellite);
    assert_eq!((sat.health_pct, sat.battery_pct), (100.0, 100.0));
    assert_relative_eq!(sat.record.altitude_km(), 550.0, epsilon = 1e-9);

    let deb = catalog.get("DEB-1").unwrap();
    assert_eq!(deb.kind, ObjectKind::Debris);
    assert_eq!((deb.health_pct, deb.battery_pct), (12.0, 0.0));

    assert_eq!(catalog.get("SAT-2").unwrap().health_pct, 87.5);
    assert!(catalog.get("BAD-1").is_none());
}

#[test]
fn test_population_caps_keep_the_first_objects() {
    let mut text = String::new();
    for i in 0..200 {
        text.push_str(&format!("SAT-{i},600,53,{},15.0,sat\n", i % 360));
    }
    for i in 0..80 {
        text.push_str(&format!("DEB-{i},800,98,{},14.3,debris\n", i % 360));
    }
    let catalog = Catalog::from_text(
        &text,
        &CatalogLimits::default(),
        &mut StdRng::seed_from_u64(2),
    );
    assert_eq!(catalog.active().count(), 160);
    assert_eq!(catalog.debris().count(), 60);
    assert!(catalog.get("SAT-159").is_some());
    assert!(catalog.get("SAT-160").is_none());
    assert!(catalog.get("DEB-59").is_some());
    assert!(catalog.get("DEB-60").is_none());
}
