mod common;

use std::time::{Duration, Instant};

use common::{rev_per_day_at, start_epoch, CircularTlePropagator, ISS_L1, ISS_L2};
use rand::{rngs::StdRng, SeedableRng};
use sweeper::constants::PositionVector;
use sweeper::risk::Policy;
use sweeper::simulation::{Sweeper, SweeperParams};
use sweeper::sweeper_errors::SweeperError;

fn population() -> String {
    let mut text = String::from("# id,alt,inc,raan,rev/day,kind\n");
    for (i, alt) in [480.0, 520.0, 610.0, 700.0, 760.0, 850.0, 990.0].iter().enumerate() {
        let kind = if i % 2 == 0 { "debris" } else { "sat" };
        text.push_str(&format!(
            "OBJ-{i},{alt},{},{},{},{kind}\n",
            30.0 + 10.0 * i as f64,
            (i * 50) as f64,
            rev_per_day_at(*alt)
        ));
    }
    text
}

fn sweeper() -> Sweeper<CircularTlePropagator> {
    Sweeper::from_text(
        &population(),
        CircularTlePropagator,
        SweeperParams::builder().time_scale(120.0).build().unwrap(),
        start_epoch(),
        &mut StdRng::seed_from_u64(21),
    )
}

#[test]
fn test_frame_loop() {
    let mut s = sweeper();
    let mut scans = 0;
    // one minute of frames at 60 Hz
    for _ in 0..3600 {
        let report = s.tick(1.0 / 60.0);
        assert_eq!(report.positions.len(), 7);
        if report.warnings.is_some() {
            scans += 1;
        }
    }
    // a scan every 5 s of frame time, give or take rounding of the frame sum
    assert!((11..=12).contains(&scans), "scans = {scans}");
    assert!(s.latest_warnings().is_empty());
}

#[test]
fn test_policy_drives_projection() {
    let mut s = sweeper();
    let baseline = s.project_year();
    s.set_policy(Policy::new(1.0, 3, 2.0).unwrap());
    let aggressive = s.project_year();

    assert!(baseline.series.iter().all(|m| m.removed_count <= 2));
    assert_eq!(
        aggressive.series.iter().map(|m| m.removed_count).sum::<usize>(),
        7
    );
    assert_eq!(s.project_year(), aggressive);
}

#[test]
fn test_planning_round_trip() {
    let mut s = sweeper();
    let collector = PositionVector::new(0.0, 7135.0, 0.0);

    let ids: Vec<String> = ["OBJ-0", "OBJ-2", "OBJ-4", "OBJ-6"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let cmp = s.plan_collection(&collector, &ids).unwrap();
    let plan = cmp.optimal.clone().unwrap();
    assert_eq!(plan.order.len(), 4);
    assert!(cmp.accuracy.unwrap() <= 1.0 + 1e-12);
    assert!(s.route_delta_v(&plan) > 0.0);

    for id in ["OBJ-1", "OBJ-3", "OBJ-5"] {
        assert_eq!(s.toggle_capture_target(id), Ok(true));
    }
    let t0 = Instant::now();
    let capture = s.plan_capture(&collector, t0).unwrap();
    assert_eq!(capture.rendezvous.positions.len(), 3);
    assert_eq!(
        s.plan_capture(&collector, t0 + Duration::from_millis(499)),
        Err(SweeperError::ReplanThrottled)
    );
    let again = s
        .plan_capture(&collector, t0 + Duration::from_millis(500))
        .unwrap();
    assert_eq!(again, capture);
}

#[test]
fn test_capture_selection_limit() {
    let mut s = sweeper();
    for i in 0..5 {
        s.toggle_capture_target(&format!("OBJ-{i}")).unwrap();
    }
    assert!(matches!(
        s.toggle_capture_target("OBJ-5"),
        Err(SweeperError::InvalidParameter(_))
    ));
    assert_eq!(s.toggle_capture_target("OBJ-0"), Ok(false));
    assert_eq!(s.toggle_capture_target("OBJ-5"), Ok(true));
}

#[test]
fn test_tle_catalog_through_the_facade() {
    let text = format!("ISS (ZARYA)\n{ISS_L1}\n{ISS_L2}\nISS DEB\n{ISS_L1}\n{ISS_L2}\n");
    let mut s = Sweeper::from_text(
        &text,
        CircularTlePropagator,
        SweeperParams::default(),
        start_epoch(),
        &mut StdRng::seed_from_u64(0),
    );
    let warnings = s.scan_now().to_vec();
    assert_eq!(warnings.len(), 1);
    assert_eq!(s.risk_scores().len(), 2);
}
