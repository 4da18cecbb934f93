//! Simulated-time helpers.
//!
//! Simulated time is carried as a [`hifitime::Epoch`]. Everything that needs a plain
//! number (the synthetic propagator, lead times, cache keys) goes through the helpers
//! below so the conversions live in one place.
use hifitime::{Duration, Epoch};

use crate::constants::{Radian, Seconds, DPI, MJD, SECONDS_PER_DAY, T2000};

/// Shift an epoch by a signed number of seconds.
///
/// Returns `None` for a NaN or infinite shift. Finite shifts beyond the range of
/// [`Duration`] saturate.
pub fn offset_epoch(epoch: Epoch, seconds: Seconds) -> Option<Epoch> {
    seconds
        .is_finite()
        .then(|| epoch + Duration::from_seconds(seconds))
}

/// Signed number of seconds from `from` to `to`.
pub fn seconds_between(from: Epoch, to: Epoch) -> Seconds {
    (to - from).to_seconds()
}

/// Seconds elapsed since the Unix epoch, the time origin of synthetic mean anomalies.
pub fn unix_seconds(epoch: Epoch) -> Seconds {
    epoch.to_unix_seconds()
}

/// Modified Julian Date of an epoch, used as the UT1 argument of [`gmst`].
///
/// UTC is used in place of UT1; the difference is below one second and far below
/// the resolution of anything in this crate.
pub fn epoch_to_mjd(epoch: Epoch) -> MJD {
    epoch.to_mjd_utc_days()
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This is the Earth rotation angle used to turn inertial positions into Earth-fixed ones.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// 1. A cubic polynomial (coefficients C0–C3) gives GMST at 0h UT1 in seconds.
/// 2. The fraction of the day is added, scaled by `RAP` (sidereal days per solar day).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
pub fn gmst(tjm: MJD) -> Radian {
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;
    let h = tjm.fract() * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}

/// Earth rotation angle at a simulated epoch.
pub fn earth_rotation_angle(epoch: Epoch) -> Radian {
    gmst(epoch_to_mjd(epoch))
}

/// Human-readable lead time: `"45s"`, `"12m"`, `"1.5h"`.
pub fn format_time_remaining(seconds: Seconds) -> String {
    if seconds < 60.0 {
        format!("{}s", seconds.round())
    } else if seconds < 3600.0 {
        format!("{}m", (seconds / 60.0).round())
    } else {
        format!("{:.1}h", seconds / 3600.0)
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        assert_relative_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-10);

        assert_relative_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-10);
    }

    #[test]
    fn test_gmst_range() {
        for i in 0..200 {
            let g = gmst(T2000 + i as f64 * 0.37);
            assert!((0.0..DPI).contains(&g));
        }
    }

    #[test]
    fn test_offset_epoch() {
        let t0 = Epoch::from_unix_seconds(1_700_000_000.0);
        let t1 = offset_epoch(t0, 3600.0).unwrap();
        assert_relative_eq!(seconds_between(t0, t1), 3600.0, epsilon = 1e-6);
        assert_relative_eq!(unix_seconds(t1), 1_700_003_600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_offset_epoch_rejects_non_finite() {
        let t0 = Epoch::from_unix_seconds(1_700_000_000.0);
        assert_eq!(offset_epoch(t0, f64::NAN), None);
        assert_eq!(offset_epoch(t0, f64::INFINITY), None);
        assert_eq!(offset_epoch(t0, f64::NEG_INFINITY), None);
        // saturates instead of overflowing
        assert!(offset_epoch(t0, 1e308).is_some_and(|t| t > t0));
    }

    #[test]
    fn test_format_time_remaining() {
        assert_eq!(format_time_remaining(42.0), "42s");
        assert_eq!(format_time_remaining(300.0), "5m");
        assert_eq!(format_time_remaining(5400.0), "1.5h");
    }
}
