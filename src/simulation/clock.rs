//! Simulated clock and replan throttle.
//!
//! The host loop calls [`SimulationClock::tick`] once per frame with the elapsed tick time.
//! Simulated time runs `time_scale` times faster than tick time; the collision scan runs on
//! its own cadence of tick seconds, independent of the frame rate.
use std::time::{Duration, Instant};

use hifitime::Epoch;

use crate::constants::Seconds;
use crate::sweeper_errors::SweeperError;
use crate::time::offset_epoch;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    simulated_time: Epoch,
    last_scan_time: Option<Epoch>,
    since_last_scan_s: Seconds,
    scan_interval_s: Seconds,
    time_scale: f64,
}

impl SimulationClock {
    pub fn new(start: Epoch, scan_interval_s: Seconds, time_scale: f64) -> Self {
        SimulationClock {
            simulated_time: start,
            last_scan_time: None,
            since_last_scan_s: 0.0,
            scan_interval_s,
            time_scale,
        }
    }

    pub fn now(&self) -> Epoch {
        self.simulated_time
    }

    /// Simulated instant of the last scan, `None` before the first one.
    pub fn last_scan_time(&self) -> Option<Epoch> {
        self.last_scan_time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Change the simulated seconds per tick second.
    ///
    /// Return
    /// ----------
    /// * [`SweeperError::InvalidParameter`] unless `time_scale` is finite and `>= 0`; the
    ///   current scale is kept.
    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SweeperError> {
        if !(time_scale.is_finite() && time_scale >= 0.0) {
            return Err(SweeperError::InvalidParameter(format!(
                "time_scale must be finite and >= 0, got {time_scale}"
            )));
        }
        self.time_scale = time_scale;
        Ok(())
    }

    /// Advance by `delta_s` seconds of tick time.
    ///
    /// Negative or non-finite ticks do not move the clock. A simulated step that is not
    /// finite is dropped; the scan timer still counts the tick.
    ///
    /// Return
    /// ----------
    /// * `true` when a collision scan is due at the new simulated time.
    pub fn tick(&mut self, delta_s: Seconds) -> bool {
        let delta_s = if delta_s.is_finite() { delta_s.max(0.0) } else { 0.0 };
        let step_s = delta_s * self.time_scale;
        if step_s >= 0.0 {
            if let Some(next) = offset_epoch(self.simulated_time, step_s) {
                self.simulated_time = next;
            }
        }

        self.since_last_scan_s += delta_s;
        if self.since_last_scan_s > self.scan_interval_s {
            self.mark_scanned();
            true
        } else {
            false
        }
    }

    /// Record a scan at the current simulated time and restart the scan timer.
    pub fn mark_scanned(&mut self) {
        self.since_last_scan_s = 0.0;
        self.last_scan_time = Some(self.simulated_time);
    }
}

/// Rejects replans requested less than `min_interval` after the previous accepted one.
#[derive(Debug, Clone)]
pub struct ReplanThrottle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl ReplanThrottle {
    pub fn new(min_interval: Duration) -> Self {
        ReplanThrottle {
            min_interval,
            last: None,
        }
    }

    pub fn try_acquire(&mut self, now: Instant) -> Result<(), SweeperError> {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.min_interval {
                return Err(SweeperError::ReplanThrottled);
            }
        }
        self.last = Some(now);
        Ok(())
    }
}
