//! Configuration of the [`Sweeper`](crate::simulation::Sweeper) façade.
use std::time::Duration;

use crate::catalog::CatalogLimits;
use crate::collision::ScanParams;
use crate::constants::{Kilometer, Seconds};
use crate::risk::clustering::{DEFAULT_CLUSTER_COUNT, DEFAULT_ITERATIONS};
use crate::risk::monte_carlo::ProjectionConfig;
use crate::route::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::route::rendezvous::RendezvousParams;
use crate::route::transfer::DEFAULT_COLLECTOR_RADIUS_KM;
use crate::sweeper_errors::SweeperError;

/// Every tunable of the simulation, scan, risk and planning layers.
///
/// Defaults
/// -----------------
/// * `scan`: lookahead offsets 60, 300, 600, 1200, 1800, 3600 s, threshold 5 km
/// * `scan_interval_s`: 5.0 (tick seconds between collision scans)
/// * `time_scale`: 60.0 (simulated seconds per tick second)
/// * `limits`: 160 active objects, 60 debris
/// * `rendezvous`: 12 h horizon, 60 min step, at most 24 steps
/// * `cache_capacity`: 10, `cache_ttl`: 60 s
/// * `replan_interval`: 500 ms
/// * `collector_radius_km`: 1.12 Earth radii
/// * `projection`: 12 months, collision scale 0.015, seed 12345
/// * `cluster_count`: 4, `cluster_iterations`: 8
/// * `max_capture_targets`: 5
/// * `kp_index`: 3.0
///
/// See also
/// -----------------
/// * [`SweeperParams::builder`] – validated construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SweeperParams {
    pub scan: ScanParams,
    pub scan_interval_s: Seconds,
    pub time_scale: f64,
    pub limits: CatalogLimits,
    pub rendezvous: RendezvousParams,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
    pub replan_interval: Duration,
    pub collector_radius_km: Kilometer,
    pub projection: ProjectionConfig,
    pub cluster_count: usize,
    pub cluster_iterations: usize,
    /// Largest number of objects selected for a single capture.
    pub max_capture_targets: usize,
    /// Planetary K index fed to the heuristic score.
    pub kp_index: f64,
}

impl Default for SweeperParams {
    fn default() -> Self {
        SweeperParams {
            scan: ScanParams::default(),
            scan_interval_s: 5.0,
            time_scale: 60.0,
            limits: CatalogLimits::default(),
            rendezvous: RendezvousParams::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: DEFAULT_CACHE_TTL,
            replan_interval: Duration::from_millis(500),
            collector_radius_km: DEFAULT_COLLECTOR_RADIUS_KM,
            projection: ProjectionConfig::default(),
            cluster_count: DEFAULT_CLUSTER_COUNT,
            cluster_iterations: DEFAULT_ITERATIONS,
            max_capture_targets: 5,
            kp_index: 3.0,
        }
    }
}

impl SweeperParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent, validated construction.
    ///
    /// ```rust
    /// use sweeper::simulation::SweeperParams;
    ///
    /// let params = SweeperParams::builder()
    ///     .time_scale(120.0)
    ///     .proximity_threshold_km(10.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.scan.proximity_threshold_km, 10.0);
    /// ```
    pub fn builder() -> SweeperParamsBuilder {
        SweeperParamsBuilder::new()
    }
}

/// Builder for [`SweeperParams`], with validation.
#[derive(Debug, Clone)]
pub struct SweeperParamsBuilder {
    params: SweeperParams,
}

impl Default for SweeperParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SweeperParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: SweeperParams::default(),
        }
    }

    // --- Scan ---
    pub fn lookahead_offsets(mut self, v: Vec<Seconds>) -> Self {
        self.params.scan.lookahead_offsets = v;
        self
    }
    pub fn proximity_threshold_km(mut self, v: Kilometer) -> Self {
        self.params.scan.proximity_threshold_km = v;
        self
    }
    pub fn scan_interval_s(mut self, v: Seconds) -> Self {
        self.params.scan_interval_s = v;
        self
    }
    pub fn time_scale(mut self, v: f64) -> Self {
        self.params.time_scale = v;
        self
    }

    // --- Catalog ---
    pub fn max_active(mut self, v: usize) -> Self {
        self.params.limits.max_active = v;
        self
    }
    pub fn max_debris(mut self, v: usize) -> Self {
        self.params.limits.max_debris = v;
        self
    }

    // --- Planning ---
    pub fn rendezvous(mut self, v: RendezvousParams) -> Self {
        self.params.rendezvous = v;
        self
    }
    pub fn cache_capacity(mut self, v: usize) -> Self {
        self.params.cache_capacity = v;
        self
    }
    pub fn cache_ttl(mut self, v: Duration) -> Self {
        self.params.cache_ttl = v;
        self
    }
    pub fn replan_interval(mut self, v: Duration) -> Self {
        self.params.replan_interval = v;
        self
    }
    pub fn collector_radius_km(mut self, v: Kilometer) -> Self {
        self.params.collector_radius_km = v;
        self
    }
    pub fn max_capture_targets(mut self, v: usize) -> Self {
        self.params.max_capture_targets = v;
        self
    }

    // --- Risk ---
    pub fn projection(mut self, v: ProjectionConfig) -> Self {
        self.params.projection = v;
        self
    }
    pub fn cluster_count(mut self, v: usize) -> Self {
        self.params.cluster_count = v;
        self
    }
    pub fn cluster_iterations(mut self, v: usize) -> Self {
        self.params.cluster_iterations = v;
        self
    }
    pub fn kp_index(mut self, v: f64) -> Self {
        self.params.kp_index = v;
        self
    }

    fn positive(x: f64) -> bool {
        x.is_finite() && x > 0.0
    }

    fn non_negative(x: f64) -> bool {
        x.is_finite() && x >= 0.0
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * at least one lookahead offset, each finite and `>= 0`,
    /// * `proximity_threshold_km > 0`, `scan_interval_s > 0`, `time_scale >= 0`,
    /// * `horizon_hours > 0`, `step_minutes > 0`,
    /// * `collector_radius_km > 0`,
    /// * `collision_scale >= 0`, `months >= 1`,
    /// * `cluster_count >= 1`, `max_capture_targets >= 2`, `kp_index >= 0`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SweeperParams)`, or `Err(SweeperError::InvalidParameter)` naming the first
    ///   rule that failed.
    pub fn build(self) -> Result<SweeperParams, SweeperError> {
        let p = &self.params;
        let fail = |msg: &str| Err(SweeperError::InvalidParameter(msg.to_string()));

        if p.scan.lookahead_offsets.is_empty() {
            return fail("lookahead_offsets must not be empty");
        }
        if !p.scan.lookahead_offsets.iter().all(|o| Self::non_negative(*o)) {
            return fail("lookahead_offsets must be finite and >= 0");
        }
        if !Self::positive(p.scan.proximity_threshold_km) {
            return fail("proximity_threshold_km must be > 0");
        }
        if !Self::positive(p.scan_interval_s) {
            return fail("scan_interval_s must be > 0");
        }
        if !Self::non_negative(p.time_scale) {
            return fail("time_scale must be >= 0");
        }
        if !Self::positive(p.rendezvous.horizon_hours) {
            return fail("rendezvous horizon_hours must be > 0");
        }
        if !Self::positive(p.rendezvous.step_minutes) {
            return fail("rendezvous step_minutes must be > 0");
        }
        if !Self::positive(p.collector_radius_km) {
            return fail("collector_radius_km must be > 0");
        }
        if !Self::non_negative(p.projection.collision_scale) {
            return fail("collision_scale must be >= 0");
        }
        if p.projection.months == 0 {
            return fail("projection months must be >= 1");
        }
        if p.cluster_count == 0 {
            return fail("cluster_count must be >= 1");
        }
        if p.max_capture_targets < 2 {
            return fail("max_capture_targets must be >= 2");
        }
        if !Self::non_negative(p.kp_index) {
            return fail("kp_index must be >= 0");
        }

        Ok(self.params)
    }
}
