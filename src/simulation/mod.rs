//! # Simulation façade
//!
//! [`Sweeper`] is the single entry point a render loop talks to. It owns the catalog, the
//! propagator, the simulated clock, the route planner and the current removal policy, and
//! exposes everything the display needs:
//!
//! | Call | Result |
//! |---|---|
//! | [`Sweeper::tick`] | positions every frame, fresh warnings when a scan is due |
//! | [`Sweeper::risk_scores`] | logistic and heuristic risk, lifecycle stage per object |
//! | [`Sweeper::clusters`] | k-means groups of orbits |
//! | [`Sweeper::project_year`] | Monte Carlo projection under the current policy |
//! | [`Sweeper::plan_collection`] | visiting order over selected objects |
//! | [`Sweeper::plan_capture`] | rendezvous and transfer path for the capture selection (throttled) |
//!
//! Everything runs synchronously on the caller's thread; a superseded result is simply
//! replaced by the next one.
//!
//! ## Example
//!
//! ```rust
//! use hifitime::Epoch;
//! use rand::{rngs::StdRng, SeedableRng};
//! use sweeper::orbit_model::propagator::UnavailablePropagator;
//! use sweeper::simulation::{Sweeper, SweeperParams};
//!
//! let text = "# id,alt,inc,raan,rev/day,kind\nA,700,98,10,14.5,debris\nB,900,53,40,13.9,sat\n";
//! let mut sweeper = Sweeper::from_text(
//!     text,
//!     UnavailablePropagator,
//!     SweeperParams::default(),
//!     Epoch::from_unix_seconds(1_700_000_000.0),
//!     &mut StdRng::seed_from_u64(7),
//! );
//!
//! let report = sweeper.tick(1.0 / 60.0);
//! assert_eq!(report.positions.len(), 2);
//! assert!(report.warnings.is_none());
//! ```
pub mod clock;
pub mod params;

use std::time::Instant;

use hifitime::Epoch;
use rand::Rng;
use serde::Serialize;

use crate::catalog::{Catalog, ObjectKind, TrackedObject};
use crate::collision::{scan, CollisionWarning};
use crate::constants::PositionVector;
use crate::orbit_model::{position_at, propagator::Propagator};
use crate::risk::clustering::{kmeans_orbits, Clustering};
use crate::risk::heuristic::{heuristic_risk_score, summarize_risk, HeuristicOptions, RiskSummary};
use crate::risk::lifecycle::{estimate_lifetime_days, lifecycle_stage, LifecycleStage};
use crate::risk::logistic::RiskScore;
use crate::risk::monte_carlo::{project_year, YearProjection};
use crate::risk::{Policy, RiskSubject};
use crate::route::cache::RendezvousCache;
use crate::route::delta_v::{dv_for_route, OrbitShell};
use crate::route::tour::{RoutePlan, TourComparison};
use crate::route::{CapturePlan, RoutePlanner};
use crate::sweeper_errors::SweeperError;

pub use clock::{ReplanThrottle, SimulationClock};
pub use params::{SweeperParams, SweeperParamsBuilder};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPosition {
    pub id: String,
    pub kind: ObjectKind,
    pub position: PositionVector,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    #[serde(skip)]
    pub epoch: Epoch,
    /// Objects that propagated at `epoch`; the others are absent for this tick.
    pub positions: Vec<ObjectPosition>,
    /// Fresh scan results, `None` when no scan ran this tick.
    pub warnings: Option<Vec<CollisionWarning>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectRisk {
    pub id: String,
    pub score: RiskScore,
    pub heuristic: f64,
    pub stage: LifecycleStage,
    pub lifetime_days: f64,
}

/// Simulation state driven by an external tick.
pub struct Sweeper<P: Propagator> {
    catalog: Catalog,
    subjects: Vec<RiskSubject>,
    propagator: P,
    params: SweeperParams,
    clock: SimulationClock,
    planner: RoutePlanner,
    throttle: ReplanThrottle,
    policy: Policy,
    capture_selection: Vec<String>,
    warnings: Vec<CollisionWarning>,
}

impl<P: Propagator> Sweeper<P> {
    pub fn new(catalog: Catalog, propagator: P, params: SweeperParams, start: Epoch) -> Self {
        let subjects = RiskSubject::from_catalog(&catalog);
        let clock = SimulationClock::new(start, params.scan_interval_s, params.time_scale);
        let planner = RoutePlanner::new(
            params.rendezvous,
            params.collector_radius_km,
            RendezvousCache::new(params.cache_capacity, params.cache_ttl),
        );
        let throttle = ReplanThrottle::new(params.replan_interval);

        Sweeper {
            catalog,
            subjects,
            propagator,
            params,
            clock,
            planner,
            throttle,
            policy: Policy::default(),
            capture_selection: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Load a catalog from text (CSV or TLE blocks) with the population caps of `params`.
    pub fn from_text<R: Rng>(
        text: &str,
        propagator: P,
        params: SweeperParams,
        start: Epoch,
        rng: &mut R,
    ) -> Self {
        let catalog = Catalog::from_text(text, &params.limits, rng);
        Self::new(catalog, propagator, params, start)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &SweeperParams {
        &self.params
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn now(&self) -> Epoch {
        self.clock.now()
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// See [`SimulationClock::set_time_scale`].
    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<(), SweeperError> {
        self.clock.set_time_scale(time_scale)
    }

    /// Warnings of the last scan.
    pub fn latest_warnings(&self) -> &[CollisionWarning] {
        &self.warnings
    }

    fn object(&self, id: &str) -> Result<&TrackedObject, SweeperError> {
        self.catalog
            .get(id)
            .ok_or_else(|| SweeperError::UnknownObject(id.to_string()))
    }

    fn positions_at(&self, epoch: Epoch) -> Vec<ObjectPosition> {
        self.catalog
            .objects()
            .iter()
            .filter_map(|o| {
                position_at(&o.record, epoch, &self.propagator)
                    .ok()
                    .map(|position| ObjectPosition {
                        id: o.id.clone(),
                        kind: o.kind,
                        position,
                    })
            })
            .collect()
    }

    /// Advance the simulation by `delta_s` seconds of tick time.
    pub fn tick(&mut self, delta_s: f64) -> TickReport {
        let scan_due = self.clock.tick(delta_s);
        let epoch = self.clock.now();

        let warnings = scan_due.then(|| {
            self.warnings = scan(
                self.catalog.objects(),
                epoch,
                &self.params.scan,
                &self.propagator,
            );
            self.warnings.clone()
        });

        TickReport {
            epoch,
            positions: self.positions_at(epoch),
            warnings,
        }
    }

    /// Run a collision scan at the current simulated time, outside the regular cadence.
    pub fn scan_now(&mut self) -> &[CollisionWarning] {
        self.clock.mark_scanned();
        self.warnings = scan(
            self.catalog.objects(),
            self.clock.now(),
            &self.params.scan,
            &self.propagator,
        );
        &self.warnings
    }

    pub fn risk_scores(&self) -> Vec<ObjectRisk> {
        let drag = self.policy.drag_multiplier;
        let options = HeuristicOptions {
            kp: self.params.kp_index,
            drag_scale: drag,
        };
        self.subjects
            .iter()
            .map(|s| ObjectRisk {
                id: s.id.clone(),
                score: s.score(drag),
                heuristic: heuristic_risk_score(
                    s.altitude_km,
                    s.inclination_deg,
                    s.debris,
                    &options,
                ),
                stage: lifecycle_stage(s.altitude_km, drag),
                lifetime_days: estimate_lifetime_days(s.altitude_km, drag),
            })
            .collect()
    }

    /// Heuristic risk summary over the objects named in `ids` (unknown ids are ignored).
    pub fn risk_summary(&self, ids: &[String]) -> RiskSummary {
        let scores: Vec<f64> = self
            .risk_scores()
            .into_iter()
            .filter(|r| ids.contains(&r.id))
            .map(|r| r.heuristic)
            .collect();
        summarize_risk(&scores)
    }

    pub fn clusters(&self) -> Clustering {
        kmeans_orbits(
            &self.subjects,
            self.params.cluster_count,
            self.params.cluster_iterations,
        )
    }

    pub fn project_year(&self) -> YearProjection {
        project_year(&self.subjects, &self.policy, &self.params.projection)
    }

    /// Visiting order over `ids` from `collector`, at the current simulated time.
    ///
    /// Objects that fail to propagate are left out of the plan.
    pub fn plan_collection(
        &self,
        collector: &PositionVector,
        ids: &[String],
    ) -> Result<TourComparison, SweeperError> {
        let targets = ids
            .iter()
            .map(|id| self.object(id))
            .collect::<Result<Vec<_>, _>>()?;
        let snapshot = RoutePlanner::snapshot(&targets, self.clock.now(), &self.propagator);
        Ok(RoutePlanner::compare(collector, &snapshot))
    }

    /// Delta-v of flying `plan` shell to shell, in m/s.
    pub fn route_delta_v(&self, plan: &RoutePlan) -> f64 {
        let shells: Vec<OrbitShell> = plan
            .order
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .map(OrbitShell::of)
            .collect();
        dv_for_route(&plan.order, &shells)
    }

    pub fn capture_selection(&self) -> &[String] {
        &self.capture_selection
    }

    /// Add `id` to the capture selection, or remove it if already selected.
    ///
    /// Return
    /// ----------
    /// * `Ok(true)` when the object is now selected, `Ok(false)` when it was removed.
    pub fn toggle_capture_target(&mut self, id: &str) -> Result<bool, SweeperError> {
        self.object(id)?;
        if let Some(pos) = self.capture_selection.iter().position(|s| s == id) {
            self.capture_selection.remove(pos);
            return Ok(false);
        }
        if self.capture_selection.len() >= self.params.max_capture_targets {
            return Err(SweeperError::InvalidParameter(format!(
                "capture selection is limited to {} objects",
                self.params.max_capture_targets
            )));
        }
        self.capture_selection.push(id.to_string());
        Ok(true)
    }

    /// Rendezvous and transfer path for the current capture selection.
    ///
    /// `now` is the wall-clock instant of the request; requests closer together than the
    /// replan interval are rejected with [`SweeperError::ReplanThrottled`]. A selection
    /// that cannot be planned is rejected first and does not count as a replan.
    pub fn plan_capture(
        &mut self,
        collector: &PositionVector,
        now: Instant,
    ) -> Result<CapturePlan, SweeperError> {
        let targets = self
            .capture_selection
            .iter()
            .map(|id| {
                self.catalog
                    .get(id)
                    .ok_or_else(|| SweeperError::UnknownObject(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if targets.len() < 2 {
            return Err(SweeperError::NotEnoughTargets(targets.len()));
        }

        self.throttle.try_acquire(now)?;

        self.planner.plan_capture(
            collector,
            &targets,
            self.clock.now(),
            now,
            &self.propagator,
        )
    }
}
