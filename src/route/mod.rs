//! # Route planner
//!
//! Plans how a collector vehicle visits a set of targets:
//!
//! - [`tour`]: visiting order over a position snapshot (nearest neighbour, exact search),
//! - [`delta_v`]: propellant cost between orbital shells,
//! - [`rendezvous`]: the future instant at which moving targets bunch up,
//! - [`transfer`]: the eased path from the collector to a capture point,
//! - [`cache`]: a bounded, expiring cache of rendezvous results.
//!
//! [`RoutePlanner`] ties them together and owns the rendezvous cache. Plans are snapshots:
//! they go stale as soon as the targets move, callers replan rather than update them.
pub mod cache;
pub mod delta_v;
pub mod rendezvous;
pub mod tour;
pub mod transfer;

use std::time::Instant;

use hifitime::Epoch;
use serde::Serialize;

use crate::catalog::TrackedObject;
use crate::constants::{Kilometer, PositionVector};
use crate::orbit_model::{position_at, propagator::Propagator};
use crate::sweeper_errors::SweeperError;
use crate::time::seconds_between;

use self::cache::{RendezvousCache, RendezvousKey};
use self::rendezvous::{find_rendezvous, RendezvousParams, RendezvousSolution};
use self::tour::{compare_tours, RoutePlan, RouteTarget, TourComparison};
use self::transfer::{plan_transfer, TransferPath};

/// Rendezvous plus the collector's path to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturePlan {
    pub rendezvous: RendezvousSolution,
    pub transfer: TransferPath,
}

#[derive(Debug)]
pub struct RoutePlanner {
    params: RendezvousParams,
    collector_radius_km: Kilometer,
    cache: RendezvousCache,
}

impl RoutePlanner {
    pub fn new(
        params: RendezvousParams,
        collector_radius_km: Kilometer,
        cache: RendezvousCache,
    ) -> Self {
        RoutePlanner {
            params,
            collector_radius_km,
            cache,
        }
    }

    pub fn rendezvous_params(&self) -> &RendezvousParams {
        &self.params
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Positions of `targets` at `epoch`; objects that fail to propagate are left out.
    pub fn snapshot<P: Propagator + ?Sized>(
        targets: &[&TrackedObject],
        epoch: Epoch,
        propagator: &P,
    ) -> Vec<RouteTarget> {
        targets
            .iter()
            .filter_map(|t| match position_at(&t.record, epoch, propagator) {
                Ok(position) => Some(RouteTarget {
                    id: t.id.clone(),
                    position,
                }),
                Err(err) => {
                    log::debug!("leaving {} out of the route: {err}", t.id);
                    None
                }
            })
            .collect()
    }

    /// Visiting order of `targets` from `start`, exact for small sets.
    pub fn plan_tour(start: &PositionVector, targets: &[RouteTarget]) -> RoutePlan {
        let comparison = compare_tours(start, targets);
        comparison.optimal.unwrap_or(comparison.nearest_neighbour)
    }

    pub fn compare(start: &PositionVector, targets: &[RouteTarget]) -> TourComparison {
        compare_tours(start, targets)
    }

    /// Rendezvous of `targets` starting at `start`, served from the cache when possible.
    ///
    /// `now` is the wall-clock instant used for cache expiry.
    pub fn rendezvous<P: Propagator + ?Sized>(
        &mut self,
        targets: &[&TrackedObject],
        start: Epoch,
        now: Instant,
        propagator: &P,
    ) -> Result<RendezvousSolution, SweeperError> {
        let ids: Vec<&str> = targets.iter().map(|t| t.id.as_str()).collect();
        let key = RendezvousKey::new(&ids, start, &self.params);

        if let Some(hit) = self.cache.get(&key, now) {
            log::debug!("rendezvous cache hit for {} targets", ids.len());
            return Ok(hit);
        }

        let solution = find_rendezvous(targets, start, &self.params, propagator)?;
        self.cache.insert(key, solution.clone(), now);
        Ok(solution)
    }

    /// Rendezvous of `targets` and the collector's transfer path from `collector` to it.
    pub fn plan_capture<P: Propagator + ?Sized>(
        &mut self,
        collector: &PositionVector,
        targets: &[&TrackedObject],
        start: Epoch,
        now: Instant,
        propagator: &P,
    ) -> Result<CapturePlan, SweeperError> {
        let rendezvous = self.rendezvous(targets, start, now, propagator)?;
        let time_available = seconds_between(start, rendezvous.epoch);
        let transfer = plan_transfer(
            collector,
            &rendezvous.centroid,
            time_available,
            self.collector_radius_km,
        )?;
        Ok(CapturePlan {
            rendezvous,
            transfer,
        })
    }
}

impl Default for RoutePlanner {
    fn default() -> Self {
        RoutePlanner::new(
            RendezvousParams::default(),
            transfer::DEFAULT_COLLECTOR_RADIUS_KM,
            RendezvousCache::default(),
        )
    }
}
