//! Traveler route consumption with live step re-validation
//!
//! Paths come from the pathfinder's snapshot and may be stale by the time
//! a traveler walks them. The safety net: before every single step, the
//! traveler re-checks that step against the live map's blocking rules and
//! throws the rest of the route away if the world closed it.

use std::collections::VecDeque;

use crate::core::types::{RequestId, RequestIdAllocator, TileCoord, TravelerId};
use crate::movement::is_step_blocked;
use crate::pathfinder::{PathRequest, PathResponse};
use crate::world::{TileLookup, WorldMap};

/// Result of one movement tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Stepped onto the next route tile
    Moved(TileCoord),
    /// No route to follow
    Idle,
    /// The live world closed the next step; route discarded
    RouteBlocked,
    /// Final route tile reached this tick
    Arrived(TileCoord),
}

/// A guest, staff member, or animal that moves tile to tile
#[derive(Debug)]
pub struct Traveler {
    pub id: TravelerId,
    pub position: TileCoord,
    pub can_use_roads: bool,
    pub can_pass_gates: bool,
    route: VecDeque<TileCoord>,
    pending_request: Option<RequestId>,
}

impl Traveler {
    pub fn new(position: TileCoord, can_use_roads: bool, can_pass_gates: bool) -> Self {
        Self {
            id: TravelerId::new(),
            position,
            can_use_roads,
            can_pass_gates,
            route: VecDeque::new(),
            pending_request: None,
        }
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn has_pending_request(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Build a path request toward `destination`
    ///
    /// At most one request may be in flight; returns `None` while one is
    /// pending so callers cannot double-submit.
    pub fn request_route(
        &mut self,
        destination: TileCoord,
        ids: &RequestIdAllocator,
    ) -> Option<PathRequest> {
        if self.pending_request.is_some() {
            return None;
        }
        let request_id = ids.allocate();
        self.pending_request = Some(request_id);
        Some(PathRequest {
            request_id,
            traveler_id: self.id,
            start: self.position,
            end: destination,
            can_use_roads: self.can_use_roads,
            can_pass_gates: self.can_pass_gates,
        })
    }

    /// Accept a path response; responses for superseded requests are
    /// ignored by correlation id
    pub fn accept_response(&mut self, response: &PathResponse) {
        if self.pending_request != Some(response.request_id) {
            tracing::trace!(
                traveler = ?self.id,
                request = ?response.request_id,
                "ignoring stale path response"
            );
            return;
        }
        self.pending_request = None;
        if response.success {
            self.route = response.steps.iter().copied().collect();
        }
    }

    /// Advance one step along the route, re-validating against live state
    pub fn advance(&mut self, map: &WorldMap) -> StepOutcome {
        let Some(&next) = self.route.front() else {
            return StepOutcome::Idle;
        };

        // The snapshot the route came from may predate a new fence; only
        // the live map has the final say on this step.
        let step_ok = map.tile(next).is_some()
            && !is_step_blocked(map, self.position, next, self.can_pass_gates);
        if !step_ok {
            tracing::debug!(traveler = ?self.id, ?next, "route invalidated mid-walk");
            self.route.clear();
            return StepOutcome::RouteBlocked;
        }

        self.route.pop_front();
        self.position = next;
        if self.route.is_empty() {
            StepOutcome::Arrived(next)
        } else {
            StepOutcome::Moved(next)
        }
    }
}
