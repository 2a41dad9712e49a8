//! Synchronous pathfinder engine: one snapshot, bounded searches
//!
//! The engine is plain single-threaded state. The asynchronous face of
//! the pathfinder lives in [`service`](crate::pathfinder::service), which
//! owns an engine inside its task.

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::types::{RequestId, TileCoord, TravelerId};
use crate::pathfinder::search::run_search;
use crate::world::WorldSnapshot;

/// A traveler's request for a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    pub request_id: RequestId,
    pub traveler_id: TravelerId,
    pub start: TileCoord,
    pub end: TileCoord,
    pub can_use_roads: bool,
    pub can_pass_gates: bool,
}

/// The answer to a [`PathRequest`], correlated by `request_id`
///
/// `steps` excludes the start tile and includes the destination. Every
/// failure mode (uninitialized engine, invalid destination, exhausted or
/// ceiling-cut search) reports the same way: `success=false`, no steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub request_id: RequestId,
    pub traveler_id: TravelerId,
    pub steps: Vec<TileCoord>,
    pub success: bool,
}

impl PathResponse {
    fn failure(request: &PathRequest) -> Self {
        Self {
            request_id: request.request_id,
            traveler_id: request.traveler_id,
            steps: Vec::new(),
            success: false,
        }
    }
}

/// Snapshot-holding search engine
#[derive(Debug)]
pub struct PathfinderEngine {
    snapshot: Option<WorldSnapshot>,
    config: EngineConfig,
}

impl PathfinderEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            snapshot: None,
            config,
        }
    }

    /// Store the first snapshot; searches are refused until this runs
    pub fn initialize(&mut self, snapshot: WorldSnapshot) {
        tracing::info!(
            width = snapshot.width(),
            height = snapshot.height(),
            "pathfinder initialized"
        );
        self.snapshot = Some(snapshot);
    }

    /// Swap in a fresh snapshot wholesale
    ///
    /// Searches submitted after this use the new state; there is no
    /// incremental patching and no restart of anything in flight.
    pub fn replace_snapshot(&mut self, snapshot: WorldSnapshot) {
        tracing::debug!("pathfinder snapshot replaced");
        self.snapshot = Some(snapshot);
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Run one search against the held snapshot
    pub fn find_path(&self, request: &PathRequest) -> PathResponse {
        let Some(snapshot) = &self.snapshot else {
            tracing::debug!(?request.request_id, "search refused: no snapshot");
            return PathResponse::failure(request);
        };

        match run_search(
            snapshot,
            request.start,
            request.end,
            request.can_use_roads,
            request.can_pass_gates,
            self.config.search_iteration_limit,
            self.config.road_cost_discount,
        ) {
            Some(steps) => {
                tracing::trace!(
                    ?request.request_id,
                    steps = steps.len(),
                    "search succeeded"
                );
                PathResponse {
                    request_id: request.request_id,
                    traveler_id: request.traveler_id,
                    steps,
                    success: true,
                }
            }
            None => PathResponse::failure(request),
        }
    }

    /// Run a batch of independent searches; response order mirrors
    /// request order, and one failed request never affects the rest
    pub fn find_path_batch(&self, requests: &[PathRequest]) -> Vec<PathResponse> {
        requests.iter().map(|r| self.find_path(r)).collect()
    }
}
