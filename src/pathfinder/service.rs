//! Asynchronous pathfinder service
//!
//! The engine runs inside its own tokio task with no shared mutable state;
//! everything crosses the boundary as owned messages. Searches therefore
//! run against potentially stale snapshots, which is why travelers
//! re-validate each step against the live map before moving.

use tokio::sync::{mpsc, oneshot};

use crate::core::config::EngineConfig;
use crate::core::error::{HavenError, Result};
use crate::pathfinder::engine::{PathRequest, PathResponse, PathfinderEngine};
use crate::world::WorldSnapshot;

/// Messages accepted by the pathfinder task
#[derive(Debug)]
enum PathfinderCommand {
    Init {
        snapshot: WorldSnapshot,
        ready: oneshot::Sender<()>,
    },
    UpdateSnapshot {
        snapshot: WorldSnapshot,
    },
    FindPath {
        request: PathRequest,
        reply: oneshot::Sender<PathResponse>,
    },
    FindPathBatch {
        requests: Vec<PathRequest>,
        reply: oneshot::Sender<Vec<PathResponse>>,
    },
}

/// Cloneable handle for talking to the pathfinder task
#[derive(Debug, Clone)]
pub struct PathfinderHandle {
    tx: mpsc::Sender<PathfinderCommand>,
}

impl PathfinderHandle {
    /// Hand the task its first snapshot and wait for readiness
    pub async fn init(&self, snapshot: WorldSnapshot) -> Result<()> {
        let (ready_tx, ready_rx) = oneshot::channel();
        self.send(PathfinderCommand::Init {
            snapshot,
            ready: ready_tx,
        })
        .await?;
        ready_rx
            .await
            .map_err(|_| HavenError::ServiceUnavailable("task dropped readiness ack".into()))
    }

    /// Push a fresh snapshot, fire-and-forget
    pub async fn update_snapshot(&self, snapshot: WorldSnapshot) -> Result<()> {
        self.send(PathfinderCommand::UpdateSnapshot { snapshot }).await
    }

    /// Submit one request and await its response
    pub async fn find_path(&self, request: PathRequest) -> Result<PathResponse> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(PathfinderCommand::FindPath {
            request,
            reply: reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| HavenError::ServiceUnavailable("task dropped reply".into()))
    }

    /// Submit a batch; responses come back in submission order
    pub async fn find_path_batch(&self, requests: Vec<PathRequest>) -> Result<Vec<PathResponse>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(PathfinderCommand::FindPathBatch {
            requests,
            reply: reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| HavenError::ServiceUnavailable("task dropped reply".into()))
    }

    async fn send(&self, command: PathfinderCommand) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| HavenError::ServiceUnavailable("pathfinder task stopped".into()))
    }
}

/// Spawn the pathfinder task and return a handle to it
///
/// The task runs until every handle is dropped.
pub fn spawn_pathfinder(config: EngineConfig) -> PathfinderHandle {
    let (tx, rx) = mpsc::channel(config.service_queue_depth);
    tokio::spawn(run_pathfinder(PathfinderEngine::new(config), rx));
    PathfinderHandle { tx }
}

async fn run_pathfinder(
    mut engine: PathfinderEngine,
    mut rx: mpsc::Receiver<PathfinderCommand>,
) {
    tracing::info!("pathfinder task started");
    while let Some(command) = rx.recv().await {
        match command {
            PathfinderCommand::Init { snapshot, ready } => {
                engine.initialize(snapshot);
                // A closed ready channel just means the caller moved on
                let _ = ready.send(());
            }
            PathfinderCommand::UpdateSnapshot { snapshot } => {
                engine.replace_snapshot(snapshot);
            }
            PathfinderCommand::FindPath { request, reply } => {
                let response = engine.find_path(&request);
                let _ = reply.send(response);
            }
            PathfinderCommand::FindPathBatch { requests, reply } => {
                let responses = engine.find_path_batch(&requests);
                let _ = reply.send(responses);
            }
        }
    }
    tracing::info!("pathfinder task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RequestIdAllocator, TileCoord, TravelerId};
    use crate::world::tile::{TerrainKind, Tile};
    use crate::world::WorldMap;

    fn request(ids: &RequestIdAllocator, end: (i32, i32)) -> PathRequest {
        PathRequest {
            request_id: ids.allocate(),
            traveler_id: TravelerId::new(),
            start: TileCoord::new(0, 0),
            end: TileCoord::new(end.0, end.1),
            can_use_roads: false,
            can_pass_gates: false,
        }
    }

    #[tokio::test]
    async fn test_init_then_find() {
        let map = WorldMap::new(5, 5, Tile::new(TerrainKind::Grass));
        let handle = spawn_pathfinder(EngineConfig::default());
        handle.init(WorldSnapshot::capture(&map)).await.unwrap();

        let ids = RequestIdAllocator::new();
        let response = handle.find_path(request(&ids, (4, 4))).await.unwrap();
        assert!(response.success);
        assert_eq!(*response.steps.last().unwrap(), TileCoord::new(4, 4));
    }

    #[tokio::test]
    async fn test_search_before_init_fails_cleanly() {
        let handle = spawn_pathfinder(EngineConfig::default());
        let ids = RequestIdAllocator::new();

        let response = handle.find_path(request(&ids, (2, 2))).await.unwrap();
        assert!(!response.success);
        assert!(response.steps.is_empty());
    }

    #[tokio::test]
    async fn test_batch_order_preserved() {
        let map = WorldMap::new(5, 5, Tile::new(TerrainKind::Grass));
        let handle = spawn_pathfinder(EngineConfig::default());
        handle.init(WorldSnapshot::capture(&map)).await.unwrap();

        let ids = RequestIdAllocator::new();
        let requests = vec![
            request(&ids, (1, 0)),
            request(&ids, (2, 3)),
            request(&ids, (4, 4)),
        ];
        let expected: Vec<_> = requests.iter().map(|r| r.request_id).collect();

        let responses = handle.find_path_batch(requests).await.unwrap();
        let got: Vec<_> = responses.iter().map(|r| r.request_id).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn test_update_snapshot_applies_to_later_searches() {
        let mut map = WorldMap::new(3, 1, Tile::new(TerrainKind::Grass));
        let handle = spawn_pathfinder(EngineConfig::default());
        handle.init(WorldSnapshot::capture(&map)).await.unwrap();

        let ids = RequestIdAllocator::new();
        assert!(handle.find_path(request(&ids, (2, 0))).await.unwrap().success);

        map.get_tile_mut(1, 0).unwrap().terrain = TerrainKind::Water;
        handle
            .update_snapshot(WorldSnapshot::capture(&map))
            .await
            .unwrap();

        assert!(!handle.find_path(request(&ids, (2, 0))).await.unwrap().success);
    }
}
