//! Immutable world snapshots for the pathfinder task
//!
//! A snapshot is captured wholesale from the live map whenever fences,
//! gates, or structures change, and fully replaces the previous one inside
//! the pathfinder. It may go stale while a search is in flight; travelers
//! re-validate each step against live state before moving.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, EdgeRef, TileCoord};
use crate::world::map::WorldMap;
use crate::world::tile::Tile;
use crate::world::TileLookup;

/// Copied world state, immutable once handed to the pathfinder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    width: i32,
    height: i32,
    /// Row-major; `None` marks a hole in the grid
    tiles: Vec<Option<Tile>>,
    gates: AHashSet<EdgeRef>,
    failed_fences: AHashSet<EdgeRef>,
    /// Structure-occupied tiles; impassable except as a final destination
    blocked_tiles: AHashSet<TileCoord>,
}

impl WorldSnapshot {
    /// Capture the current state of the live map
    pub fn capture(map: &WorldMap) -> Self {
        let width = map.width();
        let height = map.height();
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(map.get_tile(x, y).copied());
            }
        }
        Self {
            width,
            height,
            tiles,
            gates: map.gates().clone(),
            failed_fences: map.failed_fences().clone(),
            blocked_tiles: map.structures().clone(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl TileLookup for WorldSnapshot {
    fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        if self.is_in_bounds(coord) {
            self.tiles[(coord.y * self.width + coord.x) as usize].as_ref()
        } else {
            None
        }
    }

    fn is_in_bounds(&self, coord: TileCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    fn has_gate(&self, coord: TileCoord, edge: Direction) -> bool {
        self.gates.contains(&EdgeRef::new(coord.x, coord.y, edge))
    }

    fn is_fence_failed(&self, coord: TileCoord, edge: Direction) -> bool {
        self.failed_fences
            .contains(&EdgeRef::new(coord.x, coord.y, edge))
    }

    fn is_structure_at(&self, coord: TileCoord) -> bool {
        self.blocked_tiles.contains(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tile::{FenceKind, TerrainKind};

    #[test]
    fn test_capture_copies_state() {
        let mut map = WorldMap::new(3, 3, Tile::new(TerrainKind::Grass));
        let edge = EdgeRef::new(1, 1, Direction::East);
        map.place_fence(edge, FenceKind::Wood);
        map.add_gate(edge);
        map.add_structure(TileCoord::new(2, 2));

        let snapshot = WorldSnapshot::capture(&map);

        assert!(snapshot
            .tile(TileCoord::new(1, 1))
            .unwrap()
            .has_fence(Direction::East));
        assert!(snapshot.has_gate(TileCoord::new(1, 1), Direction::East));
        assert!(snapshot.is_structure_at(TileCoord::new(2, 2)));
    }

    #[test]
    fn test_snapshot_is_decoupled_from_live_map() {
        let mut map = WorldMap::new(3, 3, Tile::new(TerrainKind::Grass));
        let snapshot = WorldSnapshot::capture(&map);

        // Mutations after capture must not leak into the snapshot
        map.place_fence(EdgeRef::new(0, 0, Direction::South), FenceKind::Iron);
        map.add_structure(TileCoord::new(1, 1));

        assert!(!snapshot
            .tile(TileCoord::new(0, 0))
            .unwrap()
            .has_fence(Direction::South));
        assert!(!snapshot.is_structure_at(TileCoord::new(1, 1)));
    }

    #[test]
    fn test_out_of_bounds_tile_is_none() {
        let map = WorldMap::new(2, 2, Tile::new(TerrainKind::Grass));
        let snapshot = WorldSnapshot::capture(&map);
        assert!(snapshot.tile(TileCoord::new(2, 0)).is_none());
        assert!(snapshot.tile(TileCoord::new(-1, 0)).is_none());
    }
}
