//! Core type definitions used throughout the codebase

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for traveler entities (guests, staff, animals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelerId(pub Uuid);

impl TravelerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TravelerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Correlation identifier for an in-flight path request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Issues unique request ids, safe under concurrent submission
#[derive(Debug, Default)]
pub struct RequestIdAllocator {
    next: AtomicU64,
}

impl RequestIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self) -> RequestId {
        RequestId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Grid tile coordinate (row-major grid, bounds-checked by the stores)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The adjacent coordinate across the given edge
    pub fn neighbor(&self, edge: Direction) -> Self {
        let (dx, dy) = edge.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four 4-adjacent coordinates, in [`Direction::ALL`] order
    pub fn neighbors(&self) -> [Self; 4] {
        [
            self.neighbor(Direction::North),
            self.neighbor(Direction::South),
            self.neighbor(Direction::East),
            self.neighbor(Direction::West),
        ]
    }
}

/// Compass-named edge of a grid tile
///
/// The compass convention is inherited from the tile store: north faces −x,
/// south faces +x, east faces −y, west faces +y. A step in +x therefore
/// leaves through the mover's south edge and enters through the neighbor's
/// north edge. Blocking rules and enclosure perimeter labeling both rely on
/// this table; they must never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Grid offset of a step leaving through this edge
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, -1),
            Direction::West => (0, 1),
        }
    }

    /// The matching edge on the far side of the boundary
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Identifies one edge of one tile (gate markers, failed fences, perimeters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub x: i32,
    pub y: i32,
    pub edge: Direction,
}

impl EdgeRef {
    pub fn new(x: i32, y: i32, edge: Direction) -> Self {
        Self { x, y, edge }
    }

    pub fn coord(&self) -> TileCoord {
        TileCoord::new(self.x, self.y)
    }

    /// The same physical boundary named from the neighboring tile
    pub fn mirrored(&self) -> EdgeRef {
        let other = self.coord().neighbor(self.edge);
        EdgeRef::new(other.x, other.y, self.edge.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets_match_edge_convention() {
        // +x step leaves through south, enters through north
        assert_eq!(Direction::South.offset(), (1, 0));
        assert_eq!(Direction::North.offset(), (-1, 0));
        // +y step leaves through west, enters through east
        assert_eq!(Direction::West.offset(), (0, 1));
        assert_eq!(Direction::East.offset(), (0, -1));
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_neighbor_round_trip() {
        let c = TileCoord::new(4, 7);
        for dir in Direction::ALL {
            assert_eq!(c.neighbor(dir).neighbor(dir.opposite()), c);
        }
    }

    #[test]
    fn test_manhattan_distance() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(3, -4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_edge_ref_mirrored() {
        let edge = EdgeRef::new(2, 3, Direction::South);
        let mirror = edge.mirrored();
        assert_eq!(mirror, EdgeRef::new(3, 3, Direction::North));
        assert_eq!(mirror.mirrored(), edge);
    }

    #[test]
    fn test_request_id_allocator_unique() {
        let alloc = RequestIdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_traveler_id_unique() {
        assert_ne!(TravelerId::new(), TravelerId::new());
    }
}
