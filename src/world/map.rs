//! Live tile store owned by the simulation thread
//!
//! Holds the authoritative grid plus the gate, failed-fence, and structure
//! sets. The pathfinder never touches this directly; it works from
//! [`WorldSnapshot`](crate::world::snapshot::WorldSnapshot) copies. The
//! enclosure detector and traveler step re-validation query it live.

use ahash::AHashSet;

use crate::core::types::{Direction, EdgeRef, TileCoord};
use crate::world::tile::{FenceKind, Tile};
use crate::world::TileLookup;

/// Authoritative world grid (row-major, bounds-checked)
#[derive(Debug, Clone)]
pub struct WorldMap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    gates: AHashSet<EdgeRef>,
    failed_fences: AHashSet<EdgeRef>,
    structures: AHashSet<TileCoord>,
}

impl WorldMap {
    /// Create a map of the given size, filled with the given base tile
    pub fn new(width: i32, height: i32, base: Tile) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            tiles: vec![base; (width * height) as usize],
            gates: AHashSet::new(),
            failed_fences: AHashSet::new(),
            structures: AHashSet::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    /// Record a fence on one tile's edge slot
    ///
    /// Recording is single-sided; the blocking rules check both sides of a
    /// boundary, so an asymmetric record still blocks.
    pub fn place_fence(&mut self, edge: EdgeRef, kind: FenceKind) -> bool {
        match self.get_tile_mut(edge.x, edge.y) {
            Some(tile) => {
                tile.fences.set(edge.edge, Some(kind));
                true
            }
            None => false,
        }
    }

    pub fn remove_fence(&mut self, edge: EdgeRef) {
        if let Some(tile) = self.get_tile_mut(edge.x, edge.y) {
            tile.fences.set(edge.edge, None);
        }
        self.gates.remove(&edge);
        self.failed_fences.remove(&edge);
    }

    /// Mark a fenced edge as a gate
    pub fn add_gate(&mut self, edge: EdgeRef) {
        self.gates.insert(edge);
    }

    pub fn remove_gate(&mut self, edge: EdgeRef) {
        self.gates.remove(&edge);
    }

    /// Flag a fence as structurally failed
    pub fn mark_fence_failed(&mut self, edge: EdgeRef) {
        self.failed_fences.insert(edge);
    }

    pub fn repair_fence(&mut self, edge: EdgeRef) {
        self.failed_fences.remove(&edge);
    }

    /// Mark a tile as occupied by a structure (shelter, feeder, kiosk)
    pub fn add_structure(&mut self, coord: TileCoord) {
        self.structures.insert(coord);
    }

    pub fn remove_structure(&mut self, coord: TileCoord) {
        self.structures.remove(&coord);
    }

    pub fn gates(&self) -> &AHashSet<EdgeRef> {
        &self.gates
    }

    pub fn failed_fences(&self) -> &AHashSet<EdgeRef> {
        &self.failed_fences
    }

    pub fn structures(&self) -> &AHashSet<TileCoord> {
        &self.structures
    }
}

impl TileLookup for WorldMap {
    fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.get_tile(coord.x, coord.y)
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
        self.structures.contains(&coord)
    }
}
