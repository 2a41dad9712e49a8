//! World state: tiles, the live map, and pathfinder snapshots

pub mod map;
pub mod snapshot;
pub mod tile;

pub use map::WorldMap;
pub use snapshot::WorldSnapshot;
pub use tile::{FenceKind, FenceSlots, TerrainKind, Tile};

use crate::core::types::{Direction, TileCoord};

/// Read access to tile, gate, failed-fence, and structure state
///
/// The one seam shared by the blocking rules, the pathfinder, and the
/// enclosure detector. Implemented by the live [`WorldMap`] and by the
/// immutable [`WorldSnapshot`], so the same rules run against either.
pub trait TileLookup {
    fn tile(&self, coord: TileCoord) -> Option<&Tile>;

    fn is_in_bounds(&self, coord: TileCoord) -> bool;

    /// Gate marker on this tile's edge (passable with gate permission)
    fn has_gate(&self, coord: TileCoord, edge: Direction) -> bool;

    /// Structural-failure marker on this tile's edge
    fn is_fence_failed(&self, coord: TileCoord, edge: Direction) -> bool;

    /// Structure-occupied tile (impassable except as a final destination)
    fn is_structure_at(&self, coord: TileCoord) -> bool;
}
