//! Tile records: terrain, walkway flag, and the four fence slots

use serde::{Deserialize, Serialize};

use crate::core::types::Direction;

/// Ground cover of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Grass,
    Dirt,
    Sand,
    Water,
}

impl TerrainKind {
    /// Water is never walkable and never part of an enclosure interior
    pub fn is_water(&self) -> bool {
        matches!(self, TerrainKind::Water)
    }
}

/// Fence construction material
///
/// All kinds block movement equally; the kind matters for structural
/// failure rates and exhibit aesthetics, which are decided elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FenceKind {
    Wood,
    Chainlink,
    Iron,
}

/// The four independent fence slots of a tile
///
/// A fence on a shared boundary may be recorded on either or both of the
/// two adjoining tiles; the blocking rules tolerate asymmetric recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceSlots {
    pub north: Option<FenceKind>,
    pub south: Option<FenceKind>,
    pub east: Option<FenceKind>,
    pub west: Option<FenceKind>,
}

impl FenceSlots {
    pub fn get(&self, edge: Direction) -> Option<FenceKind> {
        match edge {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, edge: Direction, kind: Option<FenceKind>) {
        match edge {
            Direction::North => self.north = kind,
            Direction::South => self.south = kind,
            Direction::East => self.east = kind,
            Direction::West => self.west = kind,
        }
    }
}

/// Per-coordinate tile record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: TerrainKind,
    /// Walkway tile: discounted step cost for road-permitted travelers,
    /// off-limits to travelers without road permission
    pub is_path: bool,
    pub fences: FenceSlots,
}

impl Tile {
    pub fn new(terrain: TerrainKind) -> Self {
        Self {
            terrain,
            is_path: false,
            fences: FenceSlots::default(),
        }
    }

    pub fn has_fence(&self, edge: Direction) -> bool {
        self.fences.get(edge).is_some()
    }
}
