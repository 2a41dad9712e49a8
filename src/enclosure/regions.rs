//! Ledger of registered enclosed regions
//!
//! Owns the claimed-tile map the detector consults when picking seeds.
//! Exhibit bookkeeping proper (species assignment, ratings) lives outside
//! this subsystem; the ledger only answers "whose region is this tile in".

use ahash::{AHashMap, AHashSet};

use crate::core::types::{EdgeRef, TileCoord};
use crate::enclosure::detector::EnclosureResult;

/// Identifier for a registered region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

/// A registered region's tiles and fence line
#[derive(Debug, Clone)]
pub struct RegionRecord {
    pub interior_tiles: AHashSet<TileCoord>,
    pub perimeter_edges: Vec<EdgeRef>,
}

/// Claimed-tile bookkeeping for enclosed regions
#[derive(Debug, Default)]
pub struct RegionLedger {
    next_id: u32,
    claimed: AHashMap<TileCoord, RegionId>,
    regions: AHashMap<RegionId, RegionRecord>,
}

impl RegionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tile already belongs to a registered region
    pub fn is_claimed(&self, coord: TileCoord) -> bool {
        self.claimed.contains_key(&coord)
    }

    pub fn region_at(&self, coord: TileCoord) -> Option<RegionId> {
        self.claimed.get(&coord).copied()
    }

    pub fn region(&self, id: RegionId) -> Option<&RegionRecord> {
        self.regions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Register a detected enclosure, claiming its interior tiles
    ///
    /// Returns `None` for a not-enclosed result.
    pub fn register(&mut self, result: &EnclosureResult) -> Option<RegionId> {
        if !result.enclosed {
            return None;
        }

        let id = RegionId(self.next_id);
        self.next_id += 1;

        for coord in &result.interior_tiles {
            self.claimed.insert(*coord, id);
        }
        self.regions.insert(
            id,
            RegionRecord {
                interior_tiles: result.interior_tiles.clone(),
                perimeter_edges: result.perimeter_edges.clone(),
            },
        );

        tracing::info!(
            region = id.0,
            tiles = result.interior_tiles.len(),
            "region registered"
        );
        Some(id)
    }

    /// Drop a region and release its tiles
    pub fn release(&mut self, id: RegionId) {
        if let Some(record) = self.regions.remove(&id) {
            for coord in record.interior_tiles {
                self.claimed.remove(&coord);
            }
        }
    }
}
