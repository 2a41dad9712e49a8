//! Enclosure detection via flood fill
//!
//! Runs synchronously on the simulation thread against live map state,
//! immediately after a fence edge is placed; exhibit registration has to
//! be decided within the same tick. Reuses the movement blocking rules
//! with gate permission off: a gate seals a region structurally even
//! though permitted travelers can walk through it.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::config::EngineConfig;
use crate::core::types::{Direction, EdgeRef, TileCoord};
use crate::enclosure::regions::RegionLedger;
use crate::movement::is_step_blocked;
use crate::world::{TileLookup, WorldMap};

/// Outcome of an enclosure check
///
/// Not-enclosed is reported identically whether the fill reached the grid
/// boundary, outgrew the tile ceiling, or found no usable seed.
#[derive(Debug, Clone, Default)]
pub struct EnclosureResult {
    pub enclosed: bool,
    pub interior_tiles: AHashSet<TileCoord>,
    pub perimeter_edges: Vec<EdgeRef>,
}

impl EnclosureResult {
    fn not_enclosed() -> Self {
        Self::default()
    }
}

/// Check whether placing a fence at `edge` sealed a region
///
/// Both tiles adjacent to the new edge are tried as flood-fill seeds, the
/// placed-on tile first; a seed already claimed by a registered region,
/// out of bounds, or on water is skipped. The first seed that yields a
/// bounded region wins.
pub fn detect_enclosure(
    map: &WorldMap,
    edge: EdgeRef,
    ledger: &RegionLedger,
    config: &EngineConfig,
) -> EnclosureResult {
    let seeds = [edge.coord(), edge.coord().neighbor(edge.edge)];

    for seed in seeds {
        if ledger.is_claimed(seed) {
            continue;
        }
        if !map.is_in_bounds(seed) {
            continue;
        }
        if map.tile(seed).is_none_or(|t| t.terrain.is_water()) {
            continue;
        }

        if let Some((interior, perimeter)) = flood_fill(map, seed, config.enclosure_tile_limit) {
            tracing::debug!(
                seed = ?seed,
                interior = interior.len(),
                perimeter = perimeter.len(),
                "enclosure detected"
            );
            return EnclosureResult {
                enclosed: true,
                interior_tiles: interior,
                perimeter_edges: perimeter,
            };
        }
    }

    EnclosureResult::not_enclosed()
}

/// Breadth-first fill from `seed`, stopping at blocked edges
///
/// Returns the interior tile set and perimeter edge list, or `None` when
/// the fill escapes the grid or exceeds `tile_limit`. Water tiles are
/// skipped without being interior and without ending the fill.
fn flood_fill(
    map: &WorldMap,
    seed: TileCoord,
    tile_limit: usize,
) -> Option<(AHashSet<TileCoord>, Vec<EdgeRef>)> {
    let mut interior: AHashSet<TileCoord> = AHashSet::new();
    let mut visited: AHashSet<TileCoord> = AHashSet::new();
    let mut perimeter: Vec<EdgeRef> = Vec::new();
    let mut queue: VecDeque<TileCoord> = VecDeque::new();

    interior.insert(seed);
    visited.insert(seed);
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = current.neighbor(dir);

            if is_step_blocked(map, current, next, false) {
                // The blocked step's edge belongs to the tile we are
                // expanding from; same labeling the pathfinder uses.
                perimeter.push(EdgeRef::new(current.x, current.y, dir));
                continue;
            }

            if visited.contains(&next) {
                continue;
            }
            visited.insert(next);

            if !map.is_in_bounds(next) {
                // Open passage off the grid: the region is unbounded
                tracing::trace!(seed = ?seed, "flood fill reached grid boundary");
                return None;
            }

            let Some(tile) = map.tile(next) else {
                return None;
            };
            if tile.terrain.is_water() {
                continue;
            }

            interior.insert(next);
            if interior.len() > tile_limit {
                tracing::debug!(seed = ?seed, tile_limit, "flood fill exceeded tile ceiling");
                return None;
            }
            queue.push_back(next);
        }
    }

    if interior.is_empty() {
        return None;
    }
    Some((interior, perimeter))
}
