//! Movement blocking rules for fence, gate, and failed-fence edges
//!
//! One pure predicate decides whether a directed step between adjacent
//! tiles is obstructed. The pathfinder evaluates it against a snapshot;
//! the enclosure detector and traveler step re-validation evaluate it
//! against the live map. Both go through [`TileLookup`], so the two
//! contexts can never disagree on what "blocked" means.

use crate::core::types::{Direction, TileCoord};
use crate::world::TileLookup;

/// Edge identities of the boundary crossed by a step from `from` to `to`
///
/// Returns `(from_edge, to_edge)`, or `None` when the coordinates are not
/// 4-adjacent. The table matches the enclosure detector's perimeter
/// labeling: +x crosses {south, north}, −x {north, south}, +y {west,
/// east}, −y {east, west}.
pub fn edge_between(from: TileCoord, to: TileCoord) -> Option<(Direction, Direction)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let from_edge = match (dx, dy) {
        (1, 0) => Direction::South,
        (-1, 0) => Direction::North,
        (0, 1) => Direction::West,
        (0, -1) => Direction::East,
        _ => return None,
    };
    Some((from_edge, from_edge.opposite()))
}

/// Whether the step from `from` to `to` is obstructed
///
/// Valid only for 4-adjacent coordinates; a non-adjacent pair reports
/// blocked. Callers are responsible for checking that both tiles exist —
/// a missing tile is treated as blocked at the call sites, not here.
///
/// Rules, in order:
/// 1. no fence recorded on either side of the boundary: open
/// 2. gate marker on either side and the traveler has gate permission: open
/// 3. every fenced side is marked failed: open (structural breach,
///    passable even without gate permission, e.g. escaping animals)
/// 4. otherwise: blocked
pub fn is_step_blocked<L: TileLookup>(
    lookup: &L,
    from: TileCoord,
    to: TileCoord,
    can_pass_gates: bool,
) -> bool {
    let Some((from_edge, to_edge)) = edge_between(from, to) else {
        return true;
    };

    let from_fence = lookup.tile(from).is_some_and(|t| t.has_fence(from_edge));
    let to_fence = lookup.tile(to).is_some_and(|t| t.has_fence(to_edge));

    if !from_fence && !to_fence {
        return false;
    }

    if can_pass_gates && (lookup.has_gate(from, from_edge) || lookup.has_gate(to, to_edge)) {
        return false;
    }

    // A one-sided failure is not enough: every side that records a fence
    // must be failed for the boundary to open.
    let from_open = !from_fence || lookup.is_fence_failed(from, from_edge);
    let to_open = !to_fence || lookup.is_fence_failed(to, to_edge);
    if from_open && to_open {
        return false;
    }

    true
}

/// Whether a tile can be passed through mid-route
///
/// Requires the tile to exist, be dry land, obey the traveler's road
/// permission, and be free of structures. Fence obstruction is a separate
/// question answered by [`is_step_blocked`].
pub fn is_walkable<L: TileLookup>(lookup: &L, coord: TileCoord, can_use_roads: bool) -> bool {
    let Some(tile) = lookup.tile(coord) else {
        return false;
    };
    if tile.terrain.is_water() {
        return false;
    }
    if tile.is_path && !can_use_roads {
        return false;
    }
    !lookup.is_structure_at(coord)
}

/// Whether a tile is acceptable as a route's final destination
///
/// Looser than [`is_walkable`]: a structure tile is fine as the last stop
/// (a shelter entrance, a feeder), just never as a way through.
pub fn is_valid_destination<L: TileLookup>(
    lookup: &L,
    coord: TileCoord,
    can_use_roads: bool,
) -> bool {
    let Some(tile) = lookup.tile(coord) else {
        return false;
    };
    if tile.terrain.is_water() {
        return false;
    }
    if tile.is_path && !can_use_roads {
        return false;
    }
    true
}
