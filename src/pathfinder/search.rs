//! Bounded A* search over a tile lookup
//!
//! Works against whatever [`TileLookup`] it is handed; in production that
//! is always a [`WorldSnapshot`](crate::world::WorldSnapshot) held by the
//! engine. Search work is bounded by an iteration ceiling so a flooded
//! open set degrades to a failed route, never a stalled task.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::core::types::TileCoord;
use crate::movement::{is_step_blocked, is_valid_destination, is_walkable};
use crate::world::TileLookup;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct SearchNode {
    coord: TileCoord,
    f_cost: f32, // g_cost + heuristic
    g_cost: f32,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap. Ties on f go to the higher g (the
        // node nearer the goal), then coordinate order for determinism.
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                self.g_cost
                    .partial_cmp(&other.g_cost)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run a bounded A* search
///
/// Returns the steps from just after `start` through `end` inclusive, or
/// `None` when the destination is invalid, unreachable, or the iteration
/// ceiling is hit. `Some(vec![])` when `start == end`.
pub fn run_search<L: TileLookup>(
    lookup: &L,
    start: TileCoord,
    end: TileCoord,
    can_use_roads: bool,
    can_pass_gates: bool,
    iteration_limit: u32,
    road_cost_discount: f32,
) -> Option<Vec<TileCoord>> {
    if !is_valid_destination(lookup, end, can_use_roads) {
        return None;
    }
    if start == end {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<TileCoord, TileCoord> = AHashMap::new();
    let mut g_scores: AHashMap<TileCoord, f32> = AHashMap::new();
    let mut closed: AHashSet<TileCoord> = AHashSet::new();

    g_scores.insert(start, 0.0);
    open_set.push(SearchNode {
        coord: start,
        f_cost: start.manhattan_distance(&end) as f32,
        g_cost: 0.0,
    });

    let mut iterations = 0u32;
    while let Some(current) = open_set.pop() {
        // Stale heap entries from score improvements are skipped for free
        if closed.contains(&current.coord) {
            continue;
        }

        iterations += 1;
        if iterations > iteration_limit {
            tracing::debug!(?start, ?end, iteration_limit, "search hit iteration ceiling");
            return None;
        }

        if current.coord == end {
            return Some(reconstruct_steps(&came_from, start, current.coord));
        }

        closed.insert(current.coord);
        let current_g = *g_scores.get(&current.coord).unwrap_or(&f32::INFINITY);

        for neighbor in current.coord.neighbors() {
            if closed.contains(&neighbor) {
                continue;
            }

            // Transit tiles must be fully walkable; the destination itself
            // gets the looser check so a structure can end a route.
            let acceptable = if neighbor == end {
                is_valid_destination(lookup, neighbor, can_use_roads)
            } else {
                is_walkable(lookup, neighbor, can_use_roads)
            };
            if !acceptable {
                continue;
            }

            if is_step_blocked(lookup, current.coord, neighbor, can_pass_gates) {
                continue;
            }

            let on_road = lookup.tile(neighbor).is_some_and(|t| t.is_path);
            let step_cost = if on_road && can_use_roads {
                road_cost_discount
            } else {
                1.0
            };

            let tentative_g = current_g + step_cost;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(SearchNode {
                    coord: neighbor,
                    f_cost: tentative_g + neighbor.manhattan_distance(&end) as f32,
                    g_cost: tentative_g,
                });
            }
        }
    }

    None // Open set exhausted
}

/// Walk parent links back to the start; excludes start, includes the end
fn reconstruct_steps(
    came_from: &AHashMap<TileCoord, TileCoord>,
    start: TileCoord,
    mut current: TileCoord,
) -> Vec<TileCoord> {
    let mut steps = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        steps.push(prev);
        current = prev;
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Direction, EdgeRef};
    use crate::world::tile::{FenceKind, TerrainKind, Tile};
    use crate::world::{WorldMap, WorldSnapshot};

    fn snapshot_of(map: &WorldMap) -> WorldSnapshot {
        WorldSnapshot::capture(map)
    }

    fn open_map(w: i32, h: i32) -> WorldMap {
        WorldMap::new(w, h, Tile::new(TerrainKind::Grass))
    }

    fn search(
        snapshot: &WorldSnapshot,
        start: TileCoord,
        end: TileCoord,
        can_use_roads: bool,
        can_pass_gates: bool,
    ) -> Option<Vec<TileCoord>> {
        run_search(snapshot, start, end, can_use_roads, can_pass_gates, 1000, 0.5)
    }

    #[test]
    fn test_corridor_path() {
        // 10-tile corridor, no fences: 9 steps end to end
        let map = open_map(10, 1);
        let snapshot = snapshot_of(&map);

        let steps = search(
            &snapshot,
            TileCoord::new(0, 0),
            TileCoord::new(9, 0),
            false,
            false,
        )
        .expect("corridor should be reachable");

        assert_eq!(steps.len(), 9);
        assert_eq!(*steps.last().unwrap(), TileCoord::new(9, 0));
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(*step, TileCoord::new(i as i32 + 1, 0));
        }
    }

    #[test]
    fn test_start_equals_end() {
        let map = open_map(4, 4);
        let snapshot = snapshot_of(&map);
        let c = TileCoord::new(2, 2);
        assert_eq!(search(&snapshot, c, c, false, false), Some(vec![]));
    }

    #[test]
    fn test_steps_exclude_start() {
        let map = open_map(4, 4);
        let snapshot = snapshot_of(&map);
        let start = TileCoord::new(0, 0);
        let steps = search(&snapshot, start, TileCoord::new(2, 0), false, false).unwrap();
        assert!(!steps.contains(&start));
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_fenced_destination_unreachable() {
        let mut map = open_map(7, 7);
        // Wall the destination in on all four edges, no gate, no failure
        let dest = TileCoord::new(3, 3);
        for edge in Direction::ALL {
            map.place_fence(EdgeRef::new(dest.x, dest.y, edge), FenceKind::Iron);
        }
        let snapshot = snapshot_of(&map);

        assert_eq!(
            search(&snapshot, TileCoord::new(0, 0), dest, false, false),
            None
        );
    }

    #[test]
    fn test_gate_permission_opens_route() {
        let mut map = open_map(7, 7);
        let dest = TileCoord::new(3, 3);
        for edge in Direction::ALL {
            let e = EdgeRef::new(dest.x, dest.y, edge);
            map.place_fence(e, FenceKind::Iron);
        }
        map.add_gate(EdgeRef::new(3, 3, Direction::North));
        let snapshot = snapshot_of(&map);

        assert!(search(&snapshot, TileCoord::new(0, 0), dest, false, true).is_some());
        assert_eq!(
            search(&snapshot, TileCoord::new(0, 0), dest, false, false),
            None
        );
    }

    #[test]
    fn test_water_is_avoided() {
        let mut map = open_map(3, 3);
        // Water column splits the map except one land bridge at y=2
        map.get_tile_mut(1, 0).unwrap().terrain = TerrainKind::Water;
        map.get_tile_mut(1, 1).unwrap().terrain = TerrainKind::Water;
        let snapshot = snapshot_of(&map);

        let steps = search(
            &snapshot,
            TileCoord::new(0, 0),
            TileCoord::new(2, 0),
            false,
            false,
        )
        .expect("land bridge exists");
        assert!(!steps.contains(&TileCoord::new(1, 0)));
        assert!(!steps.contains(&TileCoord::new(1, 1)));
        assert!(steps.contains(&TileCoord::new(1, 2)));
    }

    #[test]
    fn test_water_destination_invalid() {
        let mut map = open_map(3, 3);
        map.get_tile_mut(2, 2).unwrap().terrain = TerrainKind::Water;
        let snapshot = snapshot_of(&map);
        assert_eq!(
            search(
                &snapshot,
                TileCoord::new(0, 0),
                TileCoord::new(2, 2),
                false,
                false
            ),
            None
        );
    }

    #[test]
    fn test_structure_only_as_destination() {
        let mut map = open_map(3, 1);
        map.add_structure(TileCoord::new(1, 0));
        map.add_structure(TileCoord::new(2, 0));
        let snapshot = snapshot_of(&map);

        // Structure at the end of the route is fine
        let steps = search(
            &snapshot,
            TileCoord::new(0, 0),
            TileCoord::new(1, 0),
            false,
            false,
        );
        assert!(steps.is_some());

        // But a structure cannot be crossed to reach a tile beyond it
        assert_eq!(
            search(
                &snapshot,
                TileCoord::new(0, 0),
                TileCoord::new(2, 0),
                false,
                false
            ),
            None
        );
    }

    #[test]
    fn test_road_discount_pulls_route_onto_path() {
        // 3 rows; middle row is walkway. Start and end on the walkway's
        // row ends; a road-permitted traveler should ride the walkway.
        let mut map = open_map(6, 3);
        for x in 0..6 {
            map.get_tile_mut(x, 1).unwrap().is_path = true;
        }
        let snapshot = snapshot_of(&map);

        let steps = search(
            &snapshot,
            TileCoord::new(0, 1),
            TileCoord::new(5, 1),
            true,
            false,
        )
        .unwrap();
        // Straight along the walkway: 5 steps at 0.5 each
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|c| c.y == 1));
    }

    #[test]
    fn test_roadless_traveler_cannot_use_walkway() {
        let mut map = open_map(3, 1);
        map.get_tile_mut(1, 0).unwrap().is_path = true;
        let snapshot = snapshot_of(&map);

        // The only route crosses a walkway tile; off-limits without roads
        assert_eq!(
            search(
                &snapshot,
                TileCoord::new(0, 0),
                TileCoord::new(2, 0),
                false,
                false
            ),
            None
        );
    }

    #[test]
    fn test_iteration_ceiling_bounds_work() {
        // Big open map, unreachable walled-in destination far away: the
        // ceiling must cut the search off.
        let mut map = open_map(60, 60);
        let dest = TileCoord::new(59, 59);
        for edge in Direction::ALL {
            map.place_fence(EdgeRef::new(dest.x, dest.y, edge), FenceKind::Iron);
        }
        let snapshot = snapshot_of(&map);

        let result = run_search(
            &snapshot,
            TileCoord::new(0, 0),
            dest,
            false,
            false,
            100,
            0.5,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_consecutive_steps_adjacent() {
        let mut map = open_map(8, 8);
        map.get_tile_mut(3, 3).unwrap().terrain = TerrainKind::Water;
        map.get_tile_mut(3, 4).unwrap().terrain = TerrainKind::Water;
        let snapshot = snapshot_of(&map);

        let start = TileCoord::new(0, 0);
        let steps = search(&snapshot, start, TileCoord::new(7, 7), false, false).unwrap();
        let mut prev = start;
        for step in &steps {
            assert_eq!(prev.manhattan_distance(step), 1);
            prev = *step;
        }
        assert_eq!(prev, TileCoord::new(7, 7));
    }
}
