//! Deterministic demo habitat generation
//!
//! Seeds a small habitat for the interactive shell: a walkway spine, a
//! pond, scattered dirt, a fenced starter pen with a gate, and a shelter.
//! Same seed, same habitat.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Direction, EdgeRef, TileCoord};
use crate::world::tile::{FenceKind, TerrainKind, Tile};
use crate::world::WorldMap;

/// Fraction of tiles turned to dirt scatter
const DIRT_DENSITY: f64 = 0.08;

/// Generate a demo habitat map
pub fn generate_habitat(width: i32, height: i32, seed: u64) -> WorldMap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = WorldMap::new(width, height, Tile::new(TerrainKind::Grass));

    // Dirt scatter
    for y in 0..height {
        for x in 0..width {
            if rng.gen_bool(DIRT_DENSITY) {
                map.get_tile_mut(x, y).unwrap().terrain = TerrainKind::Dirt;
            }
        }
    }

    // Small pond away from the walkway spine
    let pond_x = width / 6;
    let pond_y = height * 2 / 3;
    for x in pond_x..(pond_x + 2).min(width) {
        for y in pond_y..(pond_y + 2).min(height) {
            map.get_tile_mut(x, y).unwrap().terrain = TerrainKind::Water;
        }
    }

    // Walkway spine down the middle row
    let spine = height / 2;
    for x in 0..width {
        let tile = map.get_tile_mut(x, spine).unwrap();
        tile.terrain = TerrainKind::Dirt;
        tile.is_path = true;
    }

    // Fenced starter pen south of the spine, with a gate on its north wall
    if width >= 8 && height >= 6 {
        let (x0, y0) = (width / 2, 1);
        let (x1, y1) = (width / 2 + 2, 3);
        for y in y0..=y1 {
            map.place_fence(EdgeRef::new(x0, y, Direction::North), FenceKind::Wood);
            map.place_fence(EdgeRef::new(x1, y, Direction::South), FenceKind::Wood);
        }
        for x in x0..=x1 {
            map.place_fence(EdgeRef::new(x, y0, Direction::East), FenceKind::Wood);
            map.place_fence(EdgeRef::new(x, y1, Direction::West), FenceKind::Wood);
        }
        let gate = EdgeRef::new(x0, (y0 + y1) / 2, Direction::North);
        map.add_gate(gate);

        // Shelter in the pen corner
        map.add_structure(TileCoord::new(x1, y1));
    }

    map
}
