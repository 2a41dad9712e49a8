//! Wildhaven - Entry Point
//!
//! Interactive shell around the movement & connectivity engine: generate
//! a demo habitat, spawn the pathfinder task, place fences, and request
//! routes from the command line.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;

use wildhaven::core::config::{set_config, EngineConfig};
use wildhaven::core::error::Result;
use wildhaven::core::types::{Direction, EdgeRef, RequestIdAllocator, TileCoord, TravelerId};
use wildhaven::enclosure::{detect_enclosure, RegionLedger};
use wildhaven::pathfinder::{spawn_pathfinder, PathRequest};
use wildhaven::simulation::generate_habitat;
use wildhaven::world::{FenceKind, WorldSnapshot};

/// Wildhaven habitat shell
#[derive(Parser, Debug)]
#[command(name = "wildhaven")]
#[command(about = "Habitat management simulation - movement engine shell")]
struct Args {
    /// Map width in tiles
    #[arg(long, default_value_t = 24)]
    width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = 18)]
    height: i32,

    /// Random seed for the demo habitat
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional engine config TOML
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("wildhaven=debug")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_toml_file(path)?,
        None => EngineConfig::new(),
    };
    let _ = set_config(config.clone());

    tracing::info!(width = args.width, height = args.height, seed = args.seed,
        "Wildhaven starting...");

    let mut map = generate_habitat(args.width, args.height, args.seed);
    let mut ledger = RegionLedger::new();
    let ids = RequestIdAllocator::new();

    // The pathfinder lives on the async runtime; everything it sees is a
    // snapshot pushed from here.
    let rt = Runtime::new()?;
    let pathfinder = {
        let _guard = rt.enter();
        spawn_pathfinder(config)
    };
    rt.block_on(pathfinder.init(WorldSnapshot::capture(&map)))?;

    println!("\n=== WILDHAVEN ===");
    println!("Movement & connectivity engine shell");
    println!();
    println!("Commands:");
    println!("  path <x1> <y1> <x2> <y2> [roads] [gates]  - Request a route");
    println!("  fence <x> <y> <n|s|e|w>                   - Place a fence edge");
    println!("  gate <x> <y> <n|s|e|w>                    - Mark a gate");
    println!("  fail <x> <y> <n|s|e|w>                    - Fail a fence");
    println!("  regions                                   - List registered regions");
    println!("  quit / q                                  - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["quit"] | ["q"] => break,
            ["path", x1, y1, x2, y2, rest @ ..] => {
                let Some(((x1, y1), (x2, y2))) = parse_pair(x1, y1).zip(parse_pair(x2, y2))
                else {
                    println!("path: coordinates must be integers");
                    continue;
                };
                let request = PathRequest {
                    request_id: ids.allocate(),
                    traveler_id: TravelerId::new(),
                    start: TileCoord::new(x1, y1),
                    end: TileCoord::new(x2, y2),
                    can_use_roads: rest.contains(&"roads"),
                    can_pass_gates: rest.contains(&"gates"),
                };
                let response = rt.block_on(pathfinder.find_path(request))?;
                println!("{}", serde_json::to_string(&response)?);
            }
            ["fence", x, y, dir] => {
                let Some(edge) = parse_edge(x, y, dir) else {
                    println!("fence: usage fence <x> <y> <n|s|e|w>");
                    continue;
                };
                if !map.place_fence(edge, FenceKind::Wood) {
                    println!("fence: out of bounds");
                    continue;
                }
                // Enclosure is decided synchronously, in the same "tick"
                // as the placement, against live state.
                let result = detect_enclosure(&map, edge, &ledger, wildhaven::core::config::config());
                if let Some(id) = ledger.register(&result) {
                    println!(
                        "enclosed region {} ({} tiles, {} perimeter edges)",
                        id.0,
                        result.interior_tiles.len(),
                        result.perimeter_edges.len()
                    );
                } else {
                    println!("fence placed, no enclosure");
                }
                rt.block_on(pathfinder.update_snapshot(WorldSnapshot::capture(&map)))?;
            }
            ["gate", x, y, dir] => {
                let Some(edge) = parse_edge(x, y, dir) else {
                    println!("gate: usage gate <x> <y> <n|s|e|w>");
                    continue;
                };
                map.add_gate(edge);
                rt.block_on(pathfinder.update_snapshot(WorldSnapshot::capture(&map)))?;
                println!("gate marked");
            }
            ["fail", x, y, dir] => {
                let Some(edge) = parse_edge(x, y, dir) else {
                    println!("fail: usage fail <x> <y> <n|s|e|w>");
                    continue;
                };
                map.mark_fence_failed(edge);
                rt.block_on(pathfinder.update_snapshot(WorldSnapshot::capture(&map)))?;
                println!("fence failed");
            }
            ["regions"] => {
                println!("{} registered region(s)", ledger.len());
            }
            _ => println!("unknown command"),
        }
    }

    tracing::info!("Wildhaven shutting down");
    Ok(())
}

fn parse_pair(x: &str, y: &str) -> Option<(i32, i32)> {
    Some((x.parse().ok()?, y.parse().ok()?))
}

fn parse_edge(x: &str, y: &str, dir: &str) -> Option<EdgeRef> {
    let (x, y) = parse_pair(x, y)?;
    let edge = match dir {
        "n" => Direction::North,
        "s" => Direction::South,
        "e" => Direction::East,
        "w" => Direction::West,
        _ => return None,
    };
    Some(EdgeRef::new(x, y, edge))
}
