//! Wildhaven - Habitat Management Simulation
//!
//! The spatial movement & connectivity core: fence/gate-aware blocking
//! rules, an asynchronous snapshot-based A* pathfinder, and a flood-fill
//! enclosure detector that all share one definition of "blocked".

pub mod core;
pub mod enclosure;
pub mod movement;
pub mod pathfinder;
pub mod simulation;
pub mod world;
