//! Asynchronous grid pathfinder
//!
//! Bounded A* over snapshot state, isolated in its own task behind a
//! message protocol. See [`service::spawn_pathfinder`] for the entry
//! point and [`engine::PathfinderEngine`] for the synchronous core.

pub mod engine;
pub mod search;
pub mod service;

pub use engine::{PathRequest, PathResponse, PathfinderEngine};
pub use service::{spawn_pathfinder, PathfinderHandle};
