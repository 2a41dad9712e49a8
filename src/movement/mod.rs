//! Movement rules shared by the pathfinder and the enclosure detector

pub mod blocking;

pub use blocking::{edge_between, is_step_blocked, is_valid_destination, is_walkable};
