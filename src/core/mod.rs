pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use types::{Direction, EdgeRef, RequestId, RequestIdAllocator, TileCoord, TravelerId};
