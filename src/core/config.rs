//! Engine configuration with documented constants
//!
//! All tuning knobs for the movement and connectivity engine live here,
//! with explanations of their purpose and failure behavior.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{HavenError, Result};

/// Configuration for the movement & connectivity engine
///
/// The ceilings exist to bound worst-case work per request; hitting one
/// degrades silently to a negative result, never an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === PATHFINDER ===
    /// Maximum open-set expansions per search
    ///
    /// A search that pops this many nodes without reaching its destination
    /// reports failure. Indistinguishable from exhaustion on the caller's
    /// side. At 1000 expansions a search covers roughly a 30x30 area of
    /// open ground, plenty for habitat-scale routing.
    pub search_iteration_limit: u32,

    /// Step cost onto a walkway tile for road-permitted travelers
    ///
    /// Plain steps cost 1.0. Guests and staff get this discount on walkway
    /// tiles, pulling their routes onto paths without ever forbidding
    /// off-path movement. Cost only; never affects blocking.
    pub road_cost_discount: f32,

    // === ENCLOSURE DETECTOR ===
    /// Maximum interior tile count before a flood fill gives up
    ///
    /// A fill that grows past this many tiles is treated as open terrain
    /// and reported not-enclosed. Prevents runaway fills when a fence is
    /// placed in the middle of an open habitat.
    pub enclosure_tile_limit: usize,

    // === SERVICE ===
    /// Command channel capacity for the pathfinder task
    ///
    /// Submissions beyond this depth apply backpressure to callers rather
    /// than growing without bound.
    pub service_queue_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_iteration_limit: 1000,
            road_cost_discount: 0.5,
            enclosure_tile_limit: 500,
            service_queue_depth: 64,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file, falling back to defaults for
    /// missing keys
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config
            .validate()
            .map_err(HavenError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.search_iteration_limit == 0 {
            return Err("search_iteration_limit must be positive".into());
        }

        if !(self.road_cost_discount > 0.0 && self.road_cost_discount <= 1.0) {
            return Err(format!(
                "road_cost_discount ({}) must be in (0, 1]",
                self.road_cost_discount
            ));
        }

        if self.enclosure_tile_limit == 0 {
            return Err("enclosure_tile_limit must be positive".into());
        }

        if self.service_queue_depth == 0 {
            return Err("service_queue_depth must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}
