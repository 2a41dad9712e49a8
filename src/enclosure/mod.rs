//! Enclosure detection and region bookkeeping

pub mod detector;
pub mod regions;

pub use detector::{detect_enclosure, EnclosureResult};
pub use regions::{RegionId, RegionLedger, RegionRecord};
