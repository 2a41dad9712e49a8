//! Simulation-side glue: travelers and demo world generation

pub mod travelers;
pub mod worldgen;

pub use travelers::{StepOutcome, Traveler};
pub use worldgen::generate_habitat;
