//! Generation-by-generation evolution of a grid

pub mod engine;
pub mod summary;

pub use engine::{EngineConfig, GenerationEngine, DEFAULT_GRID_SIZE};
pub use summary::GenerationSummary;
