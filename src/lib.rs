//! Ageing Game of Life
//!
//! This library simulates Conway-style cellular automata on a bounded grid,
//! including an ageing variant in which cells carry a vitality that decays
//! instead of dying outright.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Grid, RuleModel};
pub use simulation::{GenerationEngine, GenerationSummary};

use anyhow::{Context, Result};

/// Build an engine from settings, loading the initial grid file if one is configured
pub fn build_engine(settings: &Settings) -> Result<GenerationEngine> {
    let initial = settings
        .input
        .initial_state_file
        .as_ref()
        .map(|path| game_of_life::load_grid_from_file(path))
        .transpose()?;

    GenerationEngine::new(
        &settings.simulation.rule,
        initial,
        &settings.simulation.engine_config(),
    )
    .context("Failed to create generation engine")
}
