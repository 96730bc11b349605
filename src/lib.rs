//! Life-like cellular automaton simulator
//!
//! The [`game_of_life`] module holds the engine: a fixed-size grid, a
//! survival/birth rule and a passive [`GameOfLife`] that front-ends step
//! until the field stabilises or a generation cap is reached.

pub mod config;
pub mod frontend;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use frontend::{Frontend, RunSummary};
pub use game_of_life::{GameOfLife, Grid, LifeConfig, LifeError, Rule};

use anyhow::{Context, Result};

/// Build the engine described by `settings`, loading the pattern file if one is set
pub fn build_engine(settings: &Settings) -> Result<GameOfLife> {
    let life = match &settings.input.pattern_file {
        Some(path) => {
            let grid = game_of_life::load_grid_from_file(path)?;
            let sim = &settings.simulation;
            GameOfLife::from_grid(
                grid,
                sim.rule.clone(),
                sim.boundary_condition,
                sim.max_generations,
            )
        }
        None => GameOfLife::new(settings.life_config()),
    };
    life.context("Failed to create simulation")
}
