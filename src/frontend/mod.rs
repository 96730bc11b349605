//! Front-ends that drive a [`GameOfLife`] to completion

pub mod headless;
pub mod terminal;

pub use headless::HeadlessFrontend;
pub use terminal::TerminalFrontend;

use crate::config::OutputFormat;
use crate::game_of_life::{io::grid_to_string, GameOfLife};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Anything that can run a simulation until it stops
pub trait Frontend {
    fn run(&mut self, life: &mut GameOfLife) -> Result<RunSummary>;
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The last step left the field unchanged
    Stable,
    /// The configured generation cap was passed
    GenerationLimit,
    /// The front-end stopped on its own while the field was still changing
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub generations: usize,
    pub living_cells: usize,
    pub outcome: Outcome,
}

impl RunSummary {
    pub fn from_engine(life: &GameOfLife) -> Self {
        let outcome = if life.is_max_generations_exceeded() {
            Outcome::GenerationLimit
        } else if !life.is_changing() {
            Outcome::Stable
        } else {
            Outcome::Stopped
        };

        Self {
            generations: life.generation_count(),
            living_cells: life.curr_generation().living_count(),
            outcome,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total generations: {}", self.generations)
    }
}

/// Everything worth keeping from a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub rule: String,
    pub rows: usize,
    pub cols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_history: Option<Vec<usize>>,
    pub final_grid: Vec<String>,
}

impl RunReport {
    pub fn new(life: &GameOfLife, summary: RunSummary) -> Self {
        Self {
            summary,
            rule: life.rule().to_string(),
            rows: life.rows(),
            cols: life.cols(),
            population_history: None,
            final_grid: grid_to_string(life.curr_generation())
                .lines()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn with_population_history(mut self, history: Vec<usize>) -> Self {
        self.population_history = Some(history);
        self
    }

    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.summary));
        output.push_str(&format!("Outcome: {:?}\n", self.summary.outcome));
        output.push_str(&format!("Rule: {}\n", self.rule));
        output.push_str(&format!("Size: {}x{}\n", self.rows, self.cols));
        output.push_str(&format!("Living cells: {}\n", self.summary.living_cells));
        if let Some(history) = &self.population_history {
            let counts: Vec<String> = history.iter().map(usize::to_string).collect();
            output.push_str(&format!("Population: {}\n", counts.join(" ")));
        }
        output.push_str("Final generation:\n");
        for line in &self.final_grid {
            output.push_str(line);
            output.push('\n');
        }
        output
    }

    /// Write the report in the requested format
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        let content = match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize run report")?
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        Ok(())
    }
}
