//! Batch runner without any drawing

use super::{Frontend, RunReport, RunSummary};
use crate::game_of_life::GameOfLife;
use anyhow::Result;
use log::info;

/// Steps as fast as possible and records the population of every generation
#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    max_ticks: Option<usize>,
    population_history: Vec<usize>,
}

impl HeadlessFrontend {
    pub fn new(max_ticks: Option<usize>) -> Self {
        Self {
            max_ticks,
            population_history: Vec::new(),
        }
    }

    pub fn population_history(&self) -> &[usize] {
        &self.population_history
    }

    /// Report for the run that just finished on `life`
    pub fn report(&self, life: &GameOfLife, summary: RunSummary) -> RunReport {
        RunReport::new(life, summary).with_population_history(self.population_history.clone())
    }
}

impl Frontend for HeadlessFrontend {
    fn run(&mut self, life: &mut GameOfLife) -> Result<RunSummary> {
        self.population_history.clear();
        self.population_history.push(life.curr_generation().living_count());

        let mut ticks = 0;
        while self.max_ticks.map_or(true, |max| ticks < max) && life.advance() {
            ticks += 1;
            self.population_history.push(life.curr_generation().living_count());
        }

        let summary = RunSummary::from_engine(life);
        info!(
            "headless run finished at generation {} ({:?}, {} live cells)",
            summary.generations, summary.outcome, summary.living_cells
        );
        Ok(summary)
    }
}
