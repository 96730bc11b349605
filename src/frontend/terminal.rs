//! Plain terminal renderer

use super::{Frontend, RunSummary};
use crate::game_of_life::GameOfLife;
use crate::utils::display::{GridFormatter, CLEAR_SCREEN};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// Draws every generation as text until the field stops changing.
///
/// Writes to any [`Write`] sink so the output can be captured.
pub struct TerminalFrontend<W: Write> {
    out: W,
    delay: Duration,
    clear_screen: bool,
    max_ticks: Option<usize>,
}

impl TerminalFrontend<Stdout> {
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self {
            out,
            delay,
            clear_screen: true,
            max_ticks: None,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<usize>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, life: &GameOfLife) -> Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        write!(self.out, "{}", GridFormatter::format_frame(life))?;
        self.out.flush().context("Failed to flush terminal output")
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn run(&mut self, life: &mut GameOfLife) -> Result<RunSummary> {
        info!(
            "terminal run on {}x{} field, {}ms per frame",
            life.rows(),
            life.cols(),
            self.delay.as_millis()
        );

        self.draw(life)?;

        let mut ticks = 0;
        while self.max_ticks.map_or(true, |max| ticks < max) && life.advance() {
            ticks += 1;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.draw(life)?;
        }

        let summary = RunSummary::from_engine(life);
        debug!("terminal run finished after {} ticks: {:?}", ticks, summary.outcome);
        writeln!(self.out, "{}", summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundaryCondition;
    use crate::frontend::Outcome;
    use crate::game_of_life::{Grid, Rule};

    fn life_from(values: Vec<Vec<u8>>, max_generations: Option<usize>) -> GameOfLife {
        let grid = Grid::from_values(values).unwrap();
        GameOfLife::from_grid(grid, Rule::conway(), BoundaryCondition::Dead, max_generations)
            .unwrap()
    }

    #[test]
    fn test_runs_until_stable() {
        // A lone pair dies out after one step
        let mut life = life_from(vec![vec![0, 0, 0], vec![0, 1, 1], vec![0, 0, 0]], None);
        let mut frontend = TerminalFrontend::new(Vec::new(), Duration::ZERO).with_clear_screen(false);

        let summary = frontend.run(&mut life).unwrap();
        assert_eq!(summary.outcome, Outcome::Stable);
        // Generation 2 is empty; generation 3 repeats it
        assert_eq!(summary.generations, 3);
        assert_eq!(summary.living_cells, 0);

        let output = String::from_utf8(frontend.into_inner()).unwrap();
        assert_eq!(output.matches("Generation ").count(), 3);
        assert!(output.ends_with("Total generations: 3\n"));
        assert!(!output.contains(CLEAR_SCREEN));
    }

    #[test]
    fn test_stops_at_generation_limit() {
        let mut life = life_from(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]], Some(4));
        let mut frontend = TerminalFrontend::new(Vec::new(), Duration::ZERO);

        let summary = frontend.run(&mut life).unwrap();
        assert_eq!(summary.outcome, Outcome::GenerationLimit);
        assert_eq!(summary.generations, 5);

        let output = String::from_utf8(frontend.into_inner()).unwrap();
        assert_eq!(output.matches(CLEAR_SCREEN).count(), 5);
    }

    #[test]
    fn test_tick_budget() {
        let mut life = life_from(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]], None);
        let mut frontend = TerminalFrontend::new(Vec::new(), Duration::ZERO).with_max_ticks(Some(2));

        let summary = frontend.run(&mut life).unwrap();
        assert_eq!(summary.outcome, Outcome::Stopped);
        assert_eq!(summary.generations, 3);
    }

    #[test]
    fn test_blank_field_draws_once() {
        let mut life = life_from(vec![vec![0; 4]; 4], None);
        let mut frontend = TerminalFrontend::new(Vec::new(), Duration::ZERO);

        let summary = frontend.run(&mut life).unwrap();
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.outcome, Outcome::Stable);
    }
}
