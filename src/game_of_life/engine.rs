//! Generation-by-generation simulation engine

use super::error::{LifeError, LifeResult};
use super::{Grid, Rule};
use crate::config::BoundaryCondition;
use itertools::iproduct;
use log::{debug, trace};
use rayon::prelude::*;
use std::fmt;

/// Parameters for building a [`GameOfLife`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    pub randomize: bool,
    /// Only used when `randomize` is set; `None` means a fresh random field every run
    pub seed: Option<u64>,
    pub rule: Rule,
    pub boundary_condition: BoundaryCondition,
    pub max_generations: Option<usize>,
}

impl LifeConfig {
    /// Blank field with Conway's rule on bounded edges
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            randomize: false,
            seed: None,
            rule: Rule::conway(),
            boundary_condition: BoundaryCondition::Dead,
            max_generations: None,
        }
    }
}

/// Conway's Game of Life (and other life-like rules) on a finite grid.
///
/// The engine is passive: a front-end polls [`is_changing`](Self::is_changing)
/// and [`is_max_generations_exceeded`](Self::is_max_generations_exceeded),
/// calls [`step`](Self::step) while the simulation is active and reads
/// [`curr_generation`](Self::curr_generation) to draw it.
#[derive(Debug, Clone)]
pub struct GameOfLife {
    rows: usize,
    cols: usize,
    prev_generation: Grid,
    curr_generation: Grid,
    rule: Rule,
    boundary_condition: BoundaryCondition,
    generation_count: usize,
    max_generations: Option<usize>,
}

impl GameOfLife {
    pub fn new(config: LifeConfig) -> LifeResult<Self> {
        let curr_generation = if config.randomize {
            Grid::random(config.rows, config.cols, config.seed)?
        } else {
            Grid::new(config.rows, config.cols)?
        };
        Self::from_grid(
            curr_generation,
            config.rule,
            config.boundary_condition,
            config.max_generations,
        )
    }

    /// Start from an existing pattern; the previous generation is all dead
    pub fn from_grid(
        grid: Grid,
        rule: Rule,
        boundary_condition: BoundaryCondition,
        max_generations: Option<usize>,
    ) -> LifeResult<Self> {
        if let Some(max) = max_generations {
            if max < 1 {
                return Err(LifeError::InvalidMaxGenerations(max));
            }
        }

        let (rows, cols) = (grid.rows(), grid.cols());
        debug!(
            "new {}x{} field, rule {}, {:?} edges, {} live cells",
            rows,
            cols,
            rule,
            boundary_condition,
            grid.living_count()
        );

        Ok(Self {
            rows,
            cols,
            prev_generation: Grid::new(rows, cols)?,
            curr_generation: grid,
            rule,
            boundary_condition,
            generation_count: 1,
            max_generations,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn generation_count(&self) -> usize {
        self.generation_count
    }

    pub fn max_generations(&self) -> Option<usize> {
        self.max_generations
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.boundary_condition
    }

    pub fn wrap_edges(&self) -> bool {
        self.boundary_condition == BoundaryCondition::Wrap
    }

    pub fn curr_generation(&self) -> &Grid {
        &self.curr_generation
    }

    pub fn prev_generation(&self) -> &Grid {
        &self.prev_generation
    }

    /// Set a cell of the current generation (manual editing)
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        self.curr_generation.set(row, col, alive)
    }

    /// Flip a cell of the current generation and return its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        self.curr_generation.toggle(row, col)
    }

    /// Count living neighbors of a cell in the current generation
    pub fn count_neighbours(&self, row: usize, col: usize) -> LifeResult<u8> {
        // Reject out-of-range cells before looking around them
        self.curr_generation.get(row, col)?;
        Ok(self.neighbours_of(row, col))
    }

    fn neighbours_of(&self, row: usize, col: usize) -> u8 {
        let grid = &self.curr_generation;
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .map(|(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;
                match self.boundary_condition {
                    BoundaryCondition::Wrap => grid.get_wrapped(r, c),
                    BoundaryCondition::Dead => grid.get_bounded(r, c).unwrap_or(false),
                }
            })
            .filter(|&alive| alive)
            .count() as u8
    }

    /// Compute the generation that follows the current one.
    ///
    /// Reads only the current generation, so every cell sees its neighbors
    /// as they were before the transition.
    pub fn compute_next_generation(&self) -> Grid {
        let current = &self.curr_generation;
        let cells: Vec<bool> = (0..self.rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..self.cols).map(move |col| {
                    self.rule
                        .next_state(current.cell(row, col), self.neighbours_of(row, col))
                })
            })
            .collect();

        Grid::from_raw(self.rows, self.cols, cells)
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let next = self.compute_next_generation();
        self.prev_generation = std::mem::replace(&mut self.curr_generation, next);
        self.generation_count += 1;
        trace!(
            "generation {}: {} live cells",
            self.generation_count,
            self.curr_generation.living_count()
        );
    }

    /// Whether the current generation differs from the previous one
    pub fn is_changing(&self) -> bool {
        self.prev_generation != self.curr_generation
    }

    pub fn is_max_generations_exceeded(&self) -> bool {
        self.max_generations
            .is_some_and(|max| self.generation_count > max)
    }

    /// Whether a front-end should keep stepping
    pub fn is_active(&self) -> bool {
        self.is_changing() && !self.is_max_generations_exceeded()
    }

    /// Step if the simulation is still active; returns whether a step happened
    pub fn advance(&mut self) -> bool {
        if self.is_active() {
            self.step();
            true
        } else {
            false
        }
    }
}

impl fmt::Display for GameOfLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.curr_generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn life_from(values: Vec<Vec<u8>>, boundary_condition: BoundaryCondition) -> GameOfLife {
        let grid = Grid::from_values(values).unwrap();
        GameOfLife::from_grid(grid, Rule::conway(), boundary_condition, None).unwrap()
    }

    fn glider_5x5() -> Vec<Vec<u8>> {
        vec![
            vec![0, 1, 0, 0, 0],
            vec![0, 0, 1, 0, 0],
            vec![1, 1, 1, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ]
    }

    #[test]
    fn test_construction_validates() {
        assert!(matches!(
            GameOfLife::new(LifeConfig::new(0, 5)),
            Err(LifeError::InvalidDimensions { .. })
        ));

        let mut config = LifeConfig::new(5, 5);
        config.max_generations = Some(0);
        assert_eq!(
            GameOfLife::new(config).unwrap_err(),
            LifeError::InvalidMaxGenerations(0)
        );
    }

    #[test]
    fn test_initial_state() {
        let life = GameOfLife::new(LifeConfig::new(4, 6)).unwrap();
        assert_eq!(life.rows(), 4);
        assert_eq!(life.cols(), 6);
        assert_eq!(life.generation_count(), 1);
        assert!(life.prev_generation().is_empty());
        assert!(life.curr_generation().is_empty());
        assert!(!life.wrap_edges());
    }

    #[test]
    fn test_randomized_start_is_changing() {
        let mut config = LifeConfig::new(10, 10);
        config.randomize = true;
        config.seed = Some(7);
        let life = GameOfLife::new(config.clone()).unwrap();

        assert!(!life.curr_generation().is_empty());
        assert!(life.is_changing());
        assert_eq!(
            life.curr_generation(),
            GameOfLife::new(config).unwrap().curr_generation()
        );
    }

    #[test]
    fn test_neighbour_counts_bounded_edges() {
        let life = life_from(vec![vec![1; 3]; 3], BoundaryCondition::Dead);
        assert_eq!(life.count_neighbours(0, 0), Ok(3));
        assert_eq!(life.count_neighbours(0, 1), Ok(5));
        assert_eq!(life.count_neighbours(1, 1), Ok(8));
        assert_eq!(life.count_neighbours(2, 2), Ok(3));
        assert!(matches!(
            life.count_neighbours(3, 0),
            Err(LifeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_neighbour_counts_wrapped_edges() {
        let mut values = vec![vec![0; 4]; 4];
        values[3][3] = 1;
        values[0][3] = 1;
        values[3][0] = 1;
        let life = life_from(values, BoundaryCondition::Wrap);

        // All three sit diagonally/orthogonally across the corner
        assert_eq!(life.count_neighbours(0, 0), Ok(3));
        assert_eq!(life.count_neighbours(1, 1), Ok(0));

        let full = life_from(vec![vec![1; 4]; 4], BoundaryCondition::Wrap);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(full.count_neighbours(row, col), Ok(8));
            }
        }
    }

    #[test]
    fn test_single_cell_torus_counts_itself() {
        let life = life_from(vec![vec![1]], BoundaryCondition::Wrap);
        assert_eq!(life.count_neighbours(0, 0), Ok(8));
    }

    #[test]
    fn test_blinker_oscillates() {
        let start = vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]];
        let mut life = life_from(start.clone(), BoundaryCondition::Dead);

        life.step();
        let vertical = Grid::from_values(vec![vec![0, 1, 0]; 3]).unwrap();
        assert_eq!(life.curr_generation(), &vertical);
        assert!(life.is_changing());

        life.step();
        assert_eq!(life.curr_generation(), &Grid::from_values(start).unwrap());
        assert_eq!(life.prev_generation(), &vertical);
        assert_eq!(life.generation_count(), 3);
    }

    #[test]
    fn test_still_life_block_stabilises() {
        let block = vec![
            vec![0, 0, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 0, 0],
        ];
        let mut life = life_from(block, BoundaryCondition::Dead);
        assert!(life.is_changing());

        life.step();
        assert!(!life.is_changing());
        assert_eq!(life.curr_generation().living_count(), 4);
    }

    #[test]
    fn test_empty_field_stays_empty() {
        let mut life = GameOfLife::new(LifeConfig::new(6, 6)).unwrap();
        assert!(!life.is_changing());

        for _ in 0..5 {
            life.step();
            assert!(life.curr_generation().is_empty());
            assert!(!life.is_changing());
        }
        assert_eq!(life.generation_count(), 6);
    }

    #[test]
    fn test_glider_on_torus() {
        let start = Grid::from_values(glider_5x5()).unwrap();
        let mut life = GameOfLife::from_grid(
            start.clone(),
            Rule::conway(),
            BoundaryCondition::Wrap,
            None,
        )
        .unwrap();

        for _ in 0..4 {
            life.step();
            assert_eq!(life.curr_generation().living_count(), 5);
        }

        // One cell down and one to the right
        let mut shifted = Grid::new(5, 5).unwrap();
        for (row, col) in start.living_cells() {
            shifted.set((row + 1) % 5, (col + 1) % 5, true).unwrap();
        }
        assert_eq!(life.curr_generation(), &shifted);

        for _ in 0..16 {
            life.step();
        }
        assert_eq!(life.curr_generation(), &start);
        assert_eq!(life.generation_count(), 21);
    }

    #[test]
    fn test_generalised_rule() {
        // B1/S: every dead cell next to a live one is born, live cells die
        let grid = Grid::from_values(vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        let mut life =
            GameOfLife::from_grid(grid, Rule::new(Vec::new(), [1]), BoundaryCondition::Dead, None)
                .unwrap();
        life.step();

        let ring = Grid::from_values(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(life.curr_generation(), &ring);
    }

    #[test]
    fn test_next_generation_does_not_mutate() {
        let life = life_from(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]], BoundaryCondition::Dead);
        let before = life.curr_generation().clone();
        let next = life.compute_next_generation();

        assert_eq!(life.curr_generation(), &before);
        assert_ne!(next, before);
        assert_eq!((next.rows(), next.cols()), (3, 3));
        assert_eq!(life.generation_count(), 1);
    }

    #[test]
    fn test_max_generations_gate() {
        let grid = Grid::from_values(vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]).unwrap();
        let mut life =
            GameOfLife::from_grid(grid, Rule::conway(), BoundaryCondition::Dead, Some(3)).unwrap();

        let mut steps = 0;
        while life.advance() {
            steps += 1;
            assert_eq!(life.is_max_generations_exceeded(), life.generation_count() > 3);
        }

        assert_eq!(steps, 3);
        assert_eq!(life.generation_count(), 4);
        assert!(life.is_max_generations_exceeded());
        assert!(!life.is_active());
    }

    #[test]
    fn test_manual_toggle() {
        let mut life = GameOfLife::new(LifeConfig::new(3, 3)).unwrap();
        assert!(!life.is_changing());

        assert_eq!(life.toggle_cell(1, 1), Ok(true));
        assert!(life.is_changing());
        life.set_cell(1, 1, false).unwrap();
        assert!(!life.is_changing());

        assert!(life.toggle_cell(3, 3).is_err());
    }
}
