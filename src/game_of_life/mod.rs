//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{GameOfLife, LifeConfig};
pub use error::{LifeError, LifeResult};
pub use grid::Grid;
pub use io::{create_example_grids, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use rules::Rule;
