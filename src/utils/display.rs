//! Display and output formatting utilities

use crate::game_of_life::{GameOfLife, Grid};

/// ANSI sequence that clears the screen and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Format grids for terminal output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() * 3 + 1));
        for row in grid.iter_rows() {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.cols() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for (y, row) in grid.iter_rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format a grid inside a border, `*` for live cells
    pub fn format_grid_bordered(grid: &Grid) -> String {
        let edge = format!("+{}+\n", "-".repeat(grid.cols()));
        let mut output = edge.clone();
        for row in grid.iter_rows() {
            output.push('|');
            output.extend(row.iter().map(|&cell| if cell { '*' } else { ' ' }));
            output.push_str("|\n");
        }
        output.push_str(&edge);
        output
    }

    /// One terminal frame: a status line followed by the current generation
    pub fn format_frame(life: &GameOfLife) -> String {
        let grid = life.curr_generation();
        let mut output = format!(
            "Generation {} | live cells: {} | {}\n",
            life.generation_count(),
            grid.living_count(),
            life.rule()
        );
        output.push_str(&Self::format_grid_bordered(grid));
        output
    }

    /// Population statistics for a grid
    pub fn format_statistics(grid: &Grid) -> String {
        let total = grid.rows() * grid.cols();
        format!(
            "Grid Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            grid.rows(),
            grid.cols(),
            grid.living_count(),
            grid.living_count() as f64 / total as f64 * 100.0
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
