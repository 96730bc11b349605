//! Shared helpers for the CLI and front-ends

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter};
