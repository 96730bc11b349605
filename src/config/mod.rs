//! Configuration management for the life simulator

pub mod settings;

pub use settings::{
    BoundaryCondition, CliOverrides, DisplayConfig, FrontendKind, InputConfig, OutputConfig,
    OutputFormat, Settings, SimulationConfig,
};
