//! Configuration settings for the life simulator

use crate::game_of_life::{LifeConfig, Rule};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub randomize: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rule: Rule,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub max_generations: Option<usize>,
}

/// How the field behaves at its edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// Cells past the edge do not exist
    #[default]
    Dead,
    /// Opposite edges are joined (torus)
    Wrap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Starting pattern; overrides `rows`, `cols` and `randomize`
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frontend: FrontendKind,
    pub delay_ms: u64,
    pub clear_screen: bool,
    /// Stop after this many steps even if the field is still changing
    pub max_ticks: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontendKind {
    Terminal,
    Headless,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub report_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 80,
                cols: 80,
                randomize: false,
                seed: None,
                rule: Rule::conway(),
                boundary_condition: BoundaryCondition::Dead,
                max_generations: None,
            },
            input: InputConfig::default(),
            display: DisplayConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frontend: FrontendKind::Terminal,
            delay_ms: 100,
            clear_screen: true,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;

        match &self.input.pattern_file {
            Some(pattern) => {
                if !pattern.exists() {
                    anyhow::bail!("Pattern file does not exist: {}", pattern.display());
                }
            }
            None => {
                if sim.rows == 0 || sim.cols == 0 {
                    anyhow::bail!(
                        "Grid dimensions must be positive, got {}x{}",
                        sim.rows,
                        sim.cols
                    );
                }
            }
        }

        if sim.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be at least 1");
        }

        if self.display.max_ticks == Some(0) {
            anyhow::bail!("Maximum ticks must be positive");
        }

        Ok(())
    }

    /// Engine parameters for a freshly generated field
    pub fn life_config(&self) -> LifeConfig {
        let sim = &self.simulation;
        LifeConfig {
            rows: sim.rows,
            cols: sim.cols,
            randomize: sim.randomize,
            seed: sim.seed,
            rule: sim.rule.clone(),
            boundary_condition: sim.boundary_condition,
            max_generations: sim.max_generations,
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        let sim = &mut self.simulation;
        if let Some(rows) = cli_overrides.rows {
            sim.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            sim.cols = cols;
        }
        if cli_overrides.randomize {
            sim.randomize = true;
        }
        if let Some(seed) = cli_overrides.seed {
            sim.seed = Some(seed);
        }
        if let Some(ref rule) = cli_overrides.rule {
            sim.rule = rule.clone();
        }
        if cli_overrides.wrap {
            sim.boundary_condition = BoundaryCondition::Wrap;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            sim.max_generations = Some(max_generations);
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
        if let Some(delay_ms) = cli_overrides.delay_ms {
            self.display.delay_ms = delay_ms;
        }
        if let Some(max_ticks) = cli_overrides.max_ticks {
            self.display.max_ticks = Some(max_ticks);
        }
        if cli_overrides.headless {
            self.display.frontend = FrontendKind::Headless;
        }
        if let Some(ref report_file) = cli_overrides.report_file {
            self.output.report_file = Some(report_file.clone());
            if report_file.extension().is_some_and(|ext| ext == "json") {
                self.output.format = OutputFormat::Json;
            }
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub randomize: bool,
    pub seed: Option<u64>,
    pub rule: Option<Rule>,
    pub wrap: bool,
    pub max_generations: Option<usize>,
    pub pattern_file: Option<PathBuf>,
    pub delay_ms: Option<u64>,
    pub max_ticks: Option<usize>,
    pub headless: bool,
    pub report_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());

        let config = settings.life_config();
        assert_eq!((config.rows, config.cols), (80, 80));
        assert!(!config.randomize);
        assert!(config.rule.is_conway());
        assert_eq!(config.boundary_condition, BoundaryCondition::Dead);
    }

    #[test]
    fn test_validation_errors() {
        let mut settings = Settings::default();
        settings.simulation.rows = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.max_generations = Some(0);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/life.yaml");

        let mut settings = Settings::default();
        settings.simulation.rule = "B36/S23".parse().unwrap();
        settings.simulation.boundary_condition = BoundaryCondition::Wrap;
        settings.simulation.max_generations = Some(250);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = "simulation:\n  rows: 10\n  cols: 20\n  randomize: false\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert!(settings.simulation.rule.is_conway());
        assert_eq!(settings.simulation.boundary_condition, BoundaryCondition::Dead);
        assert_eq!(settings.display.frontend, FrontendKind::Terminal);
        assert_eq!(settings.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let yaml = "simulation:\n  rows: 10\n  cols: 20\n  randomize: false\n\
                    display:\n  delay_ms: 50\n\
                    output:\n  report_file: run.json\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.display.delay_ms, 50);
        assert_eq!(settings.display.frontend, FrontendKind::Terminal);
        assert!(settings.display.clear_screen);
        assert_eq!(settings.display.max_ticks, None);
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert_eq!(settings.output.report_file, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_randomize_flag_opts_in() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides::default());
        assert!(!settings.simulation.randomize);

        settings.merge_with_cli(&CliOverrides {
            randomize: true,
            ..Default::default()
        });
        assert!(settings.simulation.randomize);
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            rows: Some(12),
            seed: Some(9),
            rule: Some(Rule::from_digits("23", "36").unwrap()),
            wrap: true,
            max_generations: Some(40),
            headless: true,
            report_file: Some(PathBuf::from("out/report.json")),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.simulation.rows, 12);
        assert_eq!(settings.simulation.cols, 80);
        assert_eq!(settings.simulation.seed, Some(9));
        assert!(settings.simulation.rule.is_born(6));
        assert_eq!(settings.simulation.boundary_condition, BoundaryCondition::Wrap);
        assert_eq!(settings.simulation.max_generations, Some(40));
        assert_eq!(settings.display.frontend, FrontendKind::Headless);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }
}
