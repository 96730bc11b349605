//! Command line front-end for the life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    build_engine,
    config::{BoundaryCondition, CliOverrides, FrontendKind, Settings},
    frontend::{Frontend, HeadlessFrontend, RunReport, TerminalFrontend},
    game_of_life::{create_example_grids, load_grid_from_file, Rule},
    utils::{ColorOutput, GridFormatter},
};
use log::info;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Conway's Game of Life and other life-like automata")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of rows
        #[arg(long)]
        rows: Option<usize>,

        /// Number of columns
        #[arg(long)]
        cols: Option<usize>,

        /// Fill the field randomly
        #[arg(short, long)]
        randomize: bool,

        /// Seed for the random fill
        #[arg(long)]
        seed: Option<u64>,

        /// Neighbor counts that keep a live cell alive, as digits
        #[arg(short = 'S', long, requires = "birth", conflicts_with = "rule")]
        survival: Option<String>,

        /// Neighbor counts that bring a dead cell to life, as digits
        #[arg(short = 'B', long, requires = "survival", conflicts_with = "rule")]
        birth: Option<String>,

        /// Rule in B/S notation, e.g. B36/S23
        #[arg(long)]
        rule: Option<Rule>,

        /// Join opposite edges of the field
        #[arg(short, long)]
        wrap: bool,

        /// Stop once this generation has been passed
        #[arg(short, long)]
        max_generations: Option<usize>,

        /// Starting pattern file (rows of 0 and 1)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Delay between frames in milliseconds
        #[arg(short, long)]
        delay_ms: Option<u64>,

        /// Stop after this many steps
        #[arg(long)]
        max_ticks: Option<usize>,

        /// Run without drawing
        #[arg(long)]
        headless: bool,

        /// Write a run report (JSON if the extension is .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show a pattern file
    Show {
        /// Pattern file path
        pattern: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_logging(verbose);

    match cli.command {
        Commands::Run {
            config,
            rows,
            cols,
            randomize,
            seed,
            survival,
            birth,
            rule,
            wrap,
            max_generations,
            pattern,
            delay_ms,
            max_ticks,
            headless,
            output,
            verbose,
        } => {
            let rule = match (survival, birth) {
                (Some(s), Some(b)) => Some(Rule::from_digits(&s, &b)?),
                _ => rule,
            };
            let overrides = CliOverrides {
                rows,
                cols,
                randomize,
                seed,
                rule,
                wrap,
                max_generations,
                pattern_file: pattern,
                delay_ms,
                max_ticks,
                headless,
                report_file: output,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { pattern } => show_command(pattern),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    if verbose {
        let sim = &settings.simulation;
        println!("Configuration:");
        println!("  Size: {}x{}", sim.rows, sim.cols);
        println!("  Rule: {}", sim.rule);
        println!("  Edges: {:?}", sim.boundary_condition);
        println!("  Max generations: {:?}", sim.max_generations);
        println!("  Front-end: {:?}", settings.display.frontend);
        println!();
    }

    let mut life = build_engine(&settings)?;
    if verbose && settings.display.frontend == FrontendKind::Headless {
        println!("Initial field:");
        println!("{}", GridFormatter::format_grid_compact(life.curr_generation()));
    }
    let start_time = Instant::now();

    let (summary, report) = match settings.display.frontend {
        FrontendKind::Terminal => {
            let mut frontend =
                TerminalFrontend::stdout(Duration::from_millis(settings.display.delay_ms))
                    .with_clear_screen(settings.display.clear_screen)
                    .with_max_ticks(settings.display.max_ticks);
            let summary = frontend.run(&mut life)?;
            (summary.clone(), RunReport::new(&life, summary))
        }
        FrontendKind::Headless => {
            let mut frontend = HeadlessFrontend::new(settings.display.max_ticks);
            let summary = frontend.run(&mut life)?;
            println!("{}", summary);
            (summary.clone(), frontend.report(&life, summary))
        }
    };

    info!(
        "simulation ended with {:?} in {:.3}s",
        summary.outcome,
        start_time.elapsed().as_secs_f64()
    );

    if let Some(path) = &settings.output.report_file {
        report
            .save(path, settings.output.format)
            .context("Failed to save run report")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Report saved to {}", path.display()))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    // A glider looping around a small torus
    let examples_dir = config_dir.join("examples");
    let mut glider = Settings::default();
    glider.simulation.boundary_condition = BoundaryCondition::Wrap;
    glider.simulation.max_generations = Some(200);
    glider.input.pattern_file = Some(PathBuf::from("patterns/glider.txt"));
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    // HighLife on a random field
    let mut highlife = Settings::default();
    highlife.simulation.rule = Rule::from_digits("23", "36")?;
    highlife.simulation.randomize = true;
    highlife.simulation.seed = Some(42);
    highlife.simulation.max_generations = Some(500);
    highlife.to_file(&examples_dir.join("highlife.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));

    Ok(())
}

fn show_command(pattern_path: PathBuf) -> Result<()> {
    let grid = load_grid_from_file(&pattern_path)
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    println!("Pattern ({}x{}):", grid.rows(), grid.cols());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    print!("{}", GridFormatter::format_statistics(&grid));

    Ok(())
}
