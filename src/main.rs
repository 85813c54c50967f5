//! Command line driver for the ageing Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vitality_life::{
    build_engine,
    config::{CliOverrides, Settings},
    game_of_life::{create_example_grids, is_normal_game, RuleModel},
    utils::{ColorOutput, GridFormatter},
};

#[derive(Parser)]
#[command(name = "vitality_life")]
#[command(about = "Classical and ageing Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Rule string, e.g. B3/S23 or B3/S23/A5 (overrides config)
        #[arg(short, long)]
        rule: Option<String>,

        /// Initial state file (overrides config)
        #[arg(short, long)]
        initial: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Grid size used when no initial state is given (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Delay between generations in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Save the final grid into this directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and grid files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Parse a rule string and show how it is interpreted
    Rule {
        /// Rule string, e.g. B3/S23 or B3/S23/A5
        rule: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Commands::Run {
            config,
            rule,
            initial,
            generations,
            size,
            interval_ms,
            output,
            verbose,
        } => {
            let overrides = CliOverrides {
                rule,
                size,
                generations,
                tick_interval_ms: interval_ms,
                initial_file: initial,
                output_dir: output,
            };
            run_command(config, &overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Rule { rule } => rule_command(&rule),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: &CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Rule: {}", settings.simulation.rule);
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Tick interval: {}ms", settings.simulation.tick_interval_ms);
        match settings.input.initial_state_file {
            Some(ref path) => println!("  Initial state: {}", path.display()),
            None => println!("  Initial state: empty {0}x{0} grid", settings.simulation.default_size),
        }
        println!();
    }

    let mut engine = build_engine(&settings)?;
    let interval = Duration::from_millis(settings.simulation.tick_interval_ms);

    if verbose {
        let grid = engine.current_grid();
        let mode = if engine.rule_model().is_classical() {
            "classical"
        } else {
            "ageing"
        };
        println!("Mode: {}", mode);
        println!("Initial grid ({}x{}):", grid.width, grid.height);
        println!("{}", GridFormatter::format_grid_with_coords(grid));
    }

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running {} ({})",
            engine.rule(),
            engine.rule_model()
        ))
    );
    println!("{}", GridFormatter::format_generation(&engine.summary(), engine.current_grid()));

    for _ in 0..settings.simulation.generations {
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }

        engine.advance().context("Failed to advance generation")?;
        println!("{}", GridFormatter::format_generation(&engine.summary(), engine.current_grid()));

        if engine.current_grid().is_empty() {
            debug!(generation = engine.generation(), "Population died out");
        }
    }

    let summary = engine.summary();
    info!(
        generation = summary.generation,
        living = summary.living,
        "Simulation finished"
    );

    if settings.output.save_final {
        let path = GridFormatter::save_grid(
            engine.current_grid(),
            engine.rule(),
            &summary,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save final grid")?;
        println!("{}", ColorOutput::success(&format!("Final grid saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let grids_dir = directory.join("input/grids");

    for dir in [&config_dir, &grids_dir] {
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

    create_example_grids(&grids_dir).context("Failed to create example grids")?;
    println!("Created example grids in: {}", grids_dir.display());

    let examples_dir = config_dir.join("examples");

    let mut classic = Settings::default();
    classic.simulation.rule = "B3/S23".to_string();
    classic.input.initial_state_file = Some(PathBuf::from("input/grids/glider.txt"));
    classic.to_file(&examples_dir.join("classic.yaml"))?;

    let mut ageing = Settings::default();
    ageing.simulation.rule = "B3/S23/A5".to_string();
    ageing.simulation.generations = 25;
    ageing.input.initial_state_file = Some(PathBuf::from("input/grids/ember.txt"));
    ageing.to_file(&examples_dir.join("ageing.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/examples/ageing.yaml");

    Ok(())
}

fn rule_command(rule: &str) -> Result<()> {
    match RuleModel::parse(rule) {
        Ok(model) => {
            let kind = if is_normal_game(rule) { "classical" } else { "ageing" };
            println!("{} is a {} rule", rule, kind);
            println!("  {}", model);
            Ok(())
        }
        Err(e) => {
            println!("{}", ColorOutput::error(&e.to_string()));
            Err(e.into())
        }
    }
}
