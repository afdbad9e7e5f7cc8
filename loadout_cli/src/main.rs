//! loadout - Print outcome estimates for a loadout file

mod report;

use clap::{Args, Parser, Subcommand};
use loadout_core::config::{self, ConfigError};
use loadout_core::{compute_deterministic, default_constants, simulate_seeded, Constants, Dataset, Loadout};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Outcome estimates for a game loadout
#[derive(Parser)]
#[command(name = "loadout")]
#[command(about = "Closed-form and simulated outcome estimates for a loadout", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute estimates for a loadout
    Calc(CalcArgs),

    /// Check a dataset (and optionally a loadout) for errors
    Validate(ValidateArgs),
}

#[derive(Args)]
struct CalcArgs {
    /// Compiled dataset JSON
    #[arg(long)]
    dataset: PathBuf,

    /// Loadout JSON
    #[arg(long)]
    loadout: PathBuf,

    /// Constants file (.toml or .json); bundled defaults when omitted
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Override the loadout's trial count
    #[arg(long)]
    trials: Option<u32>,

    /// Seed for the simulation
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Run the simulation even if the loadout disables it
    #[arg(long)]
    simulate: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ValidateArgs {
    #[arg(long)]
    dataset: PathBuf,

    #[arg(long)]
    loadout: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Calc(args) => run_calc(args),
        Command::Validate(args) => run_validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_constants(path: Option<&PathBuf>) -> Result<Constants, ConfigError> {
    match path {
        Some(path) => config::load_any(path),
        None => Ok(default_constants()),
    }
}

fn run_calc(args: CalcArgs) -> Result<(), CliError> {
    let dataset = Dataset::load(&args.dataset)?;
    let loadout: Loadout = config::load_json(&args.loadout)?;
    if let Err(err) = loadout.validate() {
        tracing::warn!("loadout has out-of-range values: {}", err);
    }
    let constants = load_constants(args.constants.as_ref())?;

    let deterministic = compute_deterministic(&loadout, &dataset, &constants);
    let simulation = (loadout.simulation_enabled || args.simulate).then(|| {
        let trials = args.trials.unwrap_or(loadout.simulation_trials).max(1);
        tracing::info!("running {} simulation trials (seed {})", trials, args.seed);
        simulate_seeded(&loadout, &dataset, &constants, trials, args.seed)
    });

    if args.json {
        let out = serde_json::json!({
            "deterministic": deterministic,
            "simulation": simulation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", report::render(&deterministic, simulation.as_ref()));
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let dataset = Dataset::load(&args.dataset)?;
    println!(
        "dataset {} ok: {} characters, {} items, {} add-ons, {} perks, {} offerings",
        dataset.version,
        dataset.characters.len(),
        dataset.items.len(),
        dataset.addons.len(),
        dataset.perks.len(),
        dataset.offerings.len()
    );

    if let Some(path) = args.loadout {
        let loadout: Loadout = config::load_json(&path)?;
        check_loadout(&dataset, &loadout)?;
        println!("loadout {} ok", path.display());
    }
    Ok(())
}

/// Range checks plus unknown ids and role conflicts against the dataset
fn check_loadout(dataset: &Dataset, loadout: &Loadout) -> Result<(), ConfigError> {
    loadout.validate()?;

    let missing: Vec<&str> = loadout
        .perk_ids
        .iter()
        .chain(loadout.addon_ids.iter())
        .chain(loadout.item_id.iter())
        .chain(loadout.offering_id.iter())
        .chain(loadout.character_id.iter())
        .map(String::as_str)
        .filter(|id| !dataset_contains(dataset, id))
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "loadout references unknown ids: {}",
            missing.join(", ")
        )));
    }

    let conflicts = dataset.role_conflicts(loadout);
    if !conflicts.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "not usable by a {:?}: {}",
            loadout.role,
            conflicts.join(", ")
        )));
    }
    Ok(())
}

fn dataset_contains(dataset: &Dataset, id: &str) -> bool {
    dataset.characters.iter().any(|e| e.id == id)
        || dataset.items.iter().any(|i| i.entity.id == id)
        || dataset.addons.iter().any(|a| a.entity.id == id)
        || dataset.perks.iter().any(|e| e.id == id)
        || dataset.offerings.iter().any(|e| e.id == id)
}
