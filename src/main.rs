use std::collections::HashSet;
use std::path::Path;

use chrono::Datelike;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use smart_meal_planner_rs::catalog::{snapshot_or_rebuild, DirectoryCatalog};
use smart_meal_planner_rs::cli::{Cli, Command};
use smart_meal_planner_rs::error::{PlannerError, Result};
use smart_meal_planner_rs::interface::{
    display_plan, prompt_budget, prompt_mode, prompt_removals, prompt_yes_no, write_plan_csv,
};
use smart_meal_planner_rs::models::{MealCandidate, PlanEntry, PlanMode, PlannerState};
use smart_meal_planner_rs::planner::{generate_plan, generate_replacements, TieredCost};
use smart_meal_planner_rs::state::{load_state, save_state, FileCache};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or_default();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match command {
        Command::Plan { budget, mode } => cmd_plan(&cli, budget, mode, &mut rng),
        Command::Replace => cmd_replace(&cli, &mut rng),
        Command::Show => cmd_show(&cli),
        Command::Export { output } => cmd_export(&cli, &output),
        Command::RefreshPool => cmd_refresh_pool(&cli),
    }
}

/// Load the candidate pool from the cache, rebuilding from the catalog
/// directory when absent.
fn load_pool(cli: &Cli, rng: &mut StdRng) -> Vec<MealCandidate> {
    let cache = FileCache::new(&cli.cache_file);
    let provider = DirectoryCatalog::new(&cli.catalog_dir);
    let month = chrono::Local::now().month0() as usize;
    let mut cost_model = TieredCost::new(&mut *rng);

    snapshot_or_rebuild(&cache, &provider, month, &mut cost_model)
}

fn parse_mode(raw: &str) -> Result<PlanMode> {
    match raw.to_lowercase().as_str() {
        "daily" => Ok(PlanMode::Daily),
        "weekly" => Ok(PlanMode::Weekly),
        _ => Err(PlannerError::InvalidInput(format!(
            "Unknown mode: {} (expected daily or weekly)",
            raw
        ))),
    }
}

/// Generate a plan and optionally save it.
fn cmd_plan(cli: &Cli, budget: Option<f64>, mode: Option<String>, rng: &mut StdRng) -> Result<()> {
    let pool = load_pool(cli, rng);
    if pool.is_empty() {
        println!("Catalog is empty. Add page files under '{}' and retry.", cli.catalog_dir);
        return Ok(());
    }

    println!("{} candidate meals in the pool", pool.len());
    println!();

    let budget = match budget {
        Some(b) if b > 0.0 => b,
        Some(_) => {
            return Err(PlannerError::InvalidInput(
                "Budget must be positive".to_string(),
            ))
        }
        None => prompt_budget()?,
    };
    let mode = match mode {
        Some(raw) => parse_mode(&raw)?,
        None => prompt_mode()?,
    };

    println!();
    println!("Planning {} meals for a ${:.2} budget...", mode, budget);

    let plan = generate_plan(&pool, budget, mode, &HashSet::new(), rng);
    display_plan(&plan, budget);

    if !plan.is_empty() {
        let save = prompt_yes_no("Save this plan?", true)?;
        if save {
            let state = PlannerState { mode, budget, meals: plan };
            save_state(Path::new(&cli.file), &state)?;
            println!("Plan saved.");
        }
    }

    Ok(())
}

/// Remove meals from the saved plan and top it up with replacements.
fn cmd_replace(cli: &Cli, rng: &mut StdRng) -> Result<()> {
    let path = Path::new(&cli.file);

    if !path.exists() {
        eprintln!("Planner state file not found: {}", cli.file);
        eprintln!("Run 'plan' first to create one.");
        return Ok(());
    }

    let state = load_state(path)?;
    if state.meals.is_empty() {
        println!("Saved plan is empty. Run 'plan' first.");
        return Ok(());
    }

    display_plan(&state.meals, state.budget);

    let removed = prompt_removals(&state.meals)?;
    if removed.is_empty() {
        println!("Nothing removed.");
        return Ok(());
    }

    let current: Vec<PlanEntry> = state
        .meals
        .iter()
        .filter(|e| !removed.contains(&e.instance_id))
        .cloned()
        .collect();

    let pool = load_pool(cli, rng);
    let outcome = generate_replacements(&pool, &[], &current, state.budget, state.mode, rng);

    if !outcome.replacements_available {
        println!("No replacement meals available with the current budget and pool.");
    }

    let mut meals = current;
    meals.extend(outcome.added);

    display_plan(&meals, state.budget);

    let save = prompt_yes_no("Save the updated plan?", true)?;
    if save {
        let state = PlannerState { meals, ..state };
        save_state(path, &state)?;
        println!("Plan saved.");
    }

    Ok(())
}

/// Display the saved plan.
fn cmd_show(cli: &Cli) -> Result<()> {
    let path = Path::new(&cli.file);

    if !path.exists() {
        eprintln!("Planner state file not found: {}", cli.file);
        return Ok(());
    }

    let state = load_state(path)?;
    println!("Saved {} plan:", state.mode);
    display_plan(&state.meals, state.budget);

    Ok(())
}

/// Export the saved plan to CSV.
fn cmd_export(cli: &Cli, output: &str) -> Result<()> {
    let path = Path::new(&cli.file);

    if !path.exists() {
        eprintln!("Planner state file not found: {}", cli.file);
        return Ok(());
    }

    let state = load_state(path)?;
    if state.meals.is_empty() {
        println!("Saved plan is empty, nothing to export.");
        return Ok(());
    }

    write_plan_csv(&state.meals, Path::new(output))?;
    println!("Exported {} meals to {}", state.meals.len(), output);

    Ok(())
}

/// Drop the cached candidate pool.
fn cmd_refresh_pool(cli: &Cli) -> Result<()> {
    let cache = FileCache::new(&cli.cache_file);
    cache.clear()?;
    println!("Candidate pool cache cleared; the next plan will rebuild it.");

    Ok(())
}
