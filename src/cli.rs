use clap::{Parser, Subcommand};

/// SmartMealPlanner — builds budget-aware seasonal meal plans with ingredient reuse.
#[derive(Parser, Debug)]
#[command(name = "smart_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the planner state JSON file.
    #[arg(short, long, default_value = "planner_state.json")]
    pub file: String,

    /// Directory holding raw catalog page files.
    #[arg(long, default_value = "catalog")]
    pub catalog_dir: String,

    /// Path to the candidate pool cache file.
    #[arg(long, default_value = "meal_pool_cache.json")]
    pub cache_file: String,

    /// Seed for the random source (omit for a fresh draw each run).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a meal plan for a budget and horizon.
    Plan {
        /// Budget; prompted for when omitted.
        #[arg(short, long)]
        budget: Option<f64>,

        /// Horizon, daily or weekly; prompted for when omitted.
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Remove meals from the saved plan and generate replacements.
    Replace,

    /// Display the saved plan.
    Show,

    /// Export the saved plan to a CSV file.
    Export {
        /// Output CSV path.
        #[arg(short, long, default_value = "meal_plan.csv")]
        output: String,
    },

    /// Drop the cached candidate pool so the next plan rebuilds it.
    RefreshPool,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            budget: None,
            mode: None,
        }
    }
}
