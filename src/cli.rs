use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::planner::constants::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS};

/// NutriTrack: request a daily diet plan, then tweak, lock, regenerate and save it.
#[derive(Parser, Debug)]
#[command(name = "nutritrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the plan service.
    #[arg(long, global = true, env = "NUTRITRACK_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Storage file for the saved plan (defaults to the user data directory).
    #[arg(long, global = true, env = "NUTRITRACK_STORAGE")]
    pub storage: Option<PathBuf>,

    /// Seconds to wait for the plan service.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enter a profile and work with a generated plan interactively.
    Plan,

    /// Suggest a goal from height and weight.
    SuggestGoal {
        /// Height in centimetres.
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kilograms.
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Show the saved plan if it matches the profile you enter.
    Load,

    /// Delete the saved plan.
    Clear,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}
