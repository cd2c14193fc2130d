//! CLI argument parsing for flockplan

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flockcalc::ExperienceLevel;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fp")]
#[command(author, version, about = "Small-flock broiler planning and daily task tracking", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work out the best flock size for your budget and space
    Plan {
        /// Available budget in currency units
        #[arg(long)]
        budget: i64,

        /// Usable floor space in square meters
        #[arg(long)]
        space: f64,

        /// Your experience level (beginner, intermediate, advanced)
        #[arg(long)]
        experience: ExperienceLevel,

        /// Cycle duration in days (21-60)
        #[arg(long)]
        days: u32,

        /// Persist the recommendation as a farm plan
        #[arg(long)]
        save: bool,

        /// Farmer id owning the saved plan (required with --save)
        #[arg(long)]
        farmer: Option<String>,

        /// First day of the cycle (defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Emit the outcome as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List a farmer's saved plans
    Plans {
        /// Farmer id
        #[arg(long)]
        farmer: String,
    },

    /// Generate the day-by-day task schedule for a plan
    Generate {
        /// Plan id
        #[arg(long)]
        plan: String,
    },

    /// Show a plan's full schedule grouped by day
    Tasks {
        /// Plan id
        #[arg(long)]
        plan: String,
    },

    /// Show tasks scheduled for today
    Today {
        /// Plan id
        #[arg(long)]
        plan: String,
    },

    /// Show open tasks for the coming days
    Upcoming {
        /// Plan id
        #[arg(long)]
        plan: String,

        /// Window in days (defaults from config)
        #[arg(long)]
        window: Option<u32>,
    },

    /// Show completion statistics for a plan
    Stats {
        /// Plan id
        #[arg(long)]
        plan: String,
    },

    /// Mark a task completed
    Complete {
        /// Task id
        task: String,

        /// Acting farmer id
        #[arg(long)]
        farmer: String,

        /// Notes to attach with the completion
        #[arg(long)]
        notes: Option<String>,

        /// Photo reference to attach with the completion
        #[arg(long)]
        photo: Option<String>,
    },

    /// Set the notes on a task
    Note {
        /// Task id
        task: String,

        /// Acting farmer id
        #[arg(long)]
        farmer: String,

        /// The notes text
        notes: String,
    },

    /// Attach a photo reference to a task
    Photo {
        /// Task id
        task: String,

        /// Acting farmer id
        #[arg(long)]
        farmer: String,

        /// The photo reference
        photo: String,
    },

    /// Delete a plan and its whole schedule
    Delete {
        /// Plan id
        #[arg(long)]
        plan: String,
    },
}
