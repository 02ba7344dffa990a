pub mod approve;
pub mod edit;
pub mod reset;
pub mod review;
pub mod schema;
pub mod show;
pub mod suggest;

use crate::config::{Config, Submitter};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "incusched")]
#[command(
    author,
    version,
    about = "Plans intervention sessions for incubation programme participants"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(short, long, global = true, default_value = "incusched.yaml")]
    pub config: PathBuf,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Propose sessions from participants' required interventions
    Suggest(SuggestArgs),

    /// Show the proposed sessions
    Show,

    /// Move participants out of a proposed session into one-to-ones
    Review(ReviewArgs),

    /// Change a proposed session's coordinator, date or subtitle
    Edit(EditArgs),

    /// Write approved sessions to the indicative calendar
    Approve(ApproveArgs),

    /// Discard all proposed sessions
    Reset,

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone)]
pub struct SuggestArgs {
    /// Override the document store path
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Plan as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print proposals without saving them
    #[arg(long)]
    pub dry_run: bool,

    /// Replace an existing board
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Clone)]
pub struct ReviewArgs {
    /// Row position as listed by `show`
    #[arg(long)]
    pub row: usize,

    /// Participant id to move out (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub remove: Vec<String>,

    /// Reference date for rescheduling (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Parser, Clone)]
pub struct EditArgs {
    /// Row position as listed by `show`
    #[arg(long)]
    pub row: usize,

    /// Coordinator id from the row's ranked list
    #[arg(long)]
    pub coordinator: Option<String>,

    /// New session date (YYYY-MM-DD, weekdays only)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Subtitle for recurring sessions
    #[arg(long)]
    pub subtitle: Option<String>,
}

#[derive(Parser, Clone)]
pub struct ApproveArgs {
    /// Row positions to approve (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "all")]
    pub row: Vec<usize>,

    /// Approve every proposed session
    #[arg(long)]
    pub all: bool,

    /// Override the document store path
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Override max parallel writes
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Submitting user as id:name, recorded where no coordinator is set
    #[arg(long = "as-user", env = "INCUSCHED_USER")]
    pub as_user: Option<Submitter>,

    /// Date used for the report directory (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Load and validate config, applying a store override
pub fn load_config(path: &Path, store: Option<PathBuf>) -> anyhow::Result<Config> {
    info!("Loading config from {:?}", path);
    let mut config = Config::load_or_default(path)?;
    if let Some(store) = store {
        config.store = store;
    }
    config.validate()?;
    Ok(config)
}

pub fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
