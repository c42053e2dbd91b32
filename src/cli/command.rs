//! Command-line interface definitions.
//!
//! Defines the CLI structure for the paceline application using `clap`.
//! Run operations are top-level subcommands; user-catalog lookups live
//! under `users`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Run tracking CLI backed by SQLite persistence
#[derive(Parser, Debug)]
#[command(name = "paceline")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the paceline CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Run(RunCommand),

    /// Look up users in the remote catalog
    #[command(subcommand)]
    Users(UserCommand),
}

/// Subcommands operating on the run store.
#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// List every run in insertion order
    List,

    /// Show a single run by id
    Get {
        id: i32,
    },

    /// Record a new run
    Add(RunArgs),

    /// Replace a run's fields, compare-and-set on the version
    Update {
        id: i32,

        /// Version the caller last observed; a stale value is rejected
        #[arg(long)]
        version: i32,

        #[command(flatten)]
        fields: RunArgs,
    },

    /// Delete a run by id
    Delete {
        id: i32,
    },

    /// Count all runs
    Count,

    /// Create runs from a JSON array file (not atomic across elements)
    Import {
        file: PathBuf,
    },

    /// Search runs by a single criterion
    #[command(subcommand)]
    Find(FindCommand),
}

/// Field arguments shared by `add` and `update`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Title of the run
    #[arg(long)]
    pub title: String,

    /// Start time, RFC 3339 or naive `YYYY-MM-DDTHH:MM:SS` (read as UTC)
    #[arg(long)]
    pub started_on: String,

    /// Completion time, strictly after the start
    #[arg(long)]
    pub completed_on: String,

    /// Distance in miles
    #[arg(long)]
    pub miles: i32,

    /// INDOOR or OUTDOOR
    #[arg(long)]
    pub location: String,
}

/// Criteria searches over the run store.
#[derive(Subcommand, Debug)]
pub enum FindCommand {
    /// Runs at exactly this location
    Location { location: String },

    /// Runs with exactly this title (case-sensitive)
    Title { title: String },

    /// Runs of exactly this distance
    Miles { miles: i32 },

    /// Runs whose title contains the substring anywhere (case-sensitive)
    Contains { substring: String },

    /// Runs whose title matches a glob where each `_` is one character
    Pattern { pattern: String },
}

/// User catalog lookups.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List every user in the catalog
    List,

    /// Show a single user by id
    Get { id: i64 },
}
