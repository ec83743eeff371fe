//! Command-line interface for LeetHelper.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LeetHelper - cached explanations, solutions and hints for coding problems.
#[derive(Parser, Debug)]
#[command(name = "leethelper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "leethelper.toml")]
    pub config: PathBuf,

    /// Verbose mode.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initializes configuration in the current directory.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Prints the cached entry for a question.
    Get {
        /// Question id (problem slug).
        question: String,

        /// Only print this field.
        #[arg(short, long)]
        field: Option<String>,
    },

    /// Caches a value for one field of a question.
    Set {
        /// Question id (problem slug).
        question: String,

        /// Field kind (explanation, solution, hints, dryRun, mistakes).
        field: String,

        /// Value to cache, or @path to read it from a file.
        value: String,
    },

    /// Removes the cached entry for a question.
    Clear {
        /// Question id (problem slug).
        question: String,
    },

    /// Removes every cached entry.
    ClearAll {
        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Lists cached questions.
    List,

    /// Removes stale and corrupt entries.
    Purge,

    /// Shows cached text for a question, generating it on a miss.
    Ask {
        /// Field kind (explanation, solution, hints, dryRun, mistakes).
        field: String,

        /// Question id (problem slug).
        #[arg(long)]
        question: Option<String>,

        /// Problem URL to take the question id from.
        #[arg(long)]
        url: Option<String>,

        /// Programming language (default from config).
        #[arg(short, long)]
        language: Option<String>,

        /// Your code, or @path to read it from a file (for mistakes).
        #[arg(long)]
        code: Option<String>,

        /// Ignore the cached value and generate again.
        #[arg(short, long)]
        refresh: bool,
    },

    /// Shows, stores or removes the model API key.
    ApiKey {
        /// Key to store.
        key: Option<String>,

        /// Remove the stored key.
        #[arg(long, conflicts_with = "key")]
        clear: bool,
    },

    /// Shows cache and generator status.
    Status,

    /// Configures options interactively.
    Config,

    /// Shows version.
    Version,
}
