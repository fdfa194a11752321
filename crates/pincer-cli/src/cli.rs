//! CLI argument definitions for pincer.
//!
//! Uses `clap` derive macros to define the full command surface. Each
//! command corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pincer",
    version,
    about = "A toolkit for dependency-constraint manifests",
    long_about = "Pincer reads requirements-style constraint manifests, validates their \
                  version bounds, and relaxes CI-only upper bounds while preserving \
                  entries marked strict."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the constraint manifest (defaults to requirements.txt,
    /// searched upward from the current directory)
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the manifest and validate its constraints
    Check,

    /// Drop advisory upper bounds, keeping strict and policy-kept entries
    Relax {
        /// Write the relaxed manifest here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the relaxed manifest to stdout without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List parsed entries
    List {
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
        /// Show only this package's entries
        #[arg(short, long)]
        package: Option<String>,
        /// Keep only entries applicable in the configured environment
        #[arg(long)]
        applicable: bool,
    },

    /// Compare two manifests and report constraint changes
    Diff {
        /// The older manifest
        old: PathBuf,
        /// The newer manifest
        new: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
