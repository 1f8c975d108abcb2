//! CLI Module
//!
//! Command-line interface for running modeling requests from files.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Modelr - synthetic seismic forward modeling
#[derive(Parser, Debug)]
#[command(name = "modelr-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Modeling configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Slice output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Full response as JSON
    #[default]
    Json,
    /// Slice amplitudes as CSV, one row per time sample
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a model request and write the requested slice
    #[command(name = "run")]
    Run {
        /// Request file (.json or .toml)
        request: PathBuf,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List the available reflectivity methods
    #[command(name = "methods")]
    Methods,

    /// Run a wedge or body request and print its tuning curves
    #[command(name = "tuning")]
    Tuning {
        /// Request file (.json or .toml)
        request: PathBuf,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
