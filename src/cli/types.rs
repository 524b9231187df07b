//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::assign::AssignArgs;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::prompt::PromptArgs;
use crate::cli::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "vidpref")]
#[command(about = "vidpref - Pairwise video preference study runner", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .vidpref/
    #[arg(short, long, global = true, env = "VIDPREF_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .vidpref/config.yaml and the results directory
    Init(InitArgs),

    /// Run an interactive rating session in the terminal
    Run(RunArgs),

    /// Show the comparisons a group is assigned
    Assign(AssignArgs),

    /// Look up the edit prompt for a video
    Prompt(PromptArgs),
}
