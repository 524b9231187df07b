//! Implementation of the `vidpref init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::setup::{
    create_config_dir, create_config_file, create_results_dir, SetupPaths,
};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_file: PathBuf,
    pub config_written: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nConfig written to {}", self.config_file.display()));
            lines.push(
                "Edit study.video_base_path and the baselines, then start a session with `vidpref run`."
                    .to_string(),
            );
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let paths = SetupPaths::under(&target_path);
    let reinitializing = paths.is_initialized();

    create_config_dir(&paths)?;
    create_results_dir(&paths)?;
    let config_written = create_config_file(&paths, args.force)?;

    let message = match (config_written, reinitializing) {
        (false, _) => "Project already initialized. Use --force to overwrite the config.",
        (true, true) => "Project reinitialized successfully.",
        (true, false) => "Project initialized successfully.",
    };

    let output_data = InitOutput {
        success: config_written,
        message: message.to_string(),
        initialized_path: target_path,
        config_file: paths.config_file,
        config_written,
    };

    output(&output_data, json_mode);
    Ok(())
}
