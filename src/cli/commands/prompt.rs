//! Implementation of the `vidpref prompt` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::domain::ports::PromptLookup;
use crate::services::PromptIndex;

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Video id, usually the caption of a video file
    pub video_id: String,
}

#[derive(Debug, Serialize)]
pub struct PromptOutput {
    pub video_id: String,
    pub prompt: Option<String>,
}

impl CommandOutput for PromptOutput {
    fn to_human(&self) -> String {
        match &self.prompt {
            Some(prompt) => format!("{}: {prompt}", self.video_id),
            None => format!("No prompt found for '{}'", self.video_id),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PromptArgs, config: &Config, json_mode: bool) -> Result<()> {
    let index = PromptIndex::load(&config.prompts.path).await?;
    let prompt = index.lookup(&args.video_id).map(str::to_string);

    output(
        &PromptOutput {
            video_id: args.video_id,
            prompt,
        },
        json_mode,
    );
    Ok(())
}
