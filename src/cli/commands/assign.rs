//! Implementation of the `vidpref assign` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, Group, VideoTriple};
use crate::services::StudyService;

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Group id: 1 = first half, 2 = second half, 3 = all videos
    #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
    pub group: u8,

    /// Split seed (defaults to study.seed from the config)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AssignOutput {
    pub group: Group,
    pub seed: u64,
    pub videos: usize,
    pub comparisons: Vec<VideoTriple>,
}

impl CommandOutput for AssignOutput {
    fn to_human(&self) -> String {
        format!(
            "Group {} (seed {}): {} video(s), {} comparison(s)\n{}",
            self.group,
            self.seed,
            self.videos,
            self.comparisons.len(),
            TableFormatter::new().format_triples(&self.comparisons)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    args: AssignArgs,
    service: &StudyService,
    config: &Config,
    json_mode: bool,
) -> Result<()> {
    let group = Group::try_from(args.group)?;
    let seed = args.seed.unwrap_or(config.study.seed);
    let set = service.engine().build(group, seed).await?;

    let mut files: Vec<&str> = set.iter().map(|t| t.filename.as_str()).collect();
    files.dedup();

    output(
        &AssignOutput {
            group,
            seed,
            videos: files.len(),
            comparisons: set.to_vec(),
        },
        json_mode,
    );
    Ok(())
}
