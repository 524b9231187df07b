//! Implementation of the `vidpref run` command.
//!
//! A line-oriented terminal shell over [`StudyService`]: login screen,
//! one screen per comparison, completion screen, then back to login.

use anyhow::Result;
use clap::Args;
use console::style;
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::output::format_bytes;
use crate::cli::output::progress::print_session_progress;
use crate::domain::errors::StudyError;
use crate::domain::models::{Choice, Phase, RaterSession};
use crate::services::{StudyService, TaskView, VideoSlot};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Login code for the first session (prompted when omitted)
    #[arg(long)]
    pub code: Option<String>,

    /// Rater name for the first session (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Seed for the A/B placement of the first session, for replaying it
    #[arg(long)]
    pub orientation_seed: Option<u64>,
}

type Input = Lines<BufReader<Stdin>>;

/// Judging instructions shown on the login screen.
pub const INSTRUCTIONS: &str = "\
Please read the instructions carefully before starting.

We use AI models to edit source videos based on provided prompts. Given two
edited videos, please select the one you prefer.

Judge each pair on:
  * Edited video quality: smoothness of frames, consistency of content and
    per-frame image quality.
  * Prompt alignment: how well the edited video matches the given prompt.
  * Motion fidelity: how well the motion matches the source video.

Note: if these factors contradict each other, prioritize video quality, as
the result must be a functional video first.

After reviewing both videos, select your preferred option or choose Draw if
you cannot decide which one is better.";

/// Question posed on every comparison screen.
pub const TASK_QUESTION: &str = "\
Imagine you used an AI model to edit the source video based on the prompt.
You received these two results, Video A and Video B. Which one are you more
likely to accept? (Key considerations: video quality, prompt alignment and
motion fidelity to the source video)";

/// What the rater typed on a comparison screen.
#[derive(Debug, PartialEq, Eq)]
enum TaskInput {
    Vote(Option<Choice>),
    Quit,
    Invalid(String),
}

fn parse_task_input(line: &str) -> TaskInput {
    let line = line.trim();
    if line.is_empty() {
        return TaskInput::Vote(None);
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return TaskInput::Quit;
    }
    match line.parse::<Choice>() {
        Ok(choice) => TaskInput::Vote(Some(choice)),
        Err(err) => TaskInput::Invalid(err.to_string()),
    }
}

pub async fn execute(args: RunArgs, service: &StudyService) -> Result<()> {
    let mut input = BufReader::new(stdin()).lines();
    let mut preset = Some(args);
    let mut slot: Option<RaterSession> = None;

    loop {
        match StudyService::phase(slot.as_ref()) {
            Phase::Login => {
                let Some(session) = login_screen(service, &mut input, preset.take()).await? else {
                    return Ok(());
                };
                slot = Some(session);
            }
            Phase::Evaluating => {
                let Some(session) = slot.as_mut() else {
                    continue;
                };
                match task_screen(service, session, &mut input).await? {
                    Flow::Continue => {}
                    Flow::Restart => service.restart(&mut slot),
                    Flow::Exit => return Ok(()),
                }
            }
            Phase::Complete => {
                let Some(session) = slot.as_ref() else {
                    continue;
                };
                if !completion_screen(session, &mut input).await? {
                    return Ok(());
                }
                service.restart(&mut slot);
            }
        }
    }
}

enum Flow {
    Continue,
    Restart,
    Exit,
}

/// Prompts for credentials until a session starts. `None` on end of input.
async fn login_screen(
    service: &StudyService,
    input: &mut Input,
    mut preset: Option<RunArgs>,
) -> Result<Option<RaterSession>> {
    loop {
        println!();
        println!("{}", style("Video Preference Study").bold().underlined());
        println!();
        println!("{INSTRUCTIONS}");
        println!();

        let (code, name, seed) = match preset.take() {
            Some(RunArgs {
                code: Some(code),
                name: Some(name),
                orientation_seed,
            }) => (code, name, orientation_seed),
            _ => {
                let Some(code) = ask(input, "Test ID: ").await? else {
                    return Ok(None);
                };
                let Some(name) = ask(input, "Your name: ").await? else {
                    return Ok(None);
                };
                (code, name, None)
            }
        };

        let result = match seed {
            Some(seed) => service.login_with_seed(&code, &name, seed).await,
            None => service.login(&code, &name).await,
        };

        match result {
            Ok(session) => {
                println!(
                    "{} {} comparisons ahead. Session {}",
                    style("Welcome!").green().bold(),
                    session.total_tasks(),
                    style(session.session_id()).dim()
                );
                return Ok(Some(session));
            }
            Err(err) => report(&err),
        }
    }
}

async fn task_screen(
    service: &StudyService,
    session: &mut RaterSession,
    input: &mut Input,
) -> Result<Flow> {
    let Some(task) = service.current_task(session) else {
        return Ok(Flow::Continue);
    };

    println!();
    print_session_progress(task.index, task.total, task.comparison_label());
    println!("{}", style(task.progress_text()).bold());
    render_task(service, &task).await;

    println!();
    println!("{}", style(TASK_QUESTION).bold());
    let Some(line) = ask(input, "Video A, Video B or Draw? [a/b/d, q to quit]: ").await? else {
        return Ok(Flow::Exit);
    };

    let choice = match parse_task_input(&line) {
        TaskInput::Quit => return Ok(Flow::Restart),
        TaskInput::Invalid(message) => {
            println!("{}", style(message).red());
            return Ok(Flow::Continue);
        }
        TaskInput::Vote(choice) => choice,
    };

    match service.submit_vote(session, task.index, choice).await {
        Ok(outcome) => {
            if let Some(warning) = &outcome.warning {
                println!(
                    "{} {warning}. This vote was not recorded.",
                    style("Warning:").yellow().bold()
                );
            } else {
                println!("{}", style(outcome.saved_message()).green());
            }
        }
        Err(err) => report(&err),
    }
    Ok(Flow::Continue)
}

/// Shows a failed action. The shell stays on the current screen.
fn report(err: &StudyError) {
    if err.is_recoverable() {
        println!("{}", style(err).red());
    } else {
        println!(
            "{}\n{}",
            style(err).red().bold(),
            style("Ask the study organizer to check the video folders.").dim()
        );
    }
}

async fn render_task(service: &StudyService, task: &TaskView) {
    match &task.prompt {
        Some(prompt) => println!("Edit prompt: {}", style(prompt).cyan()),
        None => println!("Edit prompt: {}", style("(none)").dim()),
    }

    let source = VideoSlot {
        path: task.triple.source_path.clone(),
        method: "source".to_string(),
    };
    println!("  Original  {}", describe(service, &source).await);
    println!("  Video A   {}", describe(service, &task.video_a).await);
    println!("  Video B   {}", describe(service, &task.video_b).await);
}

/// Path plus size, or a note when the file cannot be read.
async fn describe(service: &StudyService, slot: &VideoSlot) -> String {
    match service.load_video(&slot.path).await {
        Ok(bytes) => format!("{} ({})", slot.path.display(), format_bytes(bytes.len())),
        Err(err) => format!(
            "{} {}",
            slot.path.display(),
            style(format!("[unavailable: {err}]")).red()
        ),
    }
}

/// Shows the completion summary. Returns whether to start a new session.
async fn completion_screen(session: &RaterSession, input: &mut Input) -> Result<bool> {
    let summary = StudyService::summary(session);

    println!();
    print_session_progress(summary.total, summary.total, "done");
    println!("{}", style("Evaluation complete. Thank you!").green().bold());
    println!(
        "{} of {} votes recorded for {}.",
        summary.recorded,
        summary.total,
        session.rater_name()
    );
    if summary.lost > 0 {
        println!(
            "{}",
            style(format!("{} vote(s) could not be saved.", summary.lost)).yellow()
        );
    }

    let answer = ask(input, "Press Enter to start a new session, or q to exit: ").await?;
    Ok(answer.is_some_and(|a| !a.trim().eq_ignore_ascii_case("q")))
}

/// Prints `label` and reads one line. `None` on end of input.
async fn ask(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
