//! Progress display using indicatif
//!
//! The rating shell prints one progress line per comparison. Each line is a
//! bar drawn at its final position and left on screen, so it never competes
//! with the rater's input prompt.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const SESSION_TEMPLATE: &str = "{bar:30.cyan/blue} {pos}/{len} {msg}";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Style for the per-comparison progress line
fn session_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(SESSION_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_CHARS)
}

/// Draws "`done`/`total` message" once and leaves it on screen.
pub fn print_session_progress(done: usize, total: usize, message: impl Into<String>) {
    let bar = session_progress_bar(done, total, ProgressDrawTarget::stderr());
    bar.set_message(message.into());
    bar.abandon();
}

/// A progress bar at position `done` of `total`.
pub fn session_progress_bar(done: usize, total: usize, target: ProgressDrawTarget) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(total as u64), target);
    bar.set_style(session_style());
    bar.set_position(done as u64);
    bar
}
