/// Prompt lookup port.
///
/// Kept separate from the loader so the matching heuristic can be replaced
/// without touching the session code.
pub trait PromptLookup: Send + Sync {
    /// Prompt for an edited video, `None` if nothing matches
    fn lookup(&self, video_id: &str) -> Option<&str>;
}
