#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    // Every task completed.
    Drained { steps: u64 },
    // The user abandoned the run before it drained.
    Interrupted,
    // The view could not render anymore.
    ViewClosed(String),
}
