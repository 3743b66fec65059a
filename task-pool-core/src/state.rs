use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    // The scheduler exists but no run has been initialized yet.
    NotStarted,
    // Tasks are still queued or held by worker slots.
    Running,
    // The queue and every worker slot are empty. Stays here until the next initialize.
    Drained,
}

impl Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::NotStarted => "not started",
            RunState::Running => "running",
            RunState::Drained => "drained",
        };
        f.write_str(label)
    }
}
