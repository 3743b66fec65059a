use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use tracing::{trace, warn};

pub const MAX_PROGRESS: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    // Waiting in the queue.
    Pending,
    // Held by a worker slot.
    InProgress,
    // Progress reached 100. Never changes afterwards.
    Completed,
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in progress",
            TaskStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(pub u32);

impl Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: Arc<str>,
    status: TaskStatus,
    progress: u8,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            title: title.into(),
            status: TaskStatus::Pending,
            progress: 0,
        }
    }

    // Titles follow the creation order: `Task #1`, `Task #2`, ...
    pub fn numbered(number: u32) -> Self {
        Self::new(TaskId(number), format!("Task #{}", number))
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn start(&mut self) {
        if self.status == TaskStatus::Pending {
            self.status = TaskStatus::InProgress;
        }
    }

    // Clamped to 100. Completed tasks are left untouched.
    pub fn advance(&mut self, amount: u8) {
        if self.is_completed() {
            warn!("Ignoring advance of completed task {:?}", self.id);
            return;
        }
        self.start();
        self.progress = self.progress.saturating_add(amount).min(MAX_PROGRESS);
        if self.progress == MAX_PROGRESS {
            self.status = TaskStatus::Completed;
        }
        trace!("{} advanced to {}%", self.title, self.progress);
    }
}
