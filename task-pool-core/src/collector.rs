use crate::task::Task;

#[derive(Debug, Default, Clone)]
pub struct ResultCollector {
    completed: Vec<Task>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    // The caller hands over tasks that are already completed.
    pub fn record(&mut self, task: Task) {
        debug_assert!(task.is_completed(), "recorded unfinished task {:?}", task);
        self.completed.push(task);
    }

    pub fn count(&self) -> usize {
        self.completed.len()
    }

    pub fn all(&self) -> &[Task] {
        &self.completed
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }
}
