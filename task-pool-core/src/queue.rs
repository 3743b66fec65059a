use std::collections::VecDeque;

use crate::task::Task;

#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    // Removes the oldest task. `None` once the backlog is exhausted.
    pub fn dequeue(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dequeue_preserves_submission_order() {
        let mut queue = TaskQueue::new();
        for number in 1..=4 {
            queue.enqueue(Task::numbered(number));
        }
        assert_eq!(queue.len(), 4);

        let titles: Vec<String> = std::iter::from_fn(|| queue.dequeue())
            .map(|task| task.title().to_string())
            .collect();
        assert_eq!(titles, ["Task #1", "Task #2", "Task #3", "Task #4"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_on_empty_is_none() {
        let mut queue = TaskQueue::new();
        assert!(queue.dequeue().is_none());
        queue.enqueue(Task::numbered(1));
        queue.dequeue();
        assert!(queue.dequeue().is_none());
    }
}
