use tracing::{debug, info, warn};

use crate::{
    collector::ResultCollector,
    config::SimulationConfig,
    queue::TaskQueue,
    snapshot::{SlotView, Snapshot},
    state::RunState,
    task::Task,
    worker_pool::WorkerPool,
};

#[derive(Debug)]
pub struct Scheduler {
    state: RunState,
    queue: TaskQueue,
    pool: WorkerPool,
    collector: ResultCollector,
    task_count: usize,
    steps: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: RunState::NotStarted,
            queue: TaskQueue::new(),
            pool: WorkerPool::new(0),
            collector: ResultCollector::new(),
            task_count: 0,
            steps: 0,
        }
    }

    pub fn initialize(&mut self, config: &SimulationConfig) {
        self.populate(config.task_count(), config.worker_count());
    }

    fn populate(&mut self, task_count: usize, worker_count: usize) {
        info!(
            "Initializing run with {} tasks and {} workers",
            task_count, worker_count
        );

        self.queue.clear();
        for number in 1..=task_count {
            self.queue.enqueue(Task::numbered(number as u32));
        }
        self.pool = WorkerPool::new(worker_count);
        self.collector.clear();
        self.task_count = task_count;
        self.steps = 0;

        for slot in 0..worker_count {
            match self.queue.dequeue() {
                Some(task) => self.pool.assign(slot, task),
                None => break,
            }
        }

        self.state = RunState::Running;
        self.update_state();
    }

    pub fn step(&mut self, progress_batch: u8) -> RunState {
        if self.state != RunState::Running {
            warn!("Ignoring step while the run is {}", self.state);
            return self.state;
        }
        self.steps += 1;

        for slot in 0..self.pool.size() {
            if !self.pool.occupied(slot) {
                continue;
            }
            // A task may already sit at 100% before this step advances it.
            if self.slot_completed(slot) {
                self.retire_and_refill(slot);
            }
            if let Some(task) = self.pool.task_mut(slot) {
                task.advance(progress_batch);
            }
            if self.slot_completed(slot) {
                self.retire_and_refill(slot);
            }
        }

        self.update_state();
        self.state
    }

    fn slot_completed(&self, slot: usize) -> bool {
        self.pool.task(slot).is_some_and(Task::is_completed)
    }

    fn retire_and_refill(&mut self, slot: usize) {
        let task = self.pool.vacate(slot);
        debug!("Retired {} from slot {}", task.title(), slot);
        self.collector.record(task);

        if let Some(next) = self.queue.dequeue() {
            debug!("Refilling slot {} with {}", slot, next.title());
            self.pool.assign(slot, next);
        }
    }

    fn update_state(&mut self) {
        if self.state == RunState::Running && self.is_idle() {
            info!(
                "Run drained after {} steps, {} tasks completed",
                self.steps,
                self.collector.count()
            );
            self.state = RunState::Drained;
        }
    }

    fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.pool.all_empty()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_drained(&self) -> bool {
        self.state == RunState::Drained
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn collector(&self) -> &ResultCollector {
        &self.collector
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            step: self.steps,
            pending: self
                .queue
                .iter()
                .map(|task| task.title().to_string())
                .collect(),
            slots: self
                .pool
                .iter()
                .map(|task| {
                    task.map(|task| SlotView {
                        title: task.title().to_string(),
                        status: task.status(),
                        progress: task.progress(),
                    })
                })
                .collect(),
            completed: self
                .collector
                .all()
                .iter()
                .map(|task| task.title().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{config::PROGRESS_BATCH, task::TaskStatus};

    fn started(workers: usize, tasks: usize) -> Scheduler {
        let mut scheduler = Scheduler::new();
        scheduler.initialize(&SimulationConfig::new(workers, tasks).unwrap());
        scheduler
    }

    fn run_to_drain(scheduler: &mut Scheduler) -> Vec<Snapshot> {
        let mut snapshots = vec![scheduler.snapshot()];
        while !scheduler.is_drained() {
            scheduler.step(PROGRESS_BATCH);
            snapshots.push(scheduler.snapshot());
            assert!(scheduler.steps() < 10_000, "run never drained");
        }
        snapshots
    }

    fn numbered_titles(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
        range.map(|number| format!("Task #{}", number)).collect()
    }

    #[test]
    fn test_new_scheduler_is_not_started() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.state(), RunState::NotStarted);
        assert_eq!(scheduler.step(PROGRESS_BATCH), RunState::NotStarted);
        assert_eq!(scheduler.steps(), 0);
        assert!(scheduler.snapshot().slots.is_empty());
    }

    #[test]
    fn test_single_worker_scenario() {
        let mut scheduler = started(1, 3);

        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.state, RunState::Running);
        assert_eq!(snapshot.slots[0].as_ref().unwrap().title, "Task #1");
        assert_eq!(snapshot.pending, ["Task #2", "Task #3"]);

        for _ in 0..9 {
            scheduler.step(PROGRESS_BATCH);
        }
        assert_eq!(scheduler.pool().task(0).unwrap().progress(), 90);
        assert_eq!(scheduler.collector().count(), 0);

        scheduler.step(PROGRESS_BATCH);
        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.completed, ["Task #1"]);
        let slot = snapshot.slots[0].as_ref().unwrap();
        assert_eq!(slot.title, "Task #2");
        assert_eq!(slot.status, TaskStatus::InProgress);
        assert_eq!(slot.progress, 0);
        assert_eq!(snapshot.pending, ["Task #3"]);

        run_to_drain(&mut scheduler);
        assert_eq!(scheduler.steps(), 30);
        assert_eq!(scheduler.snapshot().completed, numbered_titles(1..=3));
    }

    #[test]
    fn test_surplus_workers_stay_idle() {
        let mut scheduler = started(5, 2);

        let snapshot = scheduler.snapshot();
        assert!(snapshot.pending.is_empty());
        assert_eq!(snapshot.slots.len(), 5);
        assert_eq!(snapshot.slots[0].as_ref().unwrap().title, "Task #1");
        assert_eq!(snapshot.slots[1].as_ref().unwrap().title, "Task #2");

        for snapshot in run_to_drain(&mut scheduler) {
            assert_eq!(snapshot.slots.len(), 5);
            assert!(snapshot.slots[2..].iter().all(Option::is_none));
        }
        assert_eq!(scheduler.snapshot().completed, ["Task #1", "Task #2"]);
    }

    #[test]
    fn test_capacity_covers_every_task() {
        for workers in 1..=7 {
            for tasks in 1..=workers {
                let scheduler = started(workers, tasks);
                assert!(scheduler.queue().is_empty());
                assert_eq!(scheduler.pool().occupied_count(), tasks);
            }
        }
    }

    #[test]
    fn test_conservation_and_totality_for_every_config() {
        for workers in 1..=7 {
            for tasks in 1..=14 {
                let mut scheduler = started(workers, tasks);
                for snapshot in run_to_drain(&mut scheduler) {
                    assert_eq!(snapshot.conservation_total(), tasks);
                }
                assert!(scheduler.queue().is_empty());
                assert!(scheduler.pool().all_empty());
                assert_eq!(scheduler.collector().count(), tasks);
            }
        }
    }

    #[test]
    fn test_progress_is_monotonic_and_completed_tasks_are_full() {
        let mut scheduler = started(3, 8);
        let mut seen: HashMap<String, u8> = HashMap::new();

        for snapshot in run_to_drain(&mut scheduler) {
            for slot in snapshot.slots.iter().flatten() {
                let previous = seen.insert(slot.title.clone(), slot.progress);
                assert!(previous.unwrap_or(0) <= slot.progress);
                assert_eq!(slot.status, TaskStatus::InProgress);
                assert!(slot.progress < 100);
            }
        }
        assert_eq!(seen.len(), 8);
        for task in scheduler.collector().all() {
            assert_eq!(task.progress(), 100);
            assert_eq!(task.status(), TaskStatus::Completed);
        }
    }

    #[test]
    fn test_single_worker_completes_in_submission_order() {
        for tasks in 1..=14 {
            let mut scheduler = started(1, tasks);
            run_to_drain(&mut scheduler);
            assert_eq!(
                scheduler.snapshot().completed,
                numbered_titles(1..=tasks as u32)
            );
        }
    }

    #[test]
    fn test_identical_configs_produce_identical_runs() {
        let mut first = started(2, 4);
        let mut second = started(2, 4);
        assert_eq!(run_to_drain(&mut first), run_to_drain(&mut second));
        assert_eq!(first.snapshot().completed, numbered_titles(1..=4));
        assert_eq!(first.steps(), 20);
    }

    #[test]
    fn test_simultaneous_completions_retire_in_slot_order() {
        let mut scheduler = started(3, 5);
        for _ in 0..10 {
            scheduler.step(PROGRESS_BATCH);
        }
        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.completed, numbered_titles(1..=3));
        assert!(snapshot.pending.is_empty());
        assert_eq!(snapshot.slots[0].as_ref().unwrap().title, "Task #4");
        assert_eq!(snapshot.slots[1].as_ref().unwrap().title, "Task #5");
        assert!(snapshot.slots[2].is_none());
    }

    #[test]
    fn test_task_found_finished_is_retired_before_advancing() {
        let mut scheduler = started(1, 2);
        scheduler.pool.task_mut(0).unwrap().advance(100);

        scheduler.step(PROGRESS_BATCH);

        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.completed, ["Task #1"]);
        assert!(snapshot.pending.is_empty());
        // The refilled task is advanced within the same step.
        let slot = snapshot.slots[0].as_ref().unwrap();
        assert_eq!(slot.title, "Task #2");
        assert_eq!(slot.status, TaskStatus::InProgress);
        assert_eq!(slot.progress, 10);
        assert_eq!(snapshot.conservation_total(), 2);
    }

    #[test]
    fn test_uneven_batch_still_finishes() {
        let mut scheduler = started(2, 3);
        while !scheduler.is_drained() {
            scheduler.step(30);
        }
        // 30, 60, 90, 100 for each of the first two tasks, then four more steps.
        assert_eq!(scheduler.steps(), 8);
        assert_eq!(scheduler.collector().count(), 3);
    }

    #[test]
    fn test_step_after_drain_is_a_no_op() {
        let mut scheduler = started(2, 2);
        run_to_drain(&mut scheduler);
        let steps = scheduler.steps();
        assert_eq!(scheduler.step(PROGRESS_BATCH), RunState::Drained);
        assert_eq!(scheduler.steps(), steps);
    }

    #[test]
    fn test_empty_run_is_drained_immediately() {
        let mut scheduler = Scheduler::new();
        scheduler.populate(0, 3);
        assert!(scheduler.is_drained());
        assert_eq!(scheduler.pool().size(), 3);
        assert_eq!(scheduler.snapshot().conservation_total(), 0);
    }

    #[test]
    fn test_initialize_resets_previous_run() {
        let mut scheduler = started(2, 6);
        run_to_drain(&mut scheduler);

        scheduler.initialize(&SimulationConfig::new(4, 2).unwrap());
        let snapshot = scheduler.snapshot();
        assert_eq!(snapshot.state, RunState::Running);
        assert_eq!(snapshot.step, 0);
        assert_eq!(snapshot.slots.len(), 4);
        assert_eq!(snapshot.occupied_slots(), 2);
        assert!(snapshot.completed.is_empty());
        assert_eq!(scheduler.task_count(), 2);
    }
}
