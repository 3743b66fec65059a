use std::ops::RangeInclusive;

use crate::error::ConfigError;

pub const WORKER_COUNT_RANGE: RangeInclusive<usize> = 1..=7;
pub const TASK_COUNT_RANGE: RangeInclusive<usize> = 1..=14;

// Progress added to every active task by one scheduler step.
pub const PROGRESS_BATCH: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
  // Number of worker slots, fixed for the whole run.
  worker_count: usize,
  // Number of tasks created by initialize.
  task_count: usize,
}

impl SimulationConfig {
  pub fn new(worker_count: usize, task_count: usize) -> Result<Self, ConfigError> {
    if !WORKER_COUNT_RANGE.contains(&worker_count) {
      return Err(ConfigError::WorkerCountOutOfRange(worker_count));
    }
    if !TASK_COUNT_RANGE.contains(&task_count) {
      return Err(ConfigError::TaskCountOutOfRange(task_count));
    }
    Ok(Self {
      worker_count,
      task_count,
    })
  }

  pub fn from_labels(workers: &str, tasks: &str) -> Result<Self, ConfigError> {
    Self::new(parse_option_label(workers)?, parse_option_label(tasks)?)
  }

  pub fn worker_count(&self) -> usize {
    self.worker_count
  }

  pub fn task_count(&self) -> usize {
    self.task_count
  }
}

fn option_label(count: usize, singular: &str, plural: &str) -> String {
  format!("{} {}", count, if count == 1 { singular } else { plural })
}

pub fn worker_count_options() -> Vec<String> {
  WORKER_COUNT_RANGE
    .map(|count| option_label(count, "thread", "threads"))
    .collect()
}

pub fn task_count_options() -> Vec<String> {
  TASK_COUNT_RANGE
    .map(|count| option_label(count, "task", "tasks"))
    .collect()
}

// Reads the leading count of an option label. A bare number is accepted too.
pub fn parse_option_label(label: &str) -> Result<usize, ConfigError> {
  label
    .split_whitespace()
    .next()
    .and_then(|count| count.parse::<usize>().ok())
    .ok_or_else(|| ConfigError::InvalidOption(label.to_string()))
}
