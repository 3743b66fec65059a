use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count {0} is out of range (expected 1..=7)")]
    WorkerCountOutOfRange(usize),

    #[error("task count {0} is out of range (expected 1..=14)")]
    TaskCountOutOfRange(usize),

    #[error("invalid option {0:?}: expected a number or a label such as \"3 threads\"")]
    InvalidOption(String),
}
