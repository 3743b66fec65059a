pub mod collector;
pub mod config;
pub mod error;
pub mod queue;
pub mod scheduler;
pub mod snapshot;
pub mod state;
pub mod task;
pub mod worker_pool;

pub use collector::ResultCollector;
pub use config::{SimulationConfig, PROGRESS_BATCH};
pub use error::ConfigError;
pub use queue::TaskQueue;
pub use scheduler::Scheduler;
pub use snapshot::{SlotView, Snapshot};
pub use state::RunState;
pub use task::{Task, TaskId, TaskStatus};
pub use worker_pool::WorkerPool;
