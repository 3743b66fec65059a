use clap::Parser;

/// Simulates tasks moving through a bounded pool of worker slots.
///
/// Tasks wait as pending, run in one of the worker slots and end up as
/// completed. Every step advances each running task by ten percent.
#[derive(Parser, Debug)]
#[command(name = "task-pool", about = "Simulates tasks moving through a bounded pool of worker slots")]
pub struct CliArgs {
    /// Number of worker slots (1-7), as a number or a label such as "3 threads"
    #[arg(long, env = "TASK_POOL_WORKERS", default_value = "1")]
    pub workers: String,

    /// Number of tasks (1-14), as a number or a label such as "5 tasks"
    #[arg(long, env = "TASK_POOL_TASKS", default_value = "1")]
    pub tasks: String,

    /// Milliseconds between two steps
    #[arg(long, env = "TASK_POOL_STEP_INTERVAL_MS", default_value = "100")]
    pub step_interval_ms: u64,

    /// Milliseconds to wait after initializing before the first step
    #[arg(long, env = "TASK_POOL_START_DELAY_MS", default_value = "1000")]
    pub start_delay_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the accepted worker and task labels and exit
    #[arg(long)]
    pub list_options: bool,
}
