use std::time::Duration;

use task_pool_core::{ConfigError, SimulationConfig};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
  pub simulation: SimulationConfig,
  // How long the stepper waits before each step.
  pub step_interval: Duration,
  // Pause between initializing the run and the first step.
  pub start_delay: Duration,
}

impl RunnerConfig {
  pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
    Ok(Self {
      simulation: SimulationConfig::from_labels(&args.workers, &args.tasks)?,
      step_interval: Duration::from_millis(args.step_interval_ms),
      start_delay: Duration::from_millis(args.start_delay_ms),
    })
  }
}
