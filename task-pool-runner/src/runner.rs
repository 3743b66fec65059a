use task_pool_core::{Scheduler, Snapshot};
use tokio::sync::{oneshot, watch};
use tracing::info;

use crate::{
  runner_config::RunnerConfig,
  shutdown::{
    interrupt::start_interrupt_fiber, shutdown_manager::ShutdownManager,
    shutdown_reason::ShutdownReason,
  },
  stepper::start_stepper_fiber,
  view::{start_view_fiber, View},
};

pub struct Runner {
  shutdown: ShutdownManager<ShutdownReason>,
  snapshots: watch::Receiver<Snapshot>,
}

impl Runner {
  pub async fn new<V: View + Send + 'static>(config: RunnerConfig, view: V) -> Self {
    info!("Starting runner with config: {:?}", config);

    let shutdown_manager = ShutdownManager::new();

    let mut scheduler = Scheduler::new();
    scheduler.initialize(&config.simulation);
    let (publisher, snapshots) = watch::channel(scheduler.snapshot());

    // Shutdown tasks run newest first: the stepper stops before the view drains.
    start_interrupt_fiber(shutdown_manager.shutdown.clone()).await;

    start_view_fiber(view, snapshots.clone(), shutdown_manager.shutdown.clone()).await;

    start_stepper_fiber(scheduler, config, publisher, shutdown_manager.shutdown.clone()).await;

    Runner {
      shutdown: shutdown_manager,
      snapshots,
    }
  }

  pub async fn await_shutdown(
    self,
  ) -> Result<(ShutdownReason, Snapshot), oneshot::error::RecvError> {
    let reason = self.shutdown.await_shutdown().await?;
    let last = self.snapshots.borrow().clone();
    Ok((reason, last))
  }
}
