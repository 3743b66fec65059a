use std::sync::Arc;

use task_pool_core::{Scheduler, Snapshot, PROGRESS_BATCH};
use tokio::{sync::watch, time::sleep};
use tracing::{debug, info};

use crate::{
    runner_config::RunnerConfig,
    shutdown::{shutdown_manager::Shutdown, shutdown_reason::ShutdownReason},
};

fn publish(publisher: &watch::Sender<Snapshot>, scheduler: &Scheduler) {
    publisher.send_replace(scheduler.snapshot());
}

// Takes an initialized scheduler; its snapshot is already published.
pub async fn start_stepper_fiber(
    mut scheduler: Scheduler,
    config: RunnerConfig,
    publisher: watch::Sender<Snapshot>,
    shutdown: Arc<Shutdown<ShutdownReason>>,
) {
    let finalizer_shutdown = shutdown.clone();
    let fiber = tokio::spawn(async move {
        sleep(config.start_delay).await;

        loop {
            if scheduler.is_drained() {
                let steps = scheduler.steps();
                info!("All {} tasks completed", scheduler.collector().count());

                tokio::spawn(async move {
                    shutdown.trigger(ShutdownReason::Drained { steps }).await;
                });

                break;
            }

            sleep(config.step_interval).await;
            if shutdown.is_triggered().await {
                debug!(
                    "Shutdown requested, abandoning the run at step {}",
                    scheduler.steps()
                );
                break;
            }
            let state = scheduler.step(PROGRESS_BATCH);
            debug!("Step {} done, run is {}", scheduler.steps(), state);
            publish(&publisher, &scheduler);
        }
    });

    finalizer_shutdown
        .register_shutdown_task(
            move || {
                Box::pin(async move {
                    fiber.abort();
                    info!("Aborted stepper fiber");
                    let exit = fiber.await;
                    info!("stepper exited: {:?}", exit);
                })
            },
            "stepper",
        )
        .await;
}
