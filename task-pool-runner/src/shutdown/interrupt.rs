use std::sync::Arc;

use tracing::{error, info, warn};

use super::{shutdown_manager::Shutdown, shutdown_reason::ShutdownReason};

pub async fn start_interrupt_fiber(shutdown: Arc<Shutdown<ShutdownReason>>) {
    let finalizer_shutdown = shutdown.clone();
    let fiber = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupted, abandoning the run");
                tokio::spawn(async move {
                    shutdown.trigger(ShutdownReason::Interrupted).await;
                });
            }
            Err(error) => error!("Failed to listen for Ctrl-C: {:?}", error),
        }
    });

    finalizer_shutdown
        .register_shutdown_task(
            move || {
                Box::pin(async move {
                    fiber.abort();
                    let exit = fiber.await;
                    info!("interrupt listener exited: {:?}", exit);
                })
            },
            "interrupt listener",
        )
        .await;
}
