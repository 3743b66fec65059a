use std::{
  io::{self, Write},
  sync::Arc,
};

use futures_util::StreamExt;
use task_pool_core::Snapshot;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info};

use crate::shutdown::{shutdown_manager::Shutdown, shutdown_reason::ShutdownReason};

pub trait View {
  fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;
}

pub struct TextView<W> {
  out: W,
}

impl<W: Write> TextView<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }
}

impl<W: Write> View for TextView<W> {
  fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(self.out, "step {} | {}", snapshot.step, snapshot.state)?;
    writeln!(self.out, "pending:   {}", snapshot.pending.join(", "))?;
    for (index, slot) in snapshot.slots.iter().enumerate() {
      match slot {
        Some(slot) => writeln!(
          self.out,
          "[slot {}] {:<10} {:>3}%  {}",
          index, slot.title, slot.progress, slot.status
        )?,
        None => writeln!(self.out, "[slot {}] idle", index)?,
      }
    }
    writeln!(self.out, "completed: {}", snapshot.completed.join(", "))?;
    self.out.flush()
  }
}

pub async fn start_view_fiber<V: View + Send + 'static>(
  mut view: V,
  snapshots: watch::Receiver<Snapshot>,
  shutdown: Arc<Shutdown<ShutdownReason>>,
) {
  let finalizer_shutdown = shutdown.clone();
  let fiber = tokio::spawn(async move {
    let mut stream = WatchStream::new(snapshots);
    while let Some(snapshot) = stream.next().await {
      debug!("Rendering step {}", snapshot.step);
      if let Err(error) = view.render(&snapshot) {
        error!("Failed to render snapshot: {:?}", error);
        let reason = ShutdownReason::ViewClosed(error.to_string());
        tokio::spawn(async move {
          shutdown.trigger(reason).await;
        });
        break;
      }
    }
  });

  // The stepper is shut down first, which closes the stream and lets the
  // view render the final snapshot before exiting.
  finalizer_shutdown
    .register_shutdown_task(
      move || {
        Box::pin(async move {
          let exit = fiber.await;
          info!("view exited: {:?}", exit);
        })
      },
      "view",
    )
    .await;
}

#[cfg(test)]
mod tests {
  use super::*;
  use task_pool_core::{Scheduler, SimulationConfig, PROGRESS_BATCH};

  fn render_to_string(snapshot: &Snapshot) -> String {
    let mut out = Vec::new();
    TextView::new(&mut out).render(snapshot).unwrap();
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn test_text_view_renders_three_pools() {
    let mut scheduler = Scheduler::new();
    scheduler.initialize(&SimulationConfig::new(3, 4).unwrap());
    for _ in 0..4 {
      scheduler.step(PROGRESS_BATCH);
    }

    let rendered = render_to_string(&scheduler.snapshot());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
      lines,
      [
        "step 4 | running",
        "pending:   Task #4",
        "[slot 0] Task #1     40%  in progress",
        "[slot 1] Task #2     40%  in progress",
        "[slot 2] Task #3     40%  in progress",
        "completed: ",
      ]
    );
  }

  #[test]
  fn test_text_view_marks_idle_slots() {
    let mut scheduler = Scheduler::new();
    scheduler.initialize(&SimulationConfig::new(3, 1).unwrap());
    while !scheduler.is_drained() {
      scheduler.step(PROGRESS_BATCH);
    }

    let rendered = render_to_string(&scheduler.snapshot());
    assert!(rendered.starts_with("step 10 | drained\n"));
    assert!(rendered.contains("[slot 0] idle\n"));
    assert!(rendered.contains("[slot 2] idle\n"));
    assert!(rendered.ends_with("completed: Task #1\n"));
  }
}
