use std::{future::Future, mem, pin::Pin, sync::Arc};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};

type TaskFn = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

struct RegisteredTask {
  name: String,
  run: TaskFn,
}

pub struct ShutdownManager<A> {
  pub shutdown: Arc<Shutdown<A>>,
  receiver: oneshot::Receiver<A>,
}

impl<A> Default for ShutdownManager<A> {
  fn default() -> Self {
    Self::new()
  }
}

impl<A> ShutdownManager<A> {
  pub fn new() -> Self {
    let (sender, receiver) = oneshot::channel();
    Self {
      shutdown: Arc::new(Shutdown {
        sender: Mutex::new(Some(sender)),
        stack: Mutex::new(Vec::new()),
      }),
      receiver,
    }
  }

  pub async fn await_shutdown(self) -> Result<A, oneshot::error::RecvError> {
    self.receiver.await
  }
}

// One-shot: the first trigger wins, later ones are ignored.
pub struct Shutdown<A> {
  sender: Mutex<Option<oneshot::Sender<A>>>,
  // Unwound newest first.
  stack: Mutex<Vec<RegisteredTask>>,
}

impl<A> Shutdown<A> {
  pub async fn register_shutdown_task<F>(&self, task: F, name: impl Into<String>)
  where
    F: FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
  {
    let task = RegisteredTask {
      name: name.into(),
      run: Box::new(task),
    };
    debug!("Registered shutdown task: {}", task.name);
    self.stack.lock().await.push(task);
  }

  pub async fn trigger(&self, value: A) {
    let Some(sender) = self.sender.lock().await.take() else {
      debug!("Shutdown already triggered");
      return;
    };

    let stack = mem::take(&mut *self.stack.lock().await);
    info!("Shutting down, unwinding {} task(s)", stack.len());
    unwind(stack).await;

    if sender.send(value).is_err() {
      warn!("Nobody is waiting for the shutdown reason");
    }
  }

  pub async fn is_triggered(&self) -> bool {
    self.sender.lock().await.is_none()
  }
}

async fn unwind(mut stack: Vec<RegisteredTask>) {
  while let Some(RegisteredTask { name, run }) = stack.pop() {
    info!("Stopping {} ({} left)", name, stack.len());
    run().await;
  }
}
