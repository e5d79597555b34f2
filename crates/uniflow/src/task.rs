//! Deferred task scheduling
//!
//! Thunks that want to dispatch later schedule through here instead of an
//! untracked ambient timer, so every deferred dispatch has a handle it can
//! be cancelled through.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a scheduled task. Dropping it does not cancel the task;
/// cancellation is always explicit.
pub struct TaskHandle {
    handle: JoinHandle<()>,
}

impl TaskHandle {
    /// Cancel the task. A no-op once the task has already run.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Run `task` after `delay` on the ambient tokio runtime.
///
/// # Panics
///
/// Panics when called outside a tokio runtime, like `tokio::spawn`.
pub fn spawn_after<F>(delay: Duration, task: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task();
    });
    TaskHandle { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn task_runs_after_the_delay() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        spawn_after(Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!ran.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        let handle = spawn_after(Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        });
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }
}
