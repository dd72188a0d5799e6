//! Cancellable animation timer for the routing demo.
//!
//! The routing widget advances a highlighted token on a fixed period
//! (~1.5s by default). The timer is an explicit periodic task rather than
//! a framework lifecycle hook: the owning widget holds the handle, and
//! either an awaited [`AnimationTimer::stop`] or dropping the handle
//! guarantees no callback fires after the widget is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

/// Default highlight advance period used by the routing article.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1500);

/// Handle to a running animation task.
///
/// The task cycles an index through `0..token_count` and hands each value
/// to the callback. Dropping the handle aborts the task immediately.
pub struct AnimationTimer {
    shutdown: Arc<Notify>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationTimer {
    /// Spawn the periodic task.
    ///
    /// The first callback fires one full period after spawn, with index 0,
    /// then advances modulo `token_count` every period. A `token_count` of
    /// zero spawns a task that ticks nothing and just waits for shutdown.
    pub fn spawn<F>(period: Duration, token_count: usize, mut on_tick: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        let shutdown = Arc::new(Notify::new());
        let running = Arc::new(AtomicBool::new(true));

        let task_shutdown = shutdown.clone();
        let task_running = running.clone();
        let handle = tokio::spawn(async move {
            let mut timer = interval(period);
            // The first interval tick completes immediately; consume it so
            // the highlight starts moving one period after mount.
            timer.tick().await;

            let mut index = 0usize;
            loop {
                tokio::select! {
                    _ = task_shutdown.notified() => break,
                    _ = timer.tick() => {
                        if !task_running.load(Ordering::Relaxed) {
                            break;
                        }
                        if token_count > 0 {
                            on_tick(index);
                            index = (index + 1) % token_count;
                        }
                    }
                }
            }
            debug!("animation timer task exited");
        });

        Self {
            shutdown,
            running,
            handle: Some(handle),
        }
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop the task and wait for it to exit.
    ///
    /// After this returns, the callback is guaranteed not to run again.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.shutdown.notify_one();
        if let Some(handle) = self.handle.take() {
            // The task only errors if it was already aborted, which is
            // also a clean exit for our purposes.
            let _ = handle.await;
        }
    }
}

impl Drop for AnimationTimer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
