// Recurring task runner glue
//
// Owns cadence and the non-overlap guarantee: ticks for one registration are
// dispatched strictly sequentially from a single loop, and a new tick is not
// started until the previous one has fully returned.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// A unit of recurring work polled by the runner.
#[async_trait]
pub trait RecurringTask: Send + Sync {
    fn name(&self) -> &str;

    /// Whether a tick performs its real work detached from the runner.
    /// Ticks here complete synchronously from the runner's point of view.
    fn is_async(&self) -> bool {
        false
    }

    /// Run one tick. Returns whether the task should keep being scheduled;
    /// `false` permanently retires this task instance.
    async fn tick(&self, now: DateTime<Utc>) -> bool;
}

/// Drives registered recurring tasks on a timer with graceful shutdown.
pub struct TaskRunner {
    shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        let (shutdown_tx, _shutdown_rx) = tokio::sync::broadcast::channel(1);
        Self { shutdown_tx }
    }

    /// Register a task: first tick after `initial_delay`, then every
    /// `period`. The returned handle completes when the task retires itself
    /// or the runner shuts down.
    #[instrument(skip(self, task), fields(task = %task.name()))]
    pub fn register(
        &self,
        task: Arc<dyn RecurringTask>,
        initial_delay: Duration,
        period: Duration,
    ) -> JoinHandle<()> {
        info!(
            initial_delay_ms = initial_delay.as_millis() as u64,
            period_ms = period.as_millis() as u64,
            is_async = task.is_async(),
            "Registering recurring task"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + initial_delay, period);
            // A slow tick delays the next one instead of bursting to catch
            // up; ticks never overlap.
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        debug!(task = %task.name(), "Dispatching tick");
                        if !task.tick(Utc::now()).await {
                            info!(task = %task.name(), "Task retired itself, unscheduling");
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!(task = %task.name(), "Shutdown signal received, stopping task");
                        break;
                    }
                }
            }
        })
    }

    /// Stop all registered tasks. In-flight ticks complete before their
    /// loops observe the signal.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountdownTask {
        ticks: AtomicUsize,
        stop_after: usize,
    }

    #[async_trait]
    impl RecurringTask for CountdownTask {
        fn name(&self) -> &str {
            "countdown"
        }

        async fn tick(&self, _now: DateTime<Utc>) -> bool {
            let seen = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
            seen < self.stop_after
        }
    }

    #[tokio::test]
    async fn test_false_repeat_retires_the_task() {
        let runner = TaskRunner::new();
        let task = Arc::new(CountdownTask {
            ticks: AtomicUsize::new(0),
            stop_after: 3,
        });

        let handle = runner.register(
            task.clone(),
            Duration::from_millis(1),
            Duration::from_millis(1),
        );

        handle.await.unwrap();
        assert_eq!(task.ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stop_halts_a_repeating_task() {
        let runner = TaskRunner::new();
        let task = Arc::new(CountdownTask {
            ticks: AtomicUsize::new(0),
            stop_after: usize::MAX,
        });

        let handle = runner.register(
            task.clone(),
            Duration::from_millis(1),
            Duration::from_millis(1),
        );

        tokio::time::sleep(Duration::from_millis(20)).await;
        runner.stop();
        handle.await.unwrap();

        assert!(task.ticks.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_initial_delay_defers_first_tick() {
        let runner = TaskRunner::new();
        let task = Arc::new(CountdownTask {
            ticks: AtomicUsize::new(0),
            stop_after: usize::MAX,
        });

        let _handle = runner.register(
            task.clone(),
            Duration::from_millis(50),
            Duration::from_millis(50),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(task.ticks.load(Ordering::SeqCst), 0);
        runner.stop();
    }
}
