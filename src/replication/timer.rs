use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::Duration;

/// Abstracted sleep used by the replicator so tests can observe the cadence
/// without waiting it out.
#[async_trait::async_trait]
pub trait Timer: Send + Sync {
    /// Suspends the current task for approximately `duration_ms` milliseconds.
    async fn wait_ms(&self, duration_ms: u64);
}

pub struct SleepTimer;

#[async_trait::async_trait]
impl Timer for SleepTimer {
    async fn wait_ms(&self, duration_ms: u64) {
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
    }
}

/// TimerSpy records the most recent requested duration and yields instead of
/// sleeping.
#[derive(Default)]
pub struct TimerSpy {
    last_wait_ms: AtomicU64,
    wait_count: AtomicU64,
}

impl TimerSpy {
    pub fn new() -> Self {
        TimerSpy::default()
    }

    pub fn last_wait_ms(&self) -> u64 {
        self.last_wait_ms.load(Ordering::Acquire)
    }

    pub fn wait_count(&self) -> u64 {
        self.wait_count.load(Ordering::Acquire)
    }
}

#[async_trait::async_trait]
impl Timer for TimerSpy {
    async fn wait_ms(&self, duration_ms: u64) {
        self.last_wait_ms.store(duration_ms, Ordering::Release);
        self.wait_count.fetch_add(1, Ordering::AcqRel);
        // Let the rest of the system make progress between ticks.
        tokio::task::yield_now().await;
    }
}
