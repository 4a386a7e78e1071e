//! Timer-driven background jobs that never overlap with themselves.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Allows at most one run of a job at a time.
///
/// Clones share the same flag, so a scheduled run and a manually triggered
/// one exclude each other.
#[derive(Clone, Default)]
pub struct SingleFlight {
    running: Arc<AtomicBool>,
}

/// Marks a run as active until dropped.
pub struct SingleFlightGuard {
    running: Arc<AtomicBool>,
}

impl Drop for SingleFlightGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or returns `None` while another run holds it.
    pub fn try_begin(&self) -> Option<SingleFlightGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SingleFlightGuard {
                running: Arc::clone(&self.running),
            })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs `job` unless a run is already in progress. The flag is released
    /// when the job finishes, fails or is cancelled.
    pub async fn run<F, Fut, T>(&self, name: &str, job: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let Some(_guard) = self.try_begin() else {
            log::warn!("Skipping {name}: previous run still in progress");
            return None;
        };
        Some(job().await)
    }
}

/// Time until the next multiple of `interval` since the Unix epoch, so an
/// hourly job fires on the hour.
pub fn delay_until_next_tick(now: DateTime<Utc>, interval: Duration) -> Duration {
    let interval_ms = interval.as_millis().max(1);
    let now_ms = u128::try_from(now.timestamp_millis()).unwrap_or_default();
    let remaining = interval_ms - now_ms % interval_ms;
    Duration::from_millis(u64::try_from(remaining).unwrap_or(u64::MAX))
}

/// Spawns a task that calls `job` on every tick of `interval`, starting at
/// the next aligned tick.
///
/// Each run is spawned separately so that ticks keep their schedule. Wrap the
/// job in [`SingleFlight::run`] to skip ticks that arrive while the previous
/// run is still active.
///
/// # Panics
///
/// The spawned task panics if `interval` is zero; callers validate it first
/// (see `HeadlinesConfig::interval`).
pub fn spawn_periodic<F, Fut>(name: &'static str, interval: Duration, job: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let first_tick = delay_until_next_tick(Utc::now(), interval);
        log::info!("Scheduled {name} every {interval:?}, first run in {first_tick:?}");

        let mut ticks = tokio::time::interval_at(Instant::now() + first_tick, interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            log::debug!("Tick for {name}");
            tokio::spawn(job());
        }
    })
}
