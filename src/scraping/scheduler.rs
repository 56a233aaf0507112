//! Recurring cycle scheduling
//!
//! One timer task at most: reconfiguring atomically replaces the
//! previous schedule, so no two timers are ever armed. Ticks landing
//! while a cycle is still running are dropped by the coordinator's
//! own guard.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::coordinator::{CycleOutcome, ScrapeCoordinator};

/// Owns the recurring-cycle timer task
pub struct Scheduler {
    startup_delay: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(startup_delay: Duration) -> Self {
        Self {
            startup_delay,
            handle: Mutex::new(None),
        }
    }

    /// Arm (or disarm) the recurring schedule.
    ///
    /// Any previous schedule is cancelled first. With a positive
    /// interval, one cycle runs after the startup delay and then on
    /// every interval tick; zero disables automatic scraping entirely.
    pub fn configure(&self, interval_hours: i64, coordinator: Arc<ScrapeCoordinator>) {
        let mut slot = self.handle.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
            debug!("cancelled previous scrape schedule");
        }

        if interval_hours <= 0 {
            info!("automatic scraping disabled");
            return;
        }

        info!(interval_hours, "scheduling background scraping");
        let period = Duration::from_secs(interval_hours as u64 * 3600);
        let startup_delay = self.startup_delay;

        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(startup_delay).await;
            run_logged(&coordinator).await;

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; the
            // startup run above already covered it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                run_logged(&coordinator).await;
            }
        }));
    }

    /// Disarm the schedule without replacing it.
    pub fn stop(&self) {
        if let Some(previous) = self.handle.lock().take() {
            previous.abort();
            info!("scrape schedule stopped");
        }
    }

    /// Whether a schedule is currently armed
    pub fn is_armed(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }
}

async fn run_logged(coordinator: &ScrapeCoordinator) {
    match coordinator.run_cycle().await {
        CycleOutcome::Completed(stats) => {
            debug!(?stats, "scheduled cycle finished");
        }
        CycleOutcome::AlreadyRunning => {
            debug!("scheduled tick dropped, cycle still running");
        }
    }
}
