//! Reaper Task
//!
//! Background task that periodically sweeps expired entries out of a
//! [`CacheStore`].

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::Result;

/// Shortest period the reaper will tick at. Timers cannot run with a zero
/// period, so smaller intervals are raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Longest period the reaper will tick at. Larger intervals would overflow
/// the timer deadline, so they are lowered to this.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Reaper Handle ==
/// Controls a running reaper.
///
/// Dropping the handle also stops the reaper, on its next wake-up.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl ReaperHandle {
    /// Effective sweep period after clamping.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true once the reaper loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .map_or(true, |task| task.is_finished())
    }

    // == Shutdown ==
    /// Signals the reaper to stop and waits for it to exit.
    ///
    /// A sweep already in progress completes first. Calling this more than
    /// once is harmless.
    pub async fn shutdown(&self) -> Result<()> {
        // Err only means the loop already exited and dropped its receiver.
        let _ = self.shutdown_tx.send(true);

        let task = self.task.lock().take();
        if let Some(task) = task {
            task.await?;
            debug!("Reaper stopped");
        }
        Ok(())
    }
}

// == Spawn ==
/// Spawns a reaper that sweeps `store` every `interval`.
///
/// The task keeps only a weak reference, so it never extends the store's
/// lifetime and exits on its own once the store is dropped. Must be called
/// from within a Tokio runtime.
pub fn spawn_reaper(store: &Arc<CacheStore>, interval: Duration) -> ReaperHandle {
    let interval = if interval < MIN_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is below the minimum, using {:?}",
            interval, MIN_SWEEP_INTERVAL
        );
        MIN_SWEEP_INTERVAL
    } else if interval > MAX_SWEEP_INTERVAL {
        warn!(
            "Sweep interval {:?} is above the maximum, using {:?}",
            interval, MAX_SWEEP_INTERVAL
        );
        MAX_SWEEP_INTERVAL
    } else {
        interval
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(reap_loop(Arc::downgrade(store), interval, shutdown_rx));

    ReaperHandle {
        shutdown_tx,
        task: Mutex::new(Some(task)),
        interval,
    }
}

async fn reap_loop(
    store: Weak<CacheStore>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Starting reaper with interval of {:?}", interval);

    // First sweep one full period after start, not immediately.
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            // Fires on an explicit shutdown and when the handle is dropped.
            _ = shutdown_rx.changed() => {
                debug!("Reaper received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                let Some(store) = store.upgrade() else {
                    debug!("Cache store dropped, reaper exiting");
                    break;
                };

                let removed = store.sweep();
                if removed > 0 {
                    info!("Reaper sweep: removed {} expired entries", removed);
                } else {
                    debug!("Reaper sweep: no expired entries found");
                }
            }
        }
    }
}
