//! Periodic blocklist refresh.
//!
//! # States
//! ```text
//! Idle → Loading → Applied | Failed → (sleep) → Loading → ...
//! ```
//! The initial load happens in the gate constructor, so the first tick here
//! is already a reload and fires one full interval after start.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::blocklist::reporter::ReloadReporter;
use crate::blocklist::snapshot::{BlocklistError, Snapshot};
use crate::blocklist::store::BlocklistStore;

/// Background task that re-reads the backing file on a fixed interval.
pub struct RefreshLoop {
    store: Arc<BlocklistStore>,
    path: PathBuf,
    interval: Duration,
    reporter: Arc<dyn ReloadReporter>,
}

impl RefreshLoop {
    pub fn new(
        store: Arc<BlocklistStore>,
        path: PathBuf,
        interval: Duration,
        reporter: Arc<dyn ReloadReporter>,
    ) -> Self {
        Self {
            store,
            path,
            interval,
            reporter,
        }
    }

    /// Run until a shutdown signal arrives or every sender is dropped.
    ///
    /// A tick in progress always finishes its load-then-replace before the
    /// signal is looked at again.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis() as u64,
            "Blocklist refresh loop starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!("Blocklist refresh loop received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    // Errors are already routed to the reporter.
                    let _ = self.reload_once().await;
                }
            }
        }
    }

    /// Perform one reload: build a snapshot, swap it in on success.
    ///
    /// Returns the new entry count, or the error that left the previous
    /// snapshot in place.
    pub async fn reload_once(&self) -> Result<usize, BlocklistError> {
        match Snapshot::load(&self.path).await {
            Ok(snapshot) => {
                let entries = snapshot.len();
                self.store.replace(snapshot);
                self.reporter.reload_applied(&self.path, entries);
                Ok(entries)
            }
            Err(e) => {
                self.reporter.reload_failed(&self.path, &e);
                Err(e)
            }
        }
    }
}
