//! Side channel for refresh outcomes.

use std::path::Path;

use crate::blocklist::snapshot::BlocklistError;
use crate::observability::metrics;

/// Receives the outcome of every scheduled reload.
///
/// Injected into the refresh loop so failures can be asserted on in tests
/// instead of scraped from process output.
pub trait ReloadReporter: Send + Sync + 'static {
    /// A reload built a new snapshot and it is now current.
    fn reload_applied(&self, path: &Path, entries: usize);

    /// A reload failed; the previous snapshot remains current.
    fn reload_failed(&self, path: &Path, error: &BlocklistError);
}

/// Default reporter: structured logs plus reload counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ReloadReporter for TracingReporter {
    fn reload_applied(&self, path: &Path, entries: usize) {
        tracing::debug!(path = %path.display(), entries, "Blocklist reloaded");
        metrics::record_reload("applied");
        metrics::record_blocklist_size(entries);
    }

    fn reload_failed(&self, path: &Path, error: &BlocklistError) {
        tracing::error!(
            path = %path.display(),
            error = %error,
            "Error reloading blocklist. Keeping current entries."
        );
        metrics::record_reload("failed");
    }
}
