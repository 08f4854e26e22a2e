//! The filtering gate: owns the denylist store and its refresh task.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{middleware, Router};
use tokio::task::JoinHandle;

use crate::blocklist::{
    BlocklistError, BlocklistStore, RefreshLoop, ReloadReporter, Snapshot, TracingReporter,
};
use crate::config::BlocklistConfig;
use crate::http::middleware::blocklist::blocklist_middleware;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Errors that prevent a gate from being constructed.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The supplied configuration is unusable.
    #[error("invalid gate configuration: {0}")]
    Config(&'static str),

    /// The initial blocklist load failed.
    #[error("failed to load blocklist: {0}")]
    Load(#[from] BlocklistError),
}

/// Request-filtering gate backed by a periodically reloaded denylist.
///
/// Cheap to clone; clones share the store and the refresh task.
#[derive(Clone)]
pub struct Gate {
    inner: Arc<GateInner>,
}

struct GateInner {
    store: Arc<BlocklistStore>,
    path: PathBuf,
    shutdown: Shutdown,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl Gate {
    /// Load the blocklist and start refreshing it, logging reload failures.
    pub async fn new(config: &BlocklistConfig) -> Result<Self, GateError> {
        Self::with_reporter(config, Arc::new(TracingReporter)).await
    }

    /// Like [`Gate::new`] with a caller-supplied reload reporter.
    ///
    /// Construction is all-or-nothing: on error no refresh task is spawned.
    pub async fn with_reporter(
        config: &BlocklistConfig,
        reporter: Arc<dyn ReloadReporter>,
    ) -> Result<Self, GateError> {
        if config.path.as_os_str().is_empty() {
            return Err(GateError::Config("blocklistPath cannot be empty"));
        }
        if config.refresh_interval_ms == 0 {
            return Err(GateError::Config("refresh interval must be greater than zero"));
        }

        let snapshot = Snapshot::load(&config.path).await?;
        tracing::info!(
            path = %config.path.display(),
            entries = snapshot.len(),
            "Blocklist loaded"
        );
        metrics::record_blocklist_size(snapshot.len());

        let store = Arc::new(BlocklistStore::new(snapshot));
        let shutdown = Shutdown::new();
        let refresh = RefreshLoop::new(
            store.clone(),
            config.path.clone(),
            config.refresh_interval(),
            reporter,
        );
        let task = tokio::spawn(refresh.run(shutdown.subscribe()));

        Ok(Self {
            inner: Arc::new(GateInner {
                store,
                path: config.path.clone(),
                shutdown,
                refresh_task: Mutex::new(Some(task)),
            }),
        })
    }

    /// Whether `identifier` is in the current snapshot.
    pub fn is_blocked(&self, identifier: &str) -> bool {
        self.inner.store.contains(identifier)
    }

    pub fn store(&self) -> &Arc<BlocklistStore> {
        &self.inner.store
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Put the gate in front of `downstream`.
    ///
    /// Blocked clients get a 403 and never reach `downstream`; everyone else
    /// is passed through untouched.
    pub fn wrap<S>(&self, downstream: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        downstream.layer(middleware::from_fn_with_state(
            self.clone(),
            blocklist_middleware,
        ))
    }

    /// Stop the refresh loop and wait for it to exit.
    ///
    /// Safe to call more than once. The last loaded snapshot stays in place,
    /// so a gate that is still wired into a router keeps filtering.
    pub async fn shutdown(&self) {
        self.inner.shutdown.trigger();

        let task = self
            .inner
            .refresh_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Blocklist refresh task ended abnormally");
            }
        }
    }

    /// Whether the refresh loop is still running.
    pub fn is_refreshing(&self) -> bool {
        self.inner
            .refresh_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("path", &self.inner.path)
            .field("entries", &self.inner.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_path_is_config_error() {
        let err = Gate::new(&BlocklistConfig::new("")).await.unwrap_err();
        assert!(matches!(err, GateError::Config(_)));
        assert!(err.to_string().contains("blocklistPath cannot be empty"));
    }

    #[tokio::test]
    async fn test_zero_interval_is_config_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = BlocklistConfig::new(file.path());
        config.refresh_interval_ms = 0;

        let err = Gate::new(&config).await.unwrap_err();
        assert!(matches!(err, GateError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BlocklistConfig::new(dir.path().join("absent.txt"));

        let err = Gate::new(&config).await.unwrap_err();
        assert!(matches!(err, GateError::Load(BlocklistError::Open { .. })));
    }

    #[tokio::test]
    async fn test_new_loads_initial_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocklist.txt");
        std::fs::write(&path, "203.0.113.9\n").unwrap();

        let gate = Gate::new(&BlocklistConfig::new(&path)).await.unwrap();

        assert!(gate.is_blocked("203.0.113.9"));
        assert!(!gate.is_blocked("203.0.113.10"));
        assert_eq!(gate.path(), path.as_path());
        assert_eq!(gate.store().len(), 1);
        assert!(gate.is_refreshing());

        gate.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_refresh_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocklist.txt");
        std::fs::write(&path, "1.2.3.4\n").unwrap();

        let gate = Gate::new(&BlocklistConfig::new(&path)).await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), gate.shutdown())
            .await
            .expect("shutdown hung");
        assert!(!gate.is_refreshing());

        gate.shutdown().await;
        assert!(gate.is_blocked("1.2.3.4"));
    }
}
