//! The shared reference cell holding the current denylist snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::blocklist::snapshot::Snapshot;

/// Holds exactly one visible [`Snapshot`] and swaps it wholesale on reload.
///
/// Readers never block: [`contains`](Self::contains) takes a lock-free guard
/// on whichever snapshot is current at that instant.
#[derive(Debug)]
pub struct BlocklistStore {
    current: ArcSwap<Snapshot>,
}

impl BlocklistStore {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Make `snapshot` the one every subsequent lookup sees.
    ///
    /// Returns the snapshot that was replaced.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        self.current.swap(Arc::new(snapshot))
    }

    /// Exact membership check against the current snapshot.
    pub fn contains(&self, identifier: &str) -> bool {
        self.current.load().contains(identifier)
    }

    /// The current snapshot, for callers needing several consistent reads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }
}

impl Default for BlocklistStore {
    fn default() -> Self {
        Self::new(Snapshot::empty())
    }
}
