//! Denylist subsystem.
//!
//! # Data Flow
//! ```text
//! blocklist file (one identifier per line)
//!     → snapshot.rs (read, trim, dedupe into an immutable set)
//!     → store.rs (atomic swap of Arc<Snapshot>)
//!     ← concurrent lookups from the gate middleware
//!
//! Every refresh interval:
//!     refresh.rs loads a fresh snapshot
//!     → on success: store.replace()
//!     → on failure: reporter.rs is notified, old snapshot stays current
//! ```
//!
//! # Design Decisions
//! - Building a snapshot never touches shared state; only the pointer swap does
//! - Lookups are lock-free (`ArcSwap` guard) and never wait on disk I/O
//! - Exact string membership: no CIDR, no IP syntax validation

pub mod refresh;
pub mod reporter;
pub mod snapshot;
pub mod store;

pub use refresh::RefreshLoop;
pub use reporter::{ReloadReporter, TracingReporter};
pub use snapshot::{BlocklistError, Snapshot};
pub use store::BlocklistStore;
