//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Gate (initial load) → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Stop refresh loop → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then the gate, then listeners
//! - Ordered shutdown: stop accept, drain, stop background tasks

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
