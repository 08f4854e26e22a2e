//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → gate.rs (peer IP checked against the denylist)
//!     → 403, or pass to the downstream handler
//! ```
//!
//! # Design Decisions
//! - The gate never starts without a loaded denylist
//! - Reload failures keep the last good list; they never reach clients
//! - No trust in client input: only the transport peer address is used

pub mod gate;

pub use gate::{Gate, GateError};
