//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, ConnectInfo attached)
//!     → middleware/blocklist.rs (403 for denylisted peers)
//!     → server.rs forwarder (relay to upstream)
//!     → Send to client
//! ```

pub mod middleware;
pub mod response;
pub mod server;

pub use server::HttpServer;
