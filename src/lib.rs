//! Blocklist gate for an HTTP reverse proxy.
//!
//! Requests whose peer IP appears in a periodically re-read blocklist file
//! get a 403; everything else passes to the downstream handler untouched.

pub mod blocklist;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use blocklist::{BlocklistStore, Snapshot};
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use security::{Gate, GateError};
