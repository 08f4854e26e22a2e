//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to the gate and the HTTP server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the blocklist contents reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BlocklistConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, TimeoutConfig,
    UpstreamConfig,
};
