//! Configuration management.
//!
//! Layered loading, lowest priority first:
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml` (not committed to version control)
//! 4. `STOREFRONT_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, LoggerSettings, ServerConfig, Settings, StorageBackend};
