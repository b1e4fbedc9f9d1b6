//! Layered service configuration.
//!
//! Settings come from `config/default.toml`, `config/{environment}.toml`,
//! `config/local.toml` and finally `ORDERS_*` environment variables, in
//! increasing priority. Every section is validated after loading.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApiConfig, DatabaseConfig, LoggerSettings, ServerConfig, Settings};
