//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → consumed once at startup to build collaborators
//!
//! Secrets:
//!     AppConfig names environment variables
//!     → read at startup, absent = capability disabled
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AiConfig, AppConfig, EmailConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    RoutesConfig, StorageBackend, StorageConfig, TimeoutConfig,
};
