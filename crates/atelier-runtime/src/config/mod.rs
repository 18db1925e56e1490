//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. CLI flags (via ConfigResolver)          │  Per invocation
//! ├─────────────────────────────────────────────┤
//! │  2. Environment Variables (ATELIER_*)       │  Runtime override
//! ├─────────────────────────────────────────────┤
//! │  3. Project Config (.atelier/config.toml)   │  Studio-specific
//! ├─────────────────────────────────────────────┤
//! │  4. Global Config (~/.atelier/config.toml)  │  User defaults
//! ├─────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)           │  Fallback
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [viewer]
//! role = "Project Manager"
//! name = "Dana Kim"
//! admin = false
//!
//! [access]
//! simulation = "keep-admin-override"
//!
//! [access.permissions."Client"]
//! canViewFinancials = true
//!
//! [ui]
//! redaction_marker = "HIDDEN"
//!
//! [paths]
//! seed_file = "studio.json"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, NoOpResolver};
pub use types::{AccessConfig, AtelierConfig, PathsConfig, UiConfig, ViewerConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".atelier")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".atelier";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
