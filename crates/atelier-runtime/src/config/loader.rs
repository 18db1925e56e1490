//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.atelier/config.toml`)
//! 3. Project config (`.atelier/config.toml`)
//! 4. Environment variables (`ATELIER_*`)
//!
//! Each layer overrides the previous.

use super::{
    default_config_path, AtelierConfig, ConfigError, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use atelier_auth::SimulationPolicy;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    (Some $field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = Some(
                parse_bool(&val)
                    .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?,
            );
        }
    };
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use atelier_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/studio")
///     .skip_env_vars()
///     .load()
///     .expect("config loads");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.atelier/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.atelier/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any config file exists but cannot be parsed,
    /// or an `ATELIER_*` variable holds an invalid value.
    /// Missing config files are silently ignored.
    pub fn load(&self) -> Result<AtelierConfig, ConfigError> {
        let mut config = AtelierConfig::default();

        // Layer 1: Global config
        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global_config) = self.load_file(&global_path)? {
                debug!(path = %global_path.display(), "Loaded global config");
                config.merge(&global_config);
            }
        }

        // Layer 2: Project config
        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                let project_config_path = project_root
                    .join(PROJECT_CONFIG_DIR)
                    .join(PROJECT_CONFIG_FILE);

                if let Some(project_config) = self.load_file(&project_config_path)? {
                    debug!(
                        path = %project_config_path.display(),
                        project = %project_root.display(),
                        "Loaded project config"
                    );
                    config.merge(&project_config);
                }
            }
        }

        // Layer 3: Environment variables
        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }

    /// Loads a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &Path) -> Result<Option<AtelierConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config =
            AtelierConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        Ok(Some(config))
    }
}

/// Applies `ATELIER_*` overrides.
///
/// | Variable | Field |
/// |----------|-------|
/// | `ATELIER_DEBUG` | `debug` |
/// | `ATELIER_VERBOSE` | `ui.verbose` |
/// | `ATELIER_ADMIN` | `viewer.admin` |
/// | `ATELIER_SIMULATE` | `viewer.simulate` |
/// | `ATELIER_ROLE` | `viewer.role` |
/// | `ATELIER_NAME` | `viewer.name` |
/// | `ATELIER_SIMULATION` | `access.simulation` |
/// | `ATELIER_SEED` | `paths.seed_file` |
fn apply_env_vars(config: &mut AtelierConfig) -> Result<(), ConfigError> {
    parse_env_bool!(config.debug, "ATELIER_DEBUG");
    parse_env_bool!(config.ui.verbose, "ATELIER_VERBOSE");
    parse_env_bool!(Some config.viewer.admin, "ATELIER_ADMIN");
    parse_env_bool!(Some config.viewer.simulate, "ATELIER_SIMULATE");

    if let Ok(val) = std::env::var("ATELIER_ROLE") {
        config.viewer.role = Some(val);
    }
    if let Ok(val) = std::env::var("ATELIER_NAME") {
        config.viewer.name = Some(val);
    }
    if let Ok(val) = std::env::var("ATELIER_SIMULATION") {
        config.access.simulation = SimulationPolicy::parse(&val).ok_or_else(|| {
            ConfigError::invalid_env_var(
                "ATELIER_SIMULATION",
                "expected keep-admin-override or suppress-admin-override",
            )
        })?;
    }
    if let Ok(val) = std::env::var("ATELIER_SEED") {
        config.paths.seed_file = Some(PathBuf::from(val));
    }

    Ok(())
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
