//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use atelier_auth::{AccessEvaluator, PermissionTable, RolePermissions, SimulationPolicy, Viewer};
use atelier_types::{Role, RoleKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use atelier_runtime::config::AtelierConfig;
///
/// let config = AtelierConfig::from_toml(r#"
/// [viewer]
/// role = "Project Manager"
///
/// [access.permissions."Client"]
/// canViewFinancials = true
/// "#).unwrap();
///
/// assert_eq!(config.viewer.role.as_deref(), Some("Project Manager"));
/// assert!(config.access.permissions["Client"].can_view_financials);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtelierConfig {
    /// Enable debug mode (debug-level logging).
    pub debug: bool,

    /// Permission table and admin behaviour.
    pub access: AccessConfig,

    /// Default acting account.
    pub viewer: ViewerConfig,

    /// Output configuration.
    pub ui: UiConfig,

    /// Path configuration.
    pub paths: PathsConfig,
}

impl AtelierConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default. Optional fields override whenever they
    /// are set, so a later layer can turn `viewer.admin` back off.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.access.merge(&other.access);
        self.viewer.merge(&other.viewer);
        self.ui.merge(&other.ui);
        self.paths.merge(&other.paths);
    }
}

/// `[access]` section.
///
/// ```toml
/// [access]
/// simulation = "suppress-admin-override"
///
/// [access.permissions."Senior Architect"]
/// canEdit = true
/// canUpload = true
/// canViewFinancials = true
/// ```
///
/// Each `permissions` entry replaces that role's whole row in the
/// studio default table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccessConfig {
    /// Whether admin override survives role simulation.
    pub simulation: SimulationPolicy,

    /// Per-role row overrides, keyed by role name.
    pub permissions: BTreeMap<String, RolePermissions>,
}

impl AccessConfig {
    fn merge(&mut self, other: &Self) {
        if other.simulation != SimulationPolicy::default() {
            self.simulation = other.simulation;
        }
        for (role, perms) in &other.permissions {
            self.permissions.insert(role.clone(), *perms);
        }
    }

    /// Builds the permission table: studio defaults plus overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRole`] if an override names a role
    /// outside the closed set.
    pub fn permission_table(&self) -> Result<PermissionTable, ConfigError> {
        let mut table = PermissionTable::studio_default();
        for (name, perms) in &self.permissions {
            let role = Role::parse(name).ok_or_else(|| ConfigError::unknown_role(name))?;
            table.set(role, *perms);
        }
        Ok(table)
    }

    /// Builds the evaluator for this configuration.
    ///
    /// # Errors
    ///
    /// See [`permission_table`](Self::permission_table).
    pub fn evaluator(&self) -> Result<AccessEvaluator, ConfigError> {
        Ok(AccessEvaluator::new(self.permission_table()?).with_simulation_policy(self.simulation))
    }
}

/// `[viewer]` section: who the CLI acts as when no flags are given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Role name. Unset means [`Role::Client`], the most restricted role.
    pub role: Option<String>,

    /// Person name for participant and assignee matching.
    pub name: Option<String>,

    /// Admin account mode. A later layer may set it either way.
    pub admin: Option<bool>,

    /// Admin is previewing `role`.
    pub simulate: Option<bool>,
}

impl ViewerConfig {
    fn merge(&mut self, other: &Self) {
        if other.role.is_some() {
            self.role.clone_from(&other.role);
        }
        if other.name.is_some() {
            self.name.clone_from(&other.name);
        }
        if other.admin.is_some() {
            self.admin = other.admin;
        }
        if other.simulate.is_some() {
            self.simulate = other.simulate;
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin.unwrap_or(false)
    }

    #[must_use]
    pub fn is_simulating(&self) -> bool {
        self.simulate.unwrap_or(false)
    }

    /// Builds the viewer. Unknown role names are kept and fail closed.
    #[must_use]
    pub fn to_viewer(&self) -> Viewer {
        let role = self
            .role
            .as_deref()
            .map_or(RoleKey::Known(Role::Client), RoleKey::parse);
        let viewer = Viewer::new(role)
            .with_admin(self.is_admin())
            .with_simulation(self.is_simulating());
        match &self.name {
            Some(name) => viewer.with_name(name.clone()),
            None => viewer,
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Info-level logging on the terminal.
    pub verbose: bool,

    /// Text shown in place of redacted values.
    pub redaction_marker: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            redaction_marker: atelier_auth::REDACTION_MARKER.to_string(),
        }
    }
}

impl UiConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.verbose != default.verbose {
            self.verbose = other.verbose;
        }
        if other.redaction_marker != default.redaction_marker {
            self.redaction_marker.clone_from(&other.redaction_marker);
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON seed file. When unset the built-in sample portfolio is used.
    pub seed_file: Option<PathBuf>,
}

impl PathsConfig {
    fn merge(&mut self, other: &Self) {
        if other.seed_file.is_some() {
            self.seed_file.clone_from(&other.seed_file);
        }
    }
}
