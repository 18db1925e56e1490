//! The acting account.
//!
//! A [`Viewer`] combines:
//!
//! - **Who**: an optional person name, used for stage participation and
//!   task assignment matching
//! - **Which role**: the selected [`RoleKey`]
//! - **Account mode**: the admin flag, orthogonal to the role
//! - **Simulation**: whether an admin is previewing the selected role
//!
//! Viewers are immutable values. The `with_*` methods return new viewers.

use atelier_types::{Role, RoleKey};
use serde::{Deserialize, Serialize};

/// How the admin flag interacts with role simulation.
///
/// An admin can also select a restricted role to preview what that role
/// sees. Whether admin override still applies while previewing is a
/// product decision, so it is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationPolicy {
    /// Admin override applies even while simulating a role.
    #[default]
    KeepAdminOverride,
    /// While simulating, the admin flag is ignored and the viewer gets
    /// exactly the simulated role's permissions.
    SuppressAdminOverride,
}

impl SimulationPolicy {
    /// Parses `keep-admin-override` / `suppress-admin-override` (also `keep` / `suppress`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "keep-admin-override" | "keep" => Some(Self::KeepAdminOverride),
            "suppress-admin-override" | "suppress" | "preview" => {
                Some(Self::SuppressAdminOverride)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for SimulationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::KeepAdminOverride => "keep-admin-override",
            Self::SuppressAdminOverride => "suppress-admin-override",
        })
    }
}

/// The account performing reads and actions.
///
/// # Example
///
/// ```
/// use atelier_auth::Viewer;
/// use atelier_types::Role;
///
/// let client = Viewer::new(Role::Client).with_name("Lena Moreno");
/// assert!(!client.is_admin());
///
/// let admin = client.with_admin(true);
/// assert!(admin.is_admin());
/// assert!(!client.is_admin()); // original unchanged
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    role: RoleKey,
    #[serde(default)]
    admin: bool,
    #[serde(default)]
    simulating: bool,
}

impl Viewer {
    /// Creates a restricted (non-admin) viewer with the given role.
    #[must_use]
    pub fn new(role: impl Into<RoleKey>) -> Self {
        Self {
            name: None,
            role: role.into(),
            admin: false,
            simulating: false,
        }
    }

    /// Creates an admin viewer.
    #[must_use]
    pub fn admin(role: impl Into<RoleKey>) -> Self {
        Self::new(role).with_admin(true)
    }

    /// Returns a copy with the person name set.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with a different selected role.
    #[must_use]
    pub fn with_role(&self, role: impl Into<RoleKey>) -> Self {
        Self {
            role: role.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with the admin flag set.
    #[must_use]
    pub fn with_admin(&self, admin: bool) -> Self {
        Self {
            admin,
            ..self.clone()
        }
    }

    /// Returns a copy with role simulation switched on or off.
    #[must_use]
    pub fn with_simulation(&self, simulating: bool) -> Self {
        Self {
            simulating,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn role_key(&self) -> &RoleKey {
        &self.role
    }

    /// The selected role, if it is in the closed set.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.role()
    }

    /// The raw admin flag, before any [`SimulationPolicy`] is applied.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    #[must_use]
    pub fn is_simulating(&self) -> bool {
        self.simulating
    }

    /// Admin flag after applying `policy`.
    #[must_use]
    pub fn admin_effective(&self, policy: SimulationPolicy) -> bool {
        match policy {
            SimulationPolicy::KeepAdminOverride => self.admin,
            SimulationPolicy::SuppressAdminOverride => self.admin && !self.simulating,
        }
    }

    /// Returns `true` if `person` names this viewer (trimmed, case-insensitive).
    #[must_use]
    pub fn is_named(&self, person: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| names_match(name, person))
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.role)?,
            None => write!(f, "{}", self.role)?,
        }
        if self.admin {
            write!(f, " [admin")?;
            if self.simulating {
                write!(f, ", simulating")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Person-name comparison used for participant and assignee matching.
///
/// Trimmed and case-insensitive over full Unicode, so accented names
/// match regardless of case.
///
/// ```
/// use atelier_auth::names_match;
///
/// assert!(names_match(" Tomás Reis", "TOMÁS REIS"));
/// assert!(!names_match("", ""));
/// ```
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim();
    let b = b.trim();
    !a.is_empty() && (a == b || a.to_lowercase() == b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_is_restricted() {
        let viewer = Viewer::new(Role::SeniorArchitect);
        assert!(!viewer.is_admin());
        assert!(!viewer.is_simulating());
        assert_eq!(viewer.role(), Some(Role::SeniorArchitect));
        assert_eq!(viewer.name(), None);
    }

    #[test]
    fn builders_do_not_mutate_original() {
        let base = Viewer::new(Role::Client);
        let named = base.with_name("Lena");
        let admin = named.with_admin(true);
        let other = admin.with_role(Role::Contractor);

        assert_eq!(base.name(), None);
        assert_eq!(named.name(), Some("Lena"));
        assert!(!named.is_admin());
        assert!(admin.is_admin());
        assert_eq!(admin.role(), Some(Role::Client));
        assert_eq!(other.role(), Some(Role::Contractor));
        assert_eq!(other.name(), Some("Lena"));
    }

    #[test]
    fn admin_effective_under_each_policy() {
        let admin = Viewer::admin(Role::Client);
        let previewing = admin.with_simulation(true);

        assert!(admin.admin_effective(SimulationPolicy::KeepAdminOverride));
        assert!(admin.admin_effective(SimulationPolicy::SuppressAdminOverride));
        assert!(previewing.admin_effective(SimulationPolicy::KeepAdminOverride));
        assert!(!previewing.admin_effective(SimulationPolicy::SuppressAdminOverride));
    }

    #[test]
    fn simulating_without_admin_is_just_restricted() {
        let viewer = Viewer::new(Role::Client).with_simulation(true);
        assert!(!viewer.admin_effective(SimulationPolicy::KeepAdminOverride));
        assert!(!viewer.admin_effective(SimulationPolicy::SuppressAdminOverride));
    }

    #[test]
    fn name_matching_is_trimmed_and_case_insensitive() {
        let viewer = Viewer::new(Role::Contractor).with_name("Sam Ortiz");
        assert!(viewer.is_named("sam ortiz"));
        assert!(viewer.is_named("  Sam Ortiz "));
        assert!(!viewer.is_named("Sam"));
        assert!(!Viewer::new(Role::Contractor).is_named("Sam Ortiz"));

        let tomas = Viewer::new(Role::JuniorArchitect).with_name("TOMÁS REIS");
        assert!(tomas.is_named("Tomás Reis"));
        assert!(!tomas.is_named("Tomas Reis"));
        assert!(!names_match("", ""));
    }

    #[test]
    fn policy_parse_and_display() {
        for policy in [
            SimulationPolicy::KeepAdminOverride,
            SimulationPolicy::SuppressAdminOverride,
        ] {
            assert_eq!(SimulationPolicy::parse(&policy.to_string()), Some(policy));
        }
        assert_eq!(
            SimulationPolicy::parse("suppress"),
            Some(SimulationPolicy::SuppressAdminOverride)
        );
        assert_eq!(SimulationPolicy::parse("sometimes"), None);
    }

    #[test]
    fn display_marks_admin_and_simulation() {
        let viewer = Viewer::admin(Role::Client)
            .with_name("Ivo")
            .with_simulation(true);
        assert_eq!(viewer.to_string(), "Ivo (Client) [admin, simulating]");
        assert_eq!(Viewer::new(Role::Contractor).to_string(), "Contractor");
    }
}
