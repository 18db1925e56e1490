//! Studio roles.
//!
//! A [`Role`] is a named job function. It keys both task assignment
//! (who is expected to do the work) and capability lookup (what the
//! person may do in the tracker).
//!
//! The role set is closed. Anything a caller hands us that does not parse
//! to a [`Role`] is carried as [`RoleKey::Unknown`] so that permission
//! evaluation can fail closed instead of erroring.

use serde::{Deserialize, Serialize};

/// A job function within an architecture studio.
///
/// The serialized form is the display name (`"Principal Architect"`),
/// which is also what the seed files and config use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Studio lead; signs off on design and fees.
    #[serde(rename = "Principal Architect")]
    PrincipalArchitect,
    /// Runs schedule, budget and staffing for a project.
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Senior Architect")]
    SeniorArchitect,
    #[serde(rename = "Junior Architect")]
    JuniorArchitect,
    #[serde(rename = "Interior Designer")]
    InteriorDesigner,
    #[serde(rename = "Structural Engineer")]
    StructuralEngineer,
    /// External builder on site.
    #[serde(rename = "Contractor")]
    Contractor,
    /// The commissioning client.
    #[serde(rename = "Client")]
    Client,
}

impl Role {
    /// Every role, in table order.
    pub const ALL: [Role; 8] = [
        Role::PrincipalArchitect,
        Role::ProjectManager,
        Role::SeniorArchitect,
        Role::JuniorArchitect,
        Role::InteriorDesigner,
        Role::StructuralEngineer,
        Role::Contractor,
        Role::Client,
    ];

    /// Number of roles.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the display name, e.g. `"Project Manager"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrincipalArchitect => "Principal Architect",
            Self::ProjectManager => "Project Manager",
            Self::SeniorArchitect => "Senior Architect",
            Self::JuniorArchitect => "Junior Architect",
            Self::InteriorDesigner => "Interior Designer",
            Self::StructuralEngineer => "Structural Engineer",
            Self::Contractor => "Contractor",
            Self::Client => "Client",
        }
    }

    /// Dense index of this role in [`Role::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::PrincipalArchitect => 0,
            Self::ProjectManager => 1,
            Self::SeniorArchitect => 2,
            Self::JuniorArchitect => 3,
            Self::InteriorDesigner => 4,
            Self::StructuralEngineer => 5,
            Self::Contractor => 6,
            Self::Client => 7,
        }
    }

    /// Parses a role name.
    ///
    /// Case-insensitive; spaces, `-` and `_` are interchangeable, so
    /// `"Principal Architect"`, `"principal-architect"` and
    /// `"PRINCIPAL_ARCHITECT"` all parse.
    ///
    /// # Example
    ///
    /// ```
    /// use atelier_types::Role;
    ///
    /// assert_eq!(Role::parse("client"), Some(Role::Client));
    /// assert_eq!(Role::parse("project-manager"), Some(Role::ProjectManager));
    /// assert_eq!(Role::parse("Landscape Architect"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|role| normalize(role.as_str()) == wanted)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A role as selected by the caller.
///
/// Construction never fails: unrecognized names are kept verbatim in
/// [`RoleKey::Unknown`] and are granted nothing at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleKey {
    /// A role in the closed set.
    Known(Role),
    /// A name that is not a role.
    Unknown(String),
}

impl RoleKey {
    /// Parses a role name, keeping unknown names as [`RoleKey::Unknown`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match Role::parse(name) {
            Some(role) => Self::Known(role),
            None => Self::Unknown(name.to_string()),
        }
    }

    /// Returns the role if known.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Unknown(_) => None,
        }
    }

    /// Returns `true` if this key names a role in the closed set.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Role> for RoleKey {
    fn from(role: Role) -> Self {
        Self::Known(role)
    }
}

impl std::fmt::Display for RoleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(role) => write!(f, "{role}"),
            Self::Unknown(name) => write!(f, "{name} (unknown role)"),
        }
    }
}
