//! Role permission table.
//!
//! [`PermissionTable`] maps every [`Role`] to exactly one
//! [`RolePermissions`] row. Rows are stored in a fixed array indexed by
//! [`Role::index`], so a missing or duplicated role cannot be expressed,
//! and [`PermissionTable::studio_default`] is an exhaustive `match`: adding
//! a role to the enum does not compile until its row is written.
//!
//! Lookups by [`RoleKey`] fail closed: an unknown role gets
//! [`RolePermissions::NONE`].

use crate::Capability;
use atelier_types::{Role, RoleKey};
use serde::{Deserialize, Serialize};

/// The four capability flags of one role.
///
/// Serialized with the external capability names:
///
/// ```
/// use atelier_auth::RolePermissions;
///
/// let perms = RolePermissions { can_edit: true, ..RolePermissions::NONE };
/// let json = serde_json::to_value(perms).unwrap();
/// assert_eq!(json["canEdit"], true);
/// assert_eq!(json["canManageTeam"], false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePermissions {
    pub can_edit: bool,
    pub can_upload: bool,
    pub can_view_financials: bool,
    pub can_manage_team: bool,
}

impl RolePermissions {
    /// Grants nothing.
    pub const NONE: Self = Self {
        can_edit: false,
        can_upload: false,
        can_view_financials: false,
        can_manage_team: false,
    };

    /// Grants everything.
    pub const ALL: Self = Self {
        can_edit: true,
        can_upload: true,
        can_view_financials: true,
        can_manage_team: true,
    };

    /// Returns `true` if every capability in `cap` is granted.
    ///
    /// An empty `cap` is trivially granted.
    #[must_use]
    pub fn grants(&self, cap: Capability) -> bool {
        self.to_capabilities().contains(cap)
    }

    /// Converts the row to a capability set.
    #[must_use]
    pub fn to_capabilities(self) -> Capability {
        let mut caps = Capability::empty();
        caps.set(Capability::EDIT, self.can_edit);
        caps.set(Capability::UPLOAD, self.can_upload);
        caps.set(Capability::VIEW_FINANCIALS, self.can_view_financials);
        caps.set(Capability::MANAGE_TEAM, self.can_manage_team);
        caps
    }

    /// Builds a row from a capability set.
    #[must_use]
    pub fn from_capabilities(caps: Capability) -> Self {
        Self {
            can_edit: caps.contains(Capability::EDIT),
            can_upload: caps.contains(Capability::UPLOAD),
            can_view_financials: caps.contains(Capability::VIEW_FINANCIALS),
            can_manage_team: caps.contains(Capability::MANAGE_TEAM),
        }
    }
}

impl From<Capability> for RolePermissions {
    fn from(caps: Capability) -> Self {
        Self::from_capabilities(caps)
    }
}

/// Role → permissions mapping with one row per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    rows: [RolePermissions; Role::COUNT],
}

impl PermissionTable {
    /// The studio's standard permission matrix.
    ///
    /// | Role | edit | upload | financials | team |
    /// |------|------|--------|------------|------|
    /// | Principal Architect | ✓ | ✓ | ✓ | ✓ |
    /// | Project Manager | ✓ | ✓ | ✓ | ✓ |
    /// | Senior Architect | ✓ | ✓ | | |
    /// | Junior Architect | | ✓ | | |
    /// | Interior Designer | ✓ | ✓ | | |
    /// | Structural Engineer | | ✓ | | |
    /// | Contractor | | ✓ | | |
    /// | Client | | | | |
    #[must_use]
    pub fn studio_default() -> Self {
        let mut rows = [RolePermissions::NONE; Role::COUNT];
        for role in Role::ALL {
            rows[role.index()] = default_row(role);
        }
        Self { rows }
    }

    /// A table that grants nothing to anyone.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            rows: [RolePermissions::NONE; Role::COUNT],
        }
    }

    /// Row for a known role.
    #[must_use]
    pub fn for_role(&self, role: Role) -> RolePermissions {
        self.rows[role.index()]
    }

    /// Row for a caller-selected role key. Unknown roles get [`RolePermissions::NONE`].
    #[must_use]
    pub fn get(&self, key: &RoleKey) -> RolePermissions {
        match key.role() {
            Some(role) => self.for_role(role),
            None => RolePermissions::NONE,
        }
    }

    /// Replaces one role's row.
    pub fn set(&mut self, role: Role, perms: RolePermissions) {
        self.rows[role.index()] = perms;
    }

    /// Returns a copy with one role's row replaced.
    #[must_use]
    pub fn with_override(mut self, role: Role, perms: RolePermissions) -> Self {
        self.set(role, perms);
        self
    }

    /// Iterates rows in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, RolePermissions)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.for_role(role)))
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::studio_default()
    }
}

fn default_row(role: Role) -> RolePermissions {
    let caps = match role {
        Role::PrincipalArchitect | Role::ProjectManager => Capability::ALL,
        Role::SeniorArchitect | Role::InteriorDesigner => Capability::EDIT | Capability::UPLOAD,
        Role::JuniorArchitect | Role::StructuralEngineer | Role::Contractor => Capability::UPLOAD,
        Role::Client => Capability::empty(),
    };
    RolePermissions::from_capabilities(caps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_row() {
        let table = PermissionTable::studio_default();
        let roles: Vec<Role> = table.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
    }

    #[test]
    fn default_matrix() {
        let table = PermissionTable::studio_default();
        assert_eq!(table.for_role(Role::PrincipalArchitect), RolePermissions::ALL);
        assert_eq!(table.for_role(Role::ProjectManager), RolePermissions::ALL);
        assert_eq!(table.for_role(Role::Client), RolePermissions::NONE);

        let senior = table.for_role(Role::SeniorArchitect);
        assert!(senior.can_edit && senior.can_upload);
        assert!(!senior.can_view_financials && !senior.can_manage_team);

        let contractor = table.for_role(Role::Contractor);
        assert_eq!(contractor.to_capabilities(), Capability::UPLOAD);
    }

    #[test]
    fn unknown_role_fails_closed() {
        let table = PermissionTable::studio_default();
        let key = RoleKey::parse("Landscape Architect");
        assert_eq!(table.get(&key), RolePermissions::NONE);
    }

    #[test]
    fn override_replaces_whole_row() {
        let table = PermissionTable::studio_default().with_override(
            Role::Client,
            RolePermissions {
                can_view_financials: true,
                ..RolePermissions::NONE
            },
        );
        let client = table.for_role(Role::Client);
        assert!(client.can_view_financials);
        assert!(!client.can_edit);
        // Other rows untouched
        assert_eq!(table.for_role(Role::PrincipalArchitect), RolePermissions::ALL);
    }

    #[test]
    fn capability_conversion_round_trips() {
        for bits in 0..=Capability::ALL.bits() {
            let caps = Capability::from_bits_truncate(bits);
            assert_eq!(RolePermissions::from(caps).to_capabilities(), caps);
        }
    }

    #[test]
    fn grants_requires_every_flag() {
        let perms = RolePermissions {
            can_edit: true,
            ..RolePermissions::NONE
        };
        assert!(perms.grants(Capability::EDIT));
        assert!(!perms.grants(Capability::EDIT | Capability::UPLOAD));
    }

    #[test]
    fn deserialize_missing_fields_default_false() {
        let perms: RolePermissions =
            serde_json::from_str(r#"{"canUpload": true}"#).expect("deserialize");
        assert_eq!(perms.to_capabilities(), Capability::UPLOAD);
    }
}
