//! The four capabilities a role can hold.
//!
//! | Capability | External name | Gates |
//! |------------|---------------|-------|
//! | [`EDIT`](Capability::EDIT) | `canEdit` | project, stage and task edits |
//! | [`UPLOAD`](Capability::UPLOAD) | `canUpload` | document and asset uploads |
//! | [`VIEW_FINANCIALS`](Capability::VIEW_FINANCIALS) | `canViewFinancials` | budgets, financial summaries, invoices |
//! | [`MANAGE_TEAM`](Capability::MANAGE_TEAM) | `canManageTeam` | roster and project staffing |
//!
//! The set is closed. The external names are the ones used in config files
//! and JSON output and must not change.
//!
//! # Example
//!
//! ```
//! use atelier_auth::Capability;
//!
//! let caps = Capability::EDIT | Capability::UPLOAD;
//! assert!(caps.contains(Capability::UPLOAD));
//! assert!(!caps.contains(Capability::VIEW_FINANCIALS));
//! assert_eq!(caps.to_string(), "canEdit | canUpload");
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// A set of capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capability: u8 {
        /// Edit projects, stages and tasks.
        const EDIT            = 0b0001;
        /// Upload documents and stage assets.
        const UPLOAD          = 0b0010;
        /// See budgets, financial summaries and invoices.
        const VIEW_FINANCIALS = 0b0100;
        /// Manage the roster and project staffing.
        const MANAGE_TEAM     = 0b1000;
    }
}

impl Capability {
    /// Every capability.
    pub const ALL: Self = Self::EDIT
        .union(Self::UPLOAD)
        .union(Self::VIEW_FINANCIALS)
        .union(Self::MANAGE_TEAM);

    /// The individual capabilities in table order.
    pub const EACH: [Capability; 4] = [
        Capability::EDIT,
        Capability::UPLOAD,
        Capability::VIEW_FINANCIALS,
        Capability::MANAGE_TEAM,
    ];

    /// External name of a single capability (`canEdit`, ...).
    ///
    /// Returns `None` for empty or multi-flag sets.
    #[must_use]
    pub fn external_name(self) -> Option<&'static str> {
        if self == Self::EDIT {
            Some("canEdit")
        } else if self == Self::UPLOAD {
            Some("canUpload")
        } else if self == Self::VIEW_FINANCIALS {
            Some("canViewFinancials")
        } else if self == Self::MANAGE_TEAM {
            Some("canManageTeam")
        } else {
            None
        }
    }

    /// External names of every capability in the set, in table order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        Self::EACH
            .into_iter()
            .filter(|cap| self.contains(*cap))
            .filter_map(Self::external_name)
            .collect()
    }

    /// Parses a capability name (case-insensitive).
    ///
    /// Accepts the external names plus short aliases.
    ///
    /// ```
    /// use atelier_auth::Capability;
    ///
    /// assert_eq!(Capability::parse("canEdit"), Some(Capability::EDIT));
    /// assert_eq!(Capability::parse("financials"), Some(Capability::VIEW_FINANCIALS));
    /// assert_eq!(Capability::parse("team"), Some(Capability::MANAGE_TEAM));
    /// assert_eq!(Capability::parse("delete"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "canedit" | "edit" => Some(Self::EDIT),
            "canupload" | "upload" => Some(Self::UPLOAD),
            "canviewfinancials" | "viewfinancials" | "financials" => Some(Self::VIEW_FINANCIALS),
            "canmanageteam" | "manageteam" | "team" => Some(Self::MANAGE_TEAM),
            "all" => Some(Self::ALL),
            _ => None,
        }
    }

    /// Parses a list of names into a combined set, reporting unknown names.
    ///
    /// ```
    /// use atelier_auth::Capability;
    ///
    /// let (caps, unknown) = Capability::parse_list(&["edit", "bogus", "upload"]);
    /// assert_eq!(caps, Capability::EDIT | Capability::UPLOAD);
    /// assert_eq!(unknown, vec!["bogus"]);
    /// ```
    #[must_use]
    pub fn parse_list<'a>(names: &[&'a str]) -> (Self, Vec<&'a str>) {
        let mut caps = Self::empty();
        let mut unknown = Vec::new();
        for name in names {
            match Self::parse(name) {
                Some(c) => caps |= c,
                None => unknown.push(*name),
            }
        }
        (caps, unknown)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
