//! Permission primitives for atelier.
//!
//! # Model
//!
//! ```text
//! effective(viewer, cap) = admin_effective(viewer) || PermissionTable[role].grants(cap)
//! ```
//!
//! | Piece | Type | Role |
//! |-------|------|------|
//! | [`Capability`] | Bitflags | The four gated abilities (edit, upload, view financials, manage team) |
//! | [`PermissionTable`] | Struct | One [`RolePermissions`] row per [`Role`](atelier_types::Role) |
//! | [`Viewer`] | Struct | Who is acting: name, role, admin flag, simulation flag |
//! | [`AccessEvaluator`] | Struct | Table + admin override, fail-closed |
//! | [`Visibility`] | Enum | Shown / redacted / omitted presentation of gated data |
//! | [`StageScope`] | Struct | Which stages a viewer may see |
//! | [`AccessPolicy`] | Trait | Seam used by the runtime |
//!
//! # Crate Architecture
//!
//! ```text
//! atelier-types  (Role, Stage, ...)
//!     ↑
//! atelier-auth   ◄── THIS CRATE
//!     ↑
//! atelier-runtime (StudioState gates every mutation through AccessPolicy)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: unknown roles hold no capabilities
//! - **Stateless**: every decision is recomputed from its inputs
//! - **One code path**: admin override is an OR in front of the lookup

pub mod capability;
pub mod error;
pub mod evaluator;
pub mod permission;
pub mod policy;
pub mod stage;
pub mod viewer;
pub mod visibility;

pub use capability::Capability;
pub use error::AccessDenied;
pub use evaluator::AccessEvaluator;
pub use permission::{PermissionTable, RolePermissions};
pub use policy::AccessPolicy;
pub use stage::{is_participant, StageAccessReason, StageScope, PRIVILEGED_STAGE_ROLES};
pub use viewer::{names_match, SimulationPolicy, Viewer};
pub use visibility::{RedactionStyle, Visibility, REDACTION_MARKER};
