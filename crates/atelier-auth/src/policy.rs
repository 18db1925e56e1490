//! Access policy trait.
//!
//! [`AccessPolicy`] is the seam between the runtime and permission
//! decisions. The runtime's state store only talks to this trait, so tests
//! and alternative deployments can swap in their own rules.
//!
//! ```text
//! AccessPolicy trait (THIS)
//!      │
//!      ├── AccessEvaluator   <- permission table + admin override + stage scope
//!      └── test doubles (permissive / deny-all)
//! ```

use crate::{AccessDenied, AccessEvaluator, Capability, StageAccessReason, Viewer};
use atelier_types::Stage;

/// Capability and stage decisions for a viewer.
///
/// # Example
///
/// ```
/// use atelier_auth::{AccessPolicy, Capability, StageAccessReason, Viewer};
/// use atelier_types::{Role, Stage};
///
/// struct ReadOnly;
///
/// impl AccessPolicy for ReadOnly {
///     fn allows(&self, _viewer: &Viewer, _cap: Capability) -> bool {
///         false
///     }
///
///     fn stage_access(&self, _viewer: &Viewer, _stage: &Stage) -> Option<StageAccessReason> {
///         Some(StageAccessReason::PrivilegedRole)
///     }
/// }
///
/// let viewer = Viewer::new(Role::PrincipalArchitect);
/// assert!(!ReadOnly.can_edit(&viewer));
/// assert!(ReadOnly.require(&viewer, Capability::EDIT, "rename project").is_err());
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Returns `true` if the viewer holds every capability in `cap`.
    fn allows(&self, viewer: &Viewer, cap: Capability) -> bool;

    /// Returns why the viewer can see `stage`, or `None`.
    fn stage_access(&self, viewer: &Viewer, stage: &Stage) -> Option<StageAccessReason>;

    fn can_edit(&self, viewer: &Viewer) -> bool {
        self.allows(viewer, Capability::EDIT)
    }

    fn can_upload(&self, viewer: &Viewer) -> bool {
        self.allows(viewer, Capability::UPLOAD)
    }

    fn can_view_financials(&self, viewer: &Viewer) -> bool {
        self.allows(viewer, Capability::VIEW_FINANCIALS)
    }

    fn can_manage_team(&self, viewer: &Viewer) -> bool {
        self.allows(viewer, Capability::MANAGE_TEAM)
    }

    fn can_access_stage(&self, viewer: &Viewer, stage: &Stage) -> bool {
        self.stage_access(viewer, stage).is_some()
    }

    /// Gate for an action.
    ///
    /// # Default Implementation
    ///
    /// Wraps [`allows`](Self::allows) and builds
    /// [`AccessDenied::CapabilityDenied`] on refusal.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::CapabilityDenied`] when `cap` is not held.
    fn require(&self, viewer: &Viewer, cap: Capability, operation: &str) -> Result<(), AccessDenied> {
        if self.allows(viewer, cap) {
            Ok(())
        } else {
            Err(AccessDenied::CapabilityDenied {
                operation: operation.to_string(),
                required: cap,
                role: viewer.role_key().clone(),
            })
        }
    }

    /// Gate for a stage-scoped action.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::StageDenied`] when the stage is out of scope.
    fn require_stage(&self, viewer: &Viewer, stage: &Stage) -> Result<StageAccessReason, AccessDenied> {
        self.stage_access(viewer, stage)
            .ok_or_else(|| AccessDenied::StageDenied {
                stage: stage.name.clone(),
                viewer: viewer.to_string(),
            })
    }
}

impl AccessPolicy for AccessEvaluator {
    fn allows(&self, viewer: &Viewer, cap: Capability) -> bool {
        AccessEvaluator::allows(self, viewer, cap)
    }

    fn stage_access(&self, viewer: &Viewer, stage: &Stage) -> Option<StageAccessReason> {
        self.stage_scope().check(viewer, stage)
    }

    fn require(&self, viewer: &Viewer, cap: Capability, operation: &str) -> Result<(), AccessDenied> {
        AccessEvaluator::require(self, viewer, cap, operation)
    }

    fn require_stage(&self, viewer: &Viewer, stage: &Stage) -> Result<StageAccessReason, AccessDenied> {
        self.stage_scope().require(viewer, stage)
    }
}
