//! Access evaluation.
//!
//! ```text
//! effective(viewer, cap) = admin_effective(viewer) || table[viewer.role].grants(cap)
//! ```
//!
//! The admin check is a short-circuit OR in front of the table lookup, so
//! admin and restricted accounts go through the same code path. The
//! evaluator holds no mutable state: the same inputs always give the same
//! answer.
//!
//! # Example
//!
//! ```
//! use atelier_auth::{AccessEvaluator, Capability, Viewer};
//! use atelier_types::Role;
//!
//! let evaluator = AccessEvaluator::default();
//!
//! let client = Viewer::new(Role::Client);
//! assert!(!evaluator.allows(&client, Capability::VIEW_FINANCIALS));
//!
//! // Admin mode grants everything without touching the table
//! let admin = client.with_admin(true);
//! assert!(evaluator.allows(&admin, Capability::VIEW_FINANCIALS));
//! assert_eq!(evaluator.capabilities(&admin), Capability::ALL);
//! ```

use crate::{AccessDenied, Capability, PermissionTable, SimulationPolicy, StageScope, Viewer};
use atelier_types::Stage;

/// Combines the permission table with the admin override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessEvaluator {
    table: PermissionTable,
    simulation: SimulationPolicy,
}

impl AccessEvaluator {
    /// Creates an evaluator over `table` with the default simulation policy.
    #[must_use]
    pub fn new(table: PermissionTable) -> Self {
        Self {
            table,
            simulation: SimulationPolicy::default(),
        }
    }

    /// Returns a copy using `policy` for admin-while-simulating.
    #[must_use]
    pub fn with_simulation_policy(mut self, policy: SimulationPolicy) -> Self {
        self.simulation = policy;
        self
    }

    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    #[must_use]
    pub fn simulation_policy(&self) -> SimulationPolicy {
        self.simulation
    }

    /// Whether admin override applies to `viewer` under this evaluator's policy.
    #[must_use]
    pub fn is_admin_effective(&self, viewer: &Viewer) -> bool {
        viewer.admin_effective(self.simulation)
    }

    /// Returns `true` if `viewer` holds every capability in `cap`.
    ///
    /// Unknown roles hold nothing, so only admin override can grant them
    /// anything.
    #[must_use]
    pub fn allows(&self, viewer: &Viewer, cap: Capability) -> bool {
        let allowed =
            self.is_admin_effective(viewer) || self.table.get(viewer.role_key()).grants(cap);

        tracing::trace!(
            viewer = %viewer,
            capability = %cap,
            allowed,
            "capability evaluated"
        );

        allowed
    }

    /// The viewer's full effective capability set.
    #[must_use]
    pub fn capabilities(&self, viewer: &Viewer) -> Capability {
        if self.is_admin_effective(viewer) {
            Capability::ALL
        } else {
            self.table.get(viewer.role_key()).to_capabilities()
        }
    }

    /// Gate for an action: `Ok` if allowed, [`AccessDenied::CapabilityDenied`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::CapabilityDenied`] naming `operation` when
    /// the viewer lacks any capability in `cap`.
    pub fn require(
        &self,
        viewer: &Viewer,
        cap: Capability,
        operation: &str,
    ) -> Result<(), AccessDenied> {
        if self.allows(viewer, cap) {
            tracing::debug!(viewer = %viewer, operation, "action allowed");
            Ok(())
        } else {
            tracing::warn!(
                viewer = %viewer,
                operation,
                required = %cap,
                "action denied: capability not granted"
            );
            Err(AccessDenied::CapabilityDenied {
                operation: operation.to_string(),
                required: cap,
                role: viewer.role_key().clone(),
            })
        }
    }

    /// Stage scoping rules under this evaluator's simulation policy.
    #[must_use]
    pub fn stage_scope(&self) -> StageScope {
        StageScope::new(self.simulation)
    }

    /// Shorthand for `self.stage_scope().can_access(viewer, stage)`.
    #[must_use]
    pub fn can_access_stage(&self, viewer: &Viewer, stage: &Stage) -> bool {
        self.stage_scope().can_access(viewer, stage)
    }
}
