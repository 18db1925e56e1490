//! Access denied error type.
//!
//! Evaluation itself never fails: [`AccessEvaluator::allows`](crate::AccessEvaluator::allows)
//! returns `false`. [`AccessDenied`] is what gated *actions* return when
//! the caller goes through [`AccessEvaluator::require`](crate::AccessEvaluator::require)
//! or a stage check.

use crate::Capability;
use atelier_types::{ErrorCode, RoleKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The viewer's role does not grant a required capability.
    #[error("'{operation}' requires {required}, not granted to {role}")]
    CapabilityDenied {
        /// The operation that was attempted.
        operation: String,
        /// The capabilities the operation needs.
        required: Capability,
        /// The role the viewer acted as.
        role: RoleKey,
    },

    /// The viewer is outside a stage's scope.
    #[error("stage '{stage}' is not visible to {viewer}")]
    StageDenied {
        /// Stage name.
        stage: String,
        /// Display form of the viewer.
        viewer: String,
    },
}

impl AccessDenied {
    /// Which check denied access: `"capability"` or `"stage"`.
    #[must_use]
    pub fn layer(&self) -> &'static str {
        match self {
            Self::CapabilityDenied { .. } => "capability",
            Self::StageDenied { .. } => "stage",
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::CapabilityDenied { .. } => "ACCESS_CAPABILITY_DENIED",
            Self::StageDenied { .. } => "ACCESS_STAGE_DENIED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
