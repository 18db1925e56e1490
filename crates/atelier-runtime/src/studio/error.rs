//! Studio state errors.
//!
//! # Error Codes
//!
//! | Variant | Code | Recoverable |
//! |---------|------|-------------|
//! | [`StateError::Access`] | `STATE_ACCESS_DENIED` | No |
//! | [`StateError::ProjectNotFound`] | `STATE_PROJECT_NOT_FOUND` | No |
//! | [`StateError::StageNotFound`] | `STATE_STAGE_NOT_FOUND` | No |
//! | [`StateError::TaskNotFound`] | `STATE_TASK_NOT_FOUND` | No |
//! | [`StateError::MemberNotFound`] | `STATE_MEMBER_NOT_FOUND` | No |
//! | [`StateError::InvoiceNotFound`] | `STATE_INVOICE_NOT_FOUND` | No |
//! | [`StateError::DuplicateProject`] | `STATE_DUPLICATE_PROJECT` | No |

use atelier_auth::AccessDenied;
use atelier_types::{ErrorCode, InvoiceId, MemberId, ProjectId, StageId, TaskId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The viewer lacks a capability or is outside the stage's scope.
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// No project matches the id or name.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("stage {stage} not found in project {project}")]
    StageNotFound { project: ProjectId, stage: StageId },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("team member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// A project with this id is already tracked.
    #[error("project already exists: {0}")]
    DuplicateProject(ProjectId),
}

impl StateError {
    /// Shorthand for a missing project looked up by id.
    #[must_use]
    pub fn project_not_found(id: ProjectId) -> Self {
        Self::ProjectNotFound(id.to_string())
    }

    /// Returns `true` if this is a permission failure rather than a lookup failure.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Access(_))
    }
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Access(_) => "STATE_ACCESS_DENIED",
            Self::ProjectNotFound(_) => "STATE_PROJECT_NOT_FOUND",
            Self::StageNotFound { .. } => "STATE_STAGE_NOT_FOUND",
            Self::TaskNotFound(_) => "STATE_TASK_NOT_FOUND",
            Self::MemberNotFound(_) => "STATE_MEMBER_NOT_FOUND",
            Self::InvoiceNotFound(_) => "STATE_INVOICE_NOT_FOUND",
            Self::DuplicateProject(_) => "STATE_DUPLICATE_PROJECT",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
