//! Core domain types for atelier.
//!
//! atelier tracks architecture-studio projects through a fixed sequence of
//! design and construction phases. This crate holds the plain data: roles,
//! identifiers, the project aggregate, staff and billing records.
//!
//! # Crate Architecture
//!
//! ```text
//! atelier-types    : Role, ids, Project/Stage/Task, ErrorCode  ◄── HERE
//!     ↑
//! atelier-auth     : permission table, evaluator, visibility, stage scope
//!     ↑
//! atelier-runtime  : config, in-memory studio state, aggregations, seed
//!     ↑
//! atelier-cli      : `atelier` binary
//! ```
//!
//! No permission logic lives here. A [`Role`] is just a name; what it may do
//! is decided in `atelier-auth`.
//!
//! # Example
//!
//! ```
//! use atelier_types::{Assignment, Project, Role, StagePhase, Task};
//! use chrono::NaiveDate;
//!
//! let mut project = Project::with_standard_stages("Harbour House", "Moreno family", 1_200_000);
//! project.team.insert(Role::ProjectManager, "Dana Kim".to_string());
//!
//! let due = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
//! project.stages[0]
//!     .tasks
//!     .push(Task::new("Massing study", Assignment::role(Role::SeniorArchitect), due));
//!
//! assert_eq!(project.stages[0].phase, StagePhase::Concept);
//! assert_eq!(project.tasks().count(), 1);
//! ```

mod error;
mod id;
mod project;
mod role;
mod team;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{DocumentId, InvoiceId, MemberId, ParseIdError, ProjectId, StageId, TaskId};
pub use project::{
    Assignment, Document, DocumentKind, FinancialSummary, Project, ProjectStatus, Stage,
    StagePhase, StageStatus, Task, TaskStatus,
};
pub use role::{Role, RoleKey};
pub use team::{Invoice, InvoiceStatus, TeamMember};
