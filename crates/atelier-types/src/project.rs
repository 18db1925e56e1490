//! Project aggregate: projects, stages, tasks and documents.
//!
//! A [`Project`] owns its [`Stage`]s in lifecycle order, and each stage owns
//! its [`Task`]s and asset [`Document`]s. The aggregate is replaced as a whole
//! when edited; there are no partial-update contracts on these types.

use crate::{DocumentId, ProjectId, Role, StageId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall state of a project in the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    /// Parses a status name (case-insensitive, `on-hold`/`on_hold` accepted).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "planning" => Some(Self::Planning),
            "active" => Some(Self::Active),
            "onhold" => Some(Self::OnHold),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on hold",
            Self::Completed => "completed",
        })
    }
}

/// Money figures for a project, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSummary {
    /// Total billed to the client so far.
    pub invoiced: u64,
    /// Total received from the client.
    pub paid: u64,
    /// Studio costs booked against the project.
    pub expenses: u64,
}

impl FinancialSummary {
    /// Amount billed but not yet received.
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.invoiced.saturating_sub(self.paid)
    }
}

/// A design or construction phase project stages move through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StagePhase {
    Concept,
    SchematicDesign,
    DesignDevelopment,
    ConstructionDocuments,
    Construction,
    Handover,
}

impl StagePhase {
    /// All phases in lifecycle order.
    pub const SEQUENCE: [StagePhase; 6] = [
        StagePhase::Concept,
        StagePhase::SchematicDesign,
        StagePhase::DesignDevelopment,
        StagePhase::ConstructionDocuments,
        StagePhase::Construction,
        StagePhase::Handover,
    ];

    /// Human-readable phase name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::SchematicDesign => "Schematic Design",
            Self::DesignDevelopment => "Design Development",
            Self::ConstructionDocuments => "Construction Documents",
            Self::Construction => "Construction",
            Self::Handover => "Handover",
        }
    }
}

impl std::fmt::Display for StagePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Parses a status name (`in-progress`, `in_progress`, `inprogress`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pending" | "todo" => Some(Self::Pending),
            "inprogress" => Some(Self::InProgress),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        })
    }
}

/// Who a task is assigned to.
///
/// Every task is assigned to a role; `person` narrows it to a named
/// individual when one has been picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
}

impl Assignment {
    /// Assignment to a role with no specific person.
    #[must_use]
    pub fn role(role: Role) -> Self {
        Self { role, person: None }
    }

    /// Assignment to a named person holding `role`.
    #[must_use]
    pub fn person(role: Role, person: impl Into<String>) -> Self {
        Self {
            role,
            person: Some(person.into()),
        }
    }
}

/// A unit of work inside a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub assignee: Assignment,
    #[serde(default)]
    pub status: TaskStatus,
    pub due: NaiveDate,
}

impl Task {
    /// Creates a pending task with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>, assignee: Assignment, due: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            assignee,
            status: TaskStatus::Pending,
            due,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Returns `true` if the task is not completed and `today` is past its due date.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due < today
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Drawing,
    Specification,
    Contract,
    Photo,
    #[default]
    Other,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Drawing => "drawing",
            Self::Specification => "specification",
            Self::Contract => "contract",
            Self::Photo => "photo",
            Self::Other => "other",
        })
    }
}

/// An uploaded file attached to a project or a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub kind: DocumentKind,
    pub uploaded_by: String,
    #[serde(default)]
    pub size_bytes: u64,
}

impl Document {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: DocumentKind,
        uploaded_by: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            kind,
            uploaded_by: uploaded_by.into(),
            size_bytes,
        }
    }
}

/// One phase of a project.
///
/// `participants` names people granted visibility into this stage in
/// addition to whatever their role already allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: StageId,
    pub phase: StagePhase,
    pub name: String,
    #[serde(default)]
    pub status: StageStatus,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub assets: Vec<Document>,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Stage {
    /// Creates an empty pending stage named after its phase.
    #[must_use]
    pub fn new(phase: StagePhase) -> Self {
        Self {
            id: StageId::new(),
            phase,
            name: phase.label().to_string(),
            status: StageStatus::Pending,
            tasks: Vec::new(),
            assets: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Finds a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds a task by id, mutably.
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// A studio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Agreed budget in whole currency units.
    pub budget: u64,
    #[serde(default)]
    pub financials: FinancialSummary,
    /// Stages in lifecycle order.
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Who fills each role on this project. Not every role is staffed.
    #[serde(default)]
    pub team: BTreeMap<Role, String>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Project {
    /// Creates a planning-status project with no stages.
    #[must_use]
    pub fn new(name: impl Into<String>, client: impl Into<String>, budget: u64) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            client: client.into(),
            location: String::new(),
            status: ProjectStatus::Planning,
            budget,
            financials: FinancialSummary::default(),
            stages: Vec::new(),
            team: BTreeMap::new(),
            documents: Vec::new(),
        }
    }

    /// Creates a project with one pending stage per phase in [`StagePhase::SEQUENCE`].
    #[must_use]
    pub fn with_standard_stages(
        name: impl Into<String>,
        client: impl Into<String>,
        budget: u64,
    ) -> Self {
        let mut project = Self::new(name, client, budget);
        project.stages = StagePhase::SEQUENCE.into_iter().map(Stage::new).collect();
        project
    }

    #[must_use]
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn stage_mut(&mut self, id: StageId) -> Option<&mut Stage> {
        self.stages.iter_mut().find(|s| s.id == id)
    }

    /// Iterates over every task in every stage, in stage order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.stages.iter().flat_map(|s| s.tasks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn standard_stages_follow_phase_sequence() {
        let project = Project::with_standard_stages("Harbour House", "Moreno family", 1_200_000);
        let phases: Vec<_> = project.stages.iter().map(|s| s.phase).collect();
        assert_eq!(phases, StagePhase::SEQUENCE.to_vec());
        assert!(project
            .stages
            .iter()
            .all(|s| s.status == StageStatus::Pending));
    }

    #[test]
    fn outstanding_saturates() {
        let fin = FinancialSummary {
            invoiced: 100,
            paid: 150,
            expenses: 0,
        };
        assert_eq!(fin.outstanding(), 0);
    }

    #[test]
    fn overdue_ignores_completed_tasks() {
        let mut task = Task::new(
            "Site survey",
            Assignment::role(Role::SeniorArchitect),
            date(2026, 3, 1),
        );
        assert!(task.is_overdue(date(2026, 3, 2)));
        assert!(!task.is_overdue(date(2026, 3, 1)));

        task.status = TaskStatus::Completed;
        assert!(!task.is_overdue(date(2026, 3, 2)));
    }

    #[test]
    fn status_parsing() {
        assert_eq!(ProjectStatus::parse("on-hold"), Some(ProjectStatus::OnHold));
        assert_eq!(ProjectStatus::parse("Active"), Some(ProjectStatus::Active));
        assert_eq!(ProjectStatus::parse("cancelled"), None);
        assert_eq!(TaskStatus::parse("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Completed));
    }

    #[test]
    fn project_json_uses_camel_case_and_role_keys() {
        let mut project = Project::new("Cliff Studio", "Okafor", 450_000);
        project.team.insert(Role::ProjectManager, "Dana".to_string());
        let json = serde_json::to_value(&project).expect("serialize");

        assert_eq!(json["team"]["Project Manager"], "Dana");
        assert!(json.get("financials").is_some());

        let back: Project = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, project);
    }

    #[test]
    fn project_json_defaults_optional_fields() {
        let json = serde_json::json!({
            "id": ProjectId::new(),
            "name": "Minimal",
            "client": "Someone",
            "budget": 10
        });
        let project: Project = serde_json::from_value(json).expect("deserialize");
        assert!(project.stages.is_empty());
        assert!(project.team.is_empty());
        assert_eq!(project.status, ProjectStatus::Planning);
    }
}
