//! Read models handed to presentation.
//!
//! Views are built per viewer. Money fields are [`Visibility`] values and
//! stages outside the viewer's scope are left out entirely, so a view can
//! be printed or serialized as-is.

use crate::progress::{completion, current_of, stage_progress};
use atelier_auth::{AccessPolicy, RedactionStyle, StageAccessReason, Viewer, Visibility};
use atelier_types::{
    Document, FinancialSummary, Project, ProjectId, ProjectStatus, Role, Stage, StageId,
    StagePhase, StageStatus, Task,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// A project as one viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub location: String,
    pub status: ProjectStatus,
    pub budget: Visibility<u64>,
    pub financials: Visibility<FinancialSummary>,
    /// Completion over the stages in `stages`.
    pub progress: u8,
    /// Current phase among the visible stages.
    pub current_phase: Option<StagePhase>,
    pub team: BTreeMap<Role, String>,
    pub documents: Vec<Document>,
    pub stages: Vec<StageView>,
    /// Number of stages filtered out by stage scope.
    pub hidden_stages: usize,
}

impl ProjectView {
    #[must_use]
    pub fn build(policy: &dyn AccessPolicy, viewer: &Viewer, project: &Project) -> Self {
        let financial = policy.can_view_financials(viewer);
        let visible: Vec<(&Stage, StageAccessReason)> = project
            .stages
            .iter()
            .filter_map(|stage| policy.stage_access(viewer, stage).map(|access| (stage, access)))
            .collect();
        let scoped = visible.iter().map(|(stage, _)| *stage);

        Self {
            id: project.id,
            name: project.name.clone(),
            client: project.client.clone(),
            location: project.location.clone(),
            status: project.status,
            budget: Visibility::reveal(financial, project.budget, RedactionStyle::Placeholder),
            financials: Visibility::reveal(
                financial,
                project.financials,
                RedactionStyle::Placeholder,
            ),
            progress: completion(scoped.clone()),
            current_phase: current_of(scoped).map(|s| s.phase),
            team: project.team.clone(),
            documents: project.documents.clone(),
            hidden_stages: project.stages.len() - visible.len(),
            stages: visible
                .iter()
                .map(|&(stage, access)| StageView::build(stage, access))
                .collect(),
        }
    }

    /// Outstanding balance, when financials are visible.
    #[must_use]
    pub fn outstanding(&self) -> Visibility<u64> {
        self.financials.clone().map(|f| f.outstanding())
    }
}

/// A stage the viewer is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    pub id: StageId,
    pub phase: StagePhase,
    pub name: String,
    pub status: StageStatus,
    pub progress: u8,
    /// Why the viewer can see this stage.
    pub access: StageAccessReason,
    pub participants: Vec<String>,
    pub tasks: Vec<Task>,
    pub assets: Vec<Document>,
}

impl StageView {
    fn build(stage: &Stage, access: StageAccessReason) -> Self {
        Self {
            id: stage.id,
            phase: stage.phase,
            name: stage.name.clone(),
            status: stage.status,
            progress: stage_progress(stage),
            access,
            participants: stage.participants.clone(),
            tasks: stage.tasks.clone(),
            assets: stage.assets.clone(),
        }
    }
}
