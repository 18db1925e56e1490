//! In-memory studio state.
//!
//! [`StudioState`] owns every project, staff record and invoice for the
//! session. Every mutation names the acting [`Viewer`] and goes through the
//! [`AccessPolicy`] before anything changes; a denied call leaves the
//! state untouched.
//!
//! # Gates
//!
//! | Operation | Requires |
//! |-----------|----------|
//! | `add_project`, `replace_project`, `remove_project` | EDIT |
//! | `set_stage_status`, `set_task_status`, `add_participant` | EDIT + stage access |
//! | `upload_document` | UPLOAD |
//! | `upload_stage_asset` | UPLOAD + stage access |
//! | `add_member`, `remove_member`, `assign_team_role` | MANAGE_TEAM |
//! | `create_invoice`, `mark_invoice_paid` | VIEW_FINANCIALS + EDIT |
//!
//! Reads never fail on permissions. They return views with money redacted
//! and out-of-scope stages dropped.

use super::{ProjectView, StateError};
use crate::progress::{PortfolioSummary, ProjectFilter};
use crate::seed::SeedData;
use atelier_auth::{names_match, AccessEvaluator, AccessPolicy, Capability, Viewer};
use atelier_types::{
    Document, DocumentId, Invoice, InvoiceId, InvoiceStatus, MemberId, Project, ProjectId, Role,
    Stage, StageId, StageStatus, TaskId, TaskStatus, TeamMember,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// Capabilities needed to bill.
const BILLING: Capability = Capability::VIEW_FINANCIALS.union(Capability::EDIT);

pub struct StudioState {
    projects: Vec<Project>,
    members: Vec<TeamMember>,
    invoices: Vec<Invoice>,
    policy: Arc<dyn AccessPolicy>,
}

impl std::fmt::Debug for StudioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioState")
            .field("projects", &self.projects.len())
            .field("members", &self.members.len())
            .field("invoices", &self.invoices.len())
            .finish_non_exhaustive()
    }
}

impl StudioState {
    /// Creates an empty studio gated by `policy`.
    #[must_use]
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self {
            projects: Vec::new(),
            members: Vec::new(),
            invoices: Vec::new(),
            policy,
        }
    }

    /// Creates an empty studio gated by an [`AccessEvaluator`].
    #[must_use]
    pub fn with_evaluator(evaluator: AccessEvaluator) -> Self {
        Self::new(Arc::new(evaluator))
    }

    /// Creates a studio pre-populated from seed data.
    ///
    /// Seeding is start-up data, not a viewer action, so it is not gated.
    #[must_use]
    pub fn from_seed(seed: SeedData, policy: Arc<dyn AccessPolicy>) -> Self {
        info!(
            projects = seed.projects.len(),
            members = seed.members.len(),
            invoices = seed.invoices.len(),
            "studio seeded"
        );
        Self {
            projects: seed.projects,
            members: seed.members,
            invoices: seed.invoices,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &dyn AccessPolicy {
        self.policy.as_ref()
    }

    // ---- Unfiltered reads ----

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Finds a project by id (`<uuid>` or `project:<uuid>`) or by name
    /// (trimmed, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ProjectNotFound`] if nothing matches.
    pub fn find_project(&self, key: &str) -> Result<&Project, StateError> {
        let by_id = key.parse::<ProjectId>().ok().and_then(|id| self.project(id));
        by_id
            .or_else(|| {
                self.projects.iter().find(|p| names_match(&p.name, key))
            })
            .ok_or_else(|| StateError::ProjectNotFound(key.to_string()))
    }

    // ---- Viewer reads ----

    /// One project as `viewer` sees it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ProjectNotFound`] for an unknown id.
    pub fn project_view(&self, viewer: &Viewer, id: ProjectId) -> Result<ProjectView, StateError> {
        let project = self
            .project(id)
            .ok_or_else(|| StateError::project_not_found(id))?;
        Ok(ProjectView::build(self.policy(), viewer, project))
    }

    /// All projects matching `filter`, as `viewer` sees them.
    #[must_use]
    pub fn project_views(&self, viewer: &Viewer, filter: &ProjectFilter) -> Vec<ProjectView> {
        filter
            .apply(&self.projects)
            .map(|p| ProjectView::build(self.policy(), viewer, p))
            .collect()
    }

    /// Invoices, or nothing at all if the viewer cannot see financials.
    #[must_use]
    pub fn invoices(&self, viewer: &Viewer) -> Vec<&Invoice> {
        if self.policy.can_view_financials(viewer) {
            self.invoices.iter().collect()
        } else {
            Vec::new()
        }
    }

    /// Portfolio totals with money redacted per `viewer`. Task counts only
    /// cover stages the viewer can access.
    #[must_use]
    pub fn summary(&self, viewer: &Viewer, today: NaiveDate) -> PortfolioSummary {
        PortfolioSummary::compute_scoped(
            &self.projects,
            self.policy.can_view_financials(viewer),
            today,
            |stage| self.policy.can_access_stage(viewer, stage),
        )
    }

    // ---- Projects ----

    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT; [`StateError::DuplicateProject`]
    /// if the id is taken.
    pub fn add_project(&mut self, viewer: &Viewer, project: Project) -> Result<ProjectId, StateError> {
        self.policy.require(viewer, Capability::EDIT, "add_project")?;
        if self.project(project.id).is_some() {
            return Err(StateError::DuplicateProject(project.id));
        }
        let id = project.id;
        info!(project = %project.name, id = %id, "project added");
        self.projects.push(project);
        Ok(id)
    }

    /// Replaces the project with the same id, returning the old value.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT; [`StateError::ProjectNotFound`].
    pub fn replace_project(&mut self, viewer: &Viewer, project: Project) -> Result<Project, StateError> {
        self.policy.require(viewer, Capability::EDIT, "replace_project")?;
        let index = self.project_index(project.id)?;
        info!(project = %project.name, id = %project.id, "project replaced");
        Ok(std::mem::replace(&mut self.projects[index], project))
    }

    /// Removes a project and every invoice billed against it.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT; [`StateError::ProjectNotFound`].
    pub fn remove_project(&mut self, viewer: &Viewer, id: ProjectId) -> Result<Project, StateError> {
        self.policy.require(viewer, Capability::EDIT, "remove_project")?;
        let index = self.project_index(id)?;
        let removed = self.projects.remove(index);
        let before = self.invoices.len();
        self.invoices.retain(|inv| inv.project != id);
        info!(
            project = %removed.name,
            invoices_removed = before - self.invoices.len(),
            "project removed"
        );
        Ok(removed)
    }

    // ---- Stages and tasks ----

    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT or stage access; not-found errors.
    pub fn set_stage_status(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        stage: StageId,
        status: StageStatus,
    ) -> Result<(), StateError> {
        let target = self.scoped_stage_mut(viewer, Capability::EDIT, "set_stage_status", project, stage)?;
        target.status = status;
        info!(stage = %target.name, %status, "stage status changed");
        Ok(())
    }

    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT or stage access; not-found errors.
    pub fn set_task_status(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        stage: StageId,
        task: TaskId,
        status: TaskStatus,
    ) -> Result<(), StateError> {
        let target = self.scoped_stage_mut(viewer, Capability::EDIT, "set_task_status", project, stage)?;
        let task = target.task_mut(task).ok_or(StateError::TaskNotFound(task))?;
        task.status = status;
        info!(task = %task.title, %status, "task status changed");
        Ok(())
    }

    /// Grants `person` visibility into a stage.
    ///
    /// Returns `false` if they were already a participant.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without EDIT or stage access; not-found errors.
    pub fn add_participant(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        stage: StageId,
        person: &str,
    ) -> Result<bool, StateError> {
        let target = self.scoped_stage_mut(viewer, Capability::EDIT, "add_participant", project, stage)?;
        if atelier_auth::is_participant(target, person) {
            return Ok(false);
        }
        target.participants.push(person.trim().to_string());
        info!(stage = %target.name, person, "participant added");
        Ok(true)
    }

    // ---- Documents ----

    /// Attaches a document to the project.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without UPLOAD; [`StateError::ProjectNotFound`].
    pub fn upload_document(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        document: Document,
    ) -> Result<DocumentId, StateError> {
        self.policy.require(viewer, Capability::UPLOAD, "upload_document")?;
        let index = self.project_index(project)?;
        let id = document.id;
        info!(document = %document.name, project = %self.projects[index].name, "document uploaded");
        self.projects[index].documents.push(document);
        Ok(id)
    }

    /// Attaches an asset to a stage the viewer can access.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without UPLOAD or stage access; not-found errors.
    pub fn upload_stage_asset(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        stage: StageId,
        document: Document,
    ) -> Result<DocumentId, StateError> {
        let target =
            self.scoped_stage_mut(viewer, Capability::UPLOAD, "upload_stage_asset", project, stage)?;
        let id = document.id;
        info!(document = %document.name, stage = %target.name, "stage asset uploaded");
        target.assets.push(document);
        Ok(id)
    }

    // ---- Team ----

    /// # Errors
    ///
    /// [`StateError::Access`] without MANAGE_TEAM.
    pub fn add_member(&mut self, viewer: &Viewer, member: TeamMember) -> Result<MemberId, StateError> {
        self.policy.require(viewer, Capability::MANAGE_TEAM, "add_member")?;
        let id = member.id;
        info!(member = %member.name, role = %member.role, "team member added");
        self.members.push(member);
        Ok(id)
    }

    /// # Errors
    ///
    /// [`StateError::Access`] without MANAGE_TEAM; [`StateError::MemberNotFound`].
    pub fn remove_member(&mut self, viewer: &Viewer, id: MemberId) -> Result<TeamMember, StateError> {
        self.policy.require(viewer, Capability::MANAGE_TEAM, "remove_member")?;
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(StateError::MemberNotFound(id))?;
        let removed = self.members.remove(index);
        info!(member = %removed.name, "team member removed");
        Ok(removed)
    }

    /// Staffs `role` on a project with `person`, or unstaffs it when `None`.
    /// Returns whoever held the role before.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without MANAGE_TEAM; [`StateError::ProjectNotFound`].
    pub fn assign_team_role(
        &mut self,
        viewer: &Viewer,
        project: ProjectId,
        role: Role,
        person: Option<String>,
    ) -> Result<Option<String>, StateError> {
        self.policy.require(viewer, Capability::MANAGE_TEAM, "assign_team_role")?;
        let index = self.project_index(project)?;
        let team = &mut self.projects[index].team;
        let previous = match person {
            Some(person) => {
                info!(%role, person = %person, "team role assigned");
                team.insert(role, person)
            }
            None => {
                info!(%role, "team role cleared");
                team.remove(&role)
            }
        };
        Ok(previous)
    }

    // ---- Billing ----

    /// Records an invoice and adds it to the project's invoiced total.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without VIEW_FINANCIALS and EDIT;
    /// [`StateError::ProjectNotFound`] if the invoice names an unknown project.
    pub fn create_invoice(&mut self, viewer: &Viewer, invoice: Invoice) -> Result<InvoiceId, StateError> {
        self.policy.require(viewer, BILLING, "create_invoice")?;
        let index = self.project_index(invoice.project)?;
        let financials = &mut self.projects[index].financials;
        financials.invoiced = financials.invoiced.saturating_add(invoice.amount);
        if invoice.is_paid() {
            financials.paid = financials.paid.saturating_add(invoice.amount);
        }
        let id = invoice.id;
        info!(number = %invoice.number, amount = invoice.amount, "invoice created");
        self.invoices.push(invoice);
        Ok(id)
    }

    /// Marks an invoice paid and adds it to the project's paid total.
    ///
    /// Paying an already-paid invoice changes nothing.
    ///
    /// # Errors
    ///
    /// [`StateError::Access`] without VIEW_FINANCIALS and EDIT;
    /// [`StateError::InvoiceNotFound`].
    pub fn mark_invoice_paid(&mut self, viewer: &Viewer, id: InvoiceId) -> Result<(), StateError> {
        self.policy.require(viewer, BILLING, "mark_invoice_paid")?;
        let invoice = self
            .invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or(StateError::InvoiceNotFound(id))?;
        if invoice.is_paid() {
            return Ok(());
        }
        invoice.status = InvoiceStatus::Paid;
        let (project, amount) = (invoice.project, invoice.amount);
        info!(number = %invoice.number, amount, "invoice paid");

        if let Some(p) = self.projects.iter_mut().find(|p| p.id == project) {
            p.financials.paid = p.financials.paid.saturating_add(amount);
        }
        Ok(())
    }

    // ---- Helpers ----

    fn project_index(&self, id: ProjectId) -> Result<usize, StateError> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StateError::project_not_found(id))
    }

    /// Capability check, lookup, then stage scope check.
    fn scoped_stage_mut(
        &mut self,
        viewer: &Viewer,
        cap: Capability,
        operation: &str,
        project: ProjectId,
        stage: StageId,
    ) -> Result<&mut Stage, StateError> {
        self.policy.require(viewer, cap, operation)?;
        let index = self.project_index(project)?;
        let target = self.projects[index]
            .stage_mut(stage)
            .ok_or(StateError::StageNotFound { project, stage })?;
        self.policy.require_stage(viewer, target)?;
        Ok(target)
    }
}
