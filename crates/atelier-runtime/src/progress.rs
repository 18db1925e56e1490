//! Portfolio aggregations.
//!
//! Everything here is a linear scan over in-memory projects. Financial
//! totals come back as [`Visibility`] so callers cannot print them without
//! going through the viewer's capabilities first.

use atelier_auth::{names_match, RedactionStyle, Visibility};
use atelier_types::{Project, ProjectStatus, Role, Stage, StageStatus, Task};
use chrono::NaiveDate;
use serde::Serialize;

/// Integer percentage, rounded down. `0` when `total` is zero.
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // done <= total, so the quotient is at most 100
    u8::try_from(done * 100 / total).unwrap_or(100)
}

/// Completion of a project.
///
/// Completed tasks over all tasks. A project with no tasks yet falls back
/// to completed stages over stages.
///
/// ```
/// use atelier_runtime::progress::percent_complete;
/// use atelier_types::{Project, StageStatus};
///
/// let mut project = Project::with_standard_stages("Harbour House", "Moreno", 0);
/// assert_eq!(percent_complete(&project), 0);
///
/// project.stages[0].status = StageStatus::Completed;
/// project.stages[1].status = StageStatus::Completed;
/// assert_eq!(percent_complete(&project), 33);
/// ```
#[must_use]
pub fn percent_complete(project: &Project) -> u8 {
    completion(&project.stages)
}

/// [`percent_complete`] over an arbitrary selection of stages, such as the
/// ones a viewer is allowed to see.
#[must_use]
pub fn completion<'a>(stages: impl IntoIterator<Item = &'a Stage> + Clone) -> u8 {
    let (done, total) = stages
        .clone()
        .into_iter()
        .flat_map(|s| s.tasks.iter())
        .fold((0, 0), |(done, total), task| {
            (done + usize::from(task.is_completed()), total + 1)
        });
    if total > 0 {
        return percent(done, total);
    }

    let (completed, count) = stages.into_iter().fold((0, 0), |(done, count), stage| {
        (done + usize::from(stage.status == StageStatus::Completed), count + 1)
    });
    percent(completed, count)
}

/// Completion of one stage, by the same rule as [`percent_complete`].
#[must_use]
pub fn stage_progress(stage: &Stage) -> u8 {
    if stage.tasks.is_empty() {
        return if stage.status == StageStatus::Completed {
            100
        } else {
            0
        };
    }
    let done = stage.tasks.iter().filter(|t| t.is_completed()).count();
    percent(done, stage.tasks.len())
}

/// The stage work is happening in: first active, else first pending.
#[must_use]
pub fn current_stage(project: &Project) -> Option<&Stage> {
    current_of(&project.stages)
}

/// [`current_stage`] over a selection of stages, in order.
#[must_use]
pub fn current_of<'a>(stages: impl IntoIterator<Item = &'a Stage> + Clone) -> Option<&'a Stage> {
    stages
        .clone()
        .into_iter()
        .find(|s| s.status == StageStatus::Active)
        .or_else(|| {
            stages
                .into_iter()
                .find(|s| s.status == StageStatus::Pending)
        })
}

/// Project list filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    /// Case-insensitive substring over name, client and location.
    pub search: Option<String>,
    /// Only projects where this role is staffed.
    pub role: Option<Role>,
}

impl ProjectFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        if self.status.is_some_and(|s| s != project.status) {
            return false;
        }
        if self.role.is_some_and(|r| !project.team.contains_key(&r)) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                [&project.name, &project.client, &project.location]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            }
        }
    }

    /// Applies the filter, keeping input order.
    pub fn apply<'a>(&'a self, projects: &'a [Project]) -> impl Iterator<Item = &'a Project> + 'a {
        projects.iter().filter(move |p| self.matches(p))
    }
}

/// Portfolio-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub project_count: usize,
    pub active_projects: usize,
    pub total_budget: Visibility<u64>,
    /// Invoiced but not yet paid, summed over projects.
    pub outstanding: Visibility<u64>,
    pub open_tasks: usize,
    /// Open tasks whose due date is before `today`.
    pub overdue_tasks: usize,
}

impl PortfolioSummary {
    /// Computes the summary over every stage. Money totals are redacted
    /// unless `show_financials` is set.
    #[must_use]
    pub fn compute(projects: &[Project], show_financials: bool, today: NaiveDate) -> Self {
        Self::compute_scoped(projects, show_financials, today, |_| true)
    }

    /// Like [`compute`](Self::compute), but task counts only include stages
    /// for which `visible` returns `true`.
    ///
    /// Money totals saturate at `u64::MAX`.
    #[must_use]
    pub fn compute_scoped(
        projects: &[Project],
        show_financials: bool,
        today: NaiveDate,
        visible: impl Fn(&Stage) -> bool,
    ) -> Self {
        let tasks = || {
            projects
                .iter()
                .flat_map(|p| p.stages.iter())
                .filter(|s| visible(s))
                .flat_map(|s| s.tasks.iter())
        };

        Self {
            project_count: projects.len(),
            active_projects: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
                .count(),
            total_budget: Visibility::reveal_with(
                show_financials,
                || projects.iter().fold(0, |sum: u64, p| sum.saturating_add(p.budget)),
                RedactionStyle::Placeholder,
            ),
            outstanding: Visibility::reveal_with(
                show_financials,
                || {
                    projects
                        .iter()
                        .fold(0, |sum: u64, p| sum.saturating_add(p.financials.outstanding()))
                },
                RedactionStyle::Placeholder,
            ),
            open_tasks: tasks().filter(|t| !t.is_completed()).count(),
            overdue_tasks: tasks().filter(|t| t.is_overdue(today)).count(),
        }
    }
}

/// A task together with where it lives.
#[derive(Debug, Clone, Copy)]
pub struct AssignedTask<'a> {
    pub project: &'a Project,
    pub stage: &'a Stage,
    pub task: &'a Task,
}

/// Tasks assigned to `who`, which is either a role name or a person name.
///
/// A role name matches every task assigned to that role. A person name
/// matches tasks naming that person (trimmed, case-insensitive).
#[must_use]
pub fn tasks_for<'a>(projects: &'a [Project], who: &str) -> Vec<AssignedTask<'a>> {
    let who = who.trim();
    if who.is_empty() {
        return Vec::new();
    }
    let role = Role::parse(who);

    let mut found = Vec::new();
    for project in projects {
        for stage in &project.stages {
            for task in &stage.tasks {
                let by_role = Some(task.assignee.role) == role;
                let by_name = task
                    .assignee
                    .person
                    .as_deref()
                    .is_some_and(|p| names_match(p, who));
                if by_role || by_name {
                    found.push(AssignedTask {
                        project,
                        stage,
                        task,
                    });
                }
            }
        }
    }
    found
}
