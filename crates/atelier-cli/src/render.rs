//! Text and JSON output.
//!
//! Redacted values print as the configured marker in text mode. JSON
//! output uses the serialized form of the views (`"HIDDEN"` / `null`).

use anyhow::Result;
use atelier_auth::{AccessPolicy, Capability, PermissionTable, Viewer, Visibility};
use atelier_runtime::{AssignedTask, PortfolioSummary, ProjectView, StudioState};
use serde_json::json;

pub struct Renderer<'a> {
    json: bool,
    marker: &'a str,
}

/// Groups digits in threes: `1200000` → `1,200,000`.
fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl<'a> Renderer<'a> {
    pub fn new(json: bool, marker: &'a str) -> Self {
        Self { json, marker }
    }

    fn money(&self, value: &Visibility<u64>) -> String {
        value.clone().map(money).render(self.marker)
    }

    pub fn matrix(&self, table: &PermissionTable) -> Result<()> {
        if self.json {
            let rows: Vec<_> = table
                .iter()
                .map(|(role, perms)| json!({ "role": role, "permissions": perms }))
                .collect();
            return print_json(&rows);
        }

        println!(
            "{:<20} {:<8} {:<10} {:<18} {}",
            "ROLE", "canEdit", "canUpload", "canViewFinancials", "canManageTeam"
        );
        for (role, perms) in table.iter() {
            println!(
                "{:<20} {:<8} {:<10} {:<18} {}",
                role.as_str(),
                yes_no(perms.can_edit),
                yes_no(perms.can_upload),
                yes_no(perms.can_view_financials),
                yes_no(perms.can_manage_team),
            );
        }
        Ok(())
    }

    pub fn check(&self, policy: &dyn AccessPolicy, viewer: &Viewer, caps: &[Capability]) -> Result<()> {
        let results: Vec<(&str, bool)> = caps
            .iter()
            .map(|&cap| {
                (
                    cap.external_name().unwrap_or("(combined)"),
                    policy.allows(viewer, cap),
                )
            })
            .collect();

        if self.json {
            let capabilities: serde_json::Map<String, serde_json::Value> = results
                .iter()
                .map(|(name, allowed)| ((*name).to_string(), json!(allowed)))
                .collect();
            return print_json(&json!({ "viewer": viewer, "capabilities": capabilities }));
        }

        println!("viewer: {viewer}");
        for (name, allowed) in results {
            println!("{name:<18} {}", if allowed { "allowed" } else { "denied" });
        }
        Ok(())
    }

    pub fn projects(&self, views: &[ProjectView]) -> Result<()> {
        if self.json {
            return print_json(&views);
        }
        if views.is_empty() {
            println!("(no matching projects)");
            return Ok(());
        }
        for view in views {
            println!(
                "{:<22} {:<22} {:<10} {:>3}%  budget {}",
                view.name,
                view.client,
                view.status.to_string(),
                view.progress,
                self.money(&view.budget),
            );
        }
        Ok(())
    }

    pub fn project(&self, view: &ProjectView) -> Result<()> {
        if self.json {
            return print_json(view);
        }

        println!("{} (project:{})", view.name, view.id);
        println!("client:      {}", view.client);
        if !view.location.is_empty() {
            println!("location:    {}", view.location);
        }
        println!("status:      {}", view.status);
        println!("progress:    {}%", view.progress);
        if let Some(phase) = view.current_phase {
            println!("current:     {phase}");
        }
        println!("budget:      {}", self.money(&view.budget));
        let f = &view.financials;
        println!("invoiced:    {}", self.money(&f.clone().map(|f| f.invoiced)));
        println!("paid:        {}", self.money(&f.clone().map(|f| f.paid)));
        println!("outstanding: {}", self.money(&view.outstanding()));
        println!("expenses:    {}", self.money(&f.clone().map(|f| f.expenses)));

        if !view.team.is_empty() {
            println!("team:");
            for (role, person) in &view.team {
                println!("  {role}: {person}");
            }
        }
        if !view.documents.is_empty() {
            println!("documents:");
            for doc in &view.documents {
                println!("  {} ({:?}, {})", doc.name, doc.kind, doc.uploaded_by);
            }
        }

        println!(
            "stages: {} visible, {} hidden",
            view.stages.len(),
            view.hidden_stages
        );
        for stage in &view.stages {
            println!("  {:<26} {:<10} {:>3}%", stage.name, stage.status.to_string(), stage.progress);
        }
        Ok(())
    }

    pub fn stages(&self, view: &ProjectView) -> Result<()> {
        if self.json {
            return print_json(&json!({
                "project": view.name,
                "stages": view.stages,
                "hiddenStages": view.hidden_stages,
            }));
        }

        for stage in &view.stages {
            println!(
                "{:<26} {:<10} {:>3}%  via {}",
                stage.name,
                stage.status.to_string(),
                stage.progress,
                stage.access
            );
            for task in &stage.tasks {
                let who = task.assignee.person.as_deref().unwrap_or("");
                println!(
                    "    - {} [{}] {} {} due {}",
                    task.title, task.status, task.assignee.role, who, task.due
                );
            }
        }
        if view.hidden_stages > 0 {
            println!("({} stages hidden)", view.hidden_stages);
        }
        Ok(())
    }

    pub fn tasks(&self, who: &str, tasks: &[AssignedTask<'_>]) -> Result<()> {
        if self.json {
            let rows: Vec<_> = tasks
                .iter()
                .map(|t| {
                    json!({
                        "project": t.project.name,
                        "stage": t.stage.name,
                        "task": t.task,
                    })
                })
                .collect();
            return print_json(&rows);
        }
        if tasks.is_empty() {
            println!("(no visible tasks for {who})");
            return Ok(());
        }
        for t in tasks {
            println!(
                "{} / {} / {}  [{}] due {}",
                t.project.name, t.stage.name, t.task.title, t.task.status, t.task.due
            );
        }
        Ok(())
    }

    pub fn invoices(&self, studio: &StudioState, viewer: &Viewer) -> Result<()> {
        let invoices = studio.invoices(viewer);
        if self.json {
            return print_json(&invoices);
        }
        if invoices.is_empty() {
            println!("(no invoices visible)");
            return Ok(());
        }
        for inv in invoices {
            let project = studio
                .project(inv.project)
                .map_or("?", |p| p.name.as_str());
            println!(
                "{:<14} {:<22} {:>12}  {:?}  due {}",
                inv.number,
                project,
                money(inv.amount),
                inv.status,
                inv.due
            );
        }
        Ok(())
    }

    pub fn summary(&self, summary: &PortfolioSummary) -> Result<()> {
        if self.json {
            return print_json(summary);
        }
        println!("projects:      {}", summary.project_count);
        println!("active:        {}", summary.active_projects);
        println!("total budget:  {}", self.money(&summary.total_budget));
        println!("outstanding:   {}", self.money(&summary.outstanding));
        println!("open tasks:    {}", summary.open_tasks);
        println!("overdue tasks: {}", summary.overdue_tasks);
        Ok(())
    }
}
