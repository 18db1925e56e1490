//! Start-up data.
//!
//! The studio starts from either the built-in sample portfolio
//! ([`studio`]) or a JSON file ([`load_json`]). Built-in records use
//! name-derived ids, so the same project has the same id on every run and
//! can be addressed from the command line.

use atelier_types::{
    Assignment, Document, DocumentId, DocumentKind, ErrorCode, Invoice, InvoiceId, InvoiceStatus,
    MemberId, Project, ProjectId, ProjectStatus, Role, StageId, StagePhase, StageStatus, Task,
    TaskId, TaskStatus, TeamMember,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything the studio holds at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub projects: Vec<Project>,
    pub members: Vec<TeamMember>,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for SeedError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "SEED_READ_FILE",
            Self::ParseJson { .. } => "SEED_PARSE_JSON",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// Reads a [`SeedData`] JSON file.
///
/// # Errors
///
/// Returns [`SeedError`] if the file cannot be read or is not valid seed JSON.
pub fn load_json(path: &Path) -> Result<SeedData, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let seed: SeedData = serde_json::from_str(&content).map_err(|source| SeedError::ParseJson {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        projects = seed.projects.len(),
        "loaded seed file"
    );
    Ok(seed)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn member(name: &str, role: Role, email: &str) -> TeamMember {
    TeamMember {
        id: MemberId::from_seed(name),
        ..TeamMember::new(name, role, email)
    }
}

fn task(key: &str, title: &str, assignee: Assignment, status: TaskStatus, due: NaiveDate) -> Task {
    Task {
        id: TaskId::from_seed(&format!("{key}/{title}")),
        status,
        ..Task::new(title, assignee, due)
    }
}

fn document(key: &str, name: &str, kind: DocumentKind, by: &str, size: u64) -> Document {
    Document {
        id: DocumentId::from_seed(&format!("{key}/{name}")),
        ..Document::new(name, kind, by, size)
    }
}

/// A project with the standard stages, deterministic ids, and the first
/// `done` stages completed and the next one active.
fn project(
    name: &str,
    client: &str,
    location: &str,
    status: ProjectStatus,
    budget: u64,
    done: usize,
) -> Project {
    let mut project = Project::with_standard_stages(name, client, budget);
    project.id = ProjectId::from_seed(name);
    project.location = location.to_string();
    project.status = status;
    for (i, stage) in project.stages.iter_mut().enumerate() {
        stage.id = StageId::from_seed(&format!("{name}/{}", stage.phase.label()));
        stage.status = match i.cmp(&done) {
            std::cmp::Ordering::Less => StageStatus::Completed,
            std::cmp::Ordering::Equal => StageStatus::Active,
            std::cmp::Ordering::Greater => StageStatus::Pending,
        };
    }
    project
}

fn stage_mut(project: &mut Project, phase: StagePhase) -> Option<&mut atelier_types::Stage> {
    project.stages.iter_mut().find(|s| s.phase == phase)
}

fn invoice(
    project: &Project,
    number: &str,
    amount: u64,
    status: InvoiceStatus,
    issued: NaiveDate,
) -> Invoice {
    Invoice {
        id: InvoiceId::from_seed(number),
        status,
        ..Invoice::new(project.id, number, amount, issued, issued + chrono::Days::new(30))
    }
}

fn harbour_house() -> Project {
    const KEY: &str = "Harbour House";
    let mut p = project(
        KEY,
        "Moreno family",
        "Lisbon",
        ProjectStatus::Active,
        1_200_000,
        2,
    );
    p.financials.expenses = 210_000;
    for (role, person) in [
        (Role::PrincipalArchitect, "Elena Ruiz"),
        (Role::ProjectManager, "Dana Kim"),
        (Role::SeniorArchitect, "Ana Silva"),
        (Role::InteriorDesigner, "Mia Laurent"),
        (Role::StructuralEngineer, "Ravi Patel"),
        (Role::Contractor, "Sam Ortiz"),
        (Role::Client, "Lena Moreno"),
    ] {
        p.team.insert(role, person.to_string());
    }
    p.documents.push(document(
        KEY,
        "Client brief.pdf",
        DocumentKind::Specification,
        "Dana Kim",
        412_000,
    ));

    if let Some(s) = stage_mut(&mut p, StagePhase::Concept) {
        s.tasks.push(task(
            KEY,
            "Massing options",
            Assignment::person(Role::SeniorArchitect, "Ana Silva"),
            TaskStatus::Completed,
            day(2026, 1, 16),
        ));
        s.assets.push(document(KEY, "Massing.skp", DocumentKind::Drawing, "Ana Silva", 8_400_000));
    }
    if let Some(s) = stage_mut(&mut p, StagePhase::SchematicDesign) {
        s.tasks.push(task(
            KEY,
            "Floor plans",
            Assignment::role(Role::JuniorArchitect),
            TaskStatus::Completed,
            day(2026, 3, 6),
        ));
        s.tasks.push(task(
            KEY,
            "Site survey",
            Assignment::person(Role::StructuralEngineer, "Ravi Patel"),
            TaskStatus::Completed,
            day(2026, 2, 20),
        ));
    }
    if let Some(s) = stage_mut(&mut p, StagePhase::DesignDevelopment) {
        s.tasks.push(task(
            KEY,
            "Structural scheme",
            Assignment::person(Role::StructuralEngineer, "Ravi Patel"),
            TaskStatus::InProgress,
            day(2026, 5, 29),
        ));
        s.tasks.push(task(
            KEY,
            "Finishes palette",
            Assignment::person(Role::InteriorDesigner, "Mia Laurent"),
            TaskStatus::Pending,
            day(2026, 6, 12),
        ));
    }
    if let Some(s) = stage_mut(&mut p, StagePhase::Construction) {
        s.participants.push("Sam Ortiz".to_string());
        s.tasks.push(task(
            KEY,
            "Foundations",
            Assignment::role(Role::Contractor),
            TaskStatus::Pending,
            day(2026, 11, 2),
        ));
    }
    p
}

fn orchard_pavilion() -> Project {
    const KEY: &str = "Orchard Pavilion";
    let mut p = project(
        KEY,
        "City of Porto",
        "Porto",
        ProjectStatus::Planning,
        650_000,
        0,
    );
    p.financials.expenses = 18_000;
    p.team.insert(Role::PrincipalArchitect, "Elena Ruiz".to_string());
    p.team.insert(Role::JuniorArchitect, "Tomás Reis".to_string());
    p.team.insert(Role::Client, "Porto Parks Office".to_string());

    if let Some(s) = stage_mut(&mut p, StagePhase::Concept) {
        s.participants.push("Tomás Reis".to_string());
        s.tasks.push(task(
            KEY,
            "Precedent study",
            Assignment::person(Role::JuniorArchitect, "Tomás Reis"),
            TaskStatus::InProgress,
            day(2026, 2, 27),
        ));
        s.tasks.push(task(
            KEY,
            "Landscape brief",
            Assignment::role(Role::PrincipalArchitect),
            TaskStatus::Pending,
            day(2026, 12, 4),
        ));
    }
    p
}

fn quarry_lane() -> Project {
    const KEY: &str = "Quarry Lane Offices";
    let mut p = project(
        KEY,
        "Northfield Holdings",
        "Leeds",
        ProjectStatus::OnHold,
        2_400_000,
        4,
    );
    p.financials.expenses = 1_050_000;
    p.team.insert(Role::ProjectManager, "Dana Kim".to_string());
    p.team.insert(Role::SeniorArchitect, "Ana Silva".to_string());
    p.team.insert(Role::Contractor, "Brook & Sons".to_string());
    p.team.insert(Role::Client, "Northfield Holdings".to_string());
    p.documents.push(document(
        KEY,
        "Main contract.pdf",
        DocumentKind::Contract,
        "Dana Kim",
        1_250_000,
    ));

    if let Some(s) = stage_mut(&mut p, StagePhase::ConstructionDocuments) {
        s.tasks.push(task(
            KEY,
            "Tender package",
            Assignment::role(Role::SeniorArchitect),
            TaskStatus::Completed,
            day(2025, 10, 3),
        ));
    }
    if let Some(s) = stage_mut(&mut p, StagePhase::Construction) {
        s.participants.push("Ravi Patel".to_string());
        s.tasks.push(task(
            KEY,
            "Steel frame inspection",
            Assignment::person(Role::StructuralEngineer, "Ravi Patel"),
            TaskStatus::Pending,
            day(2026, 1, 30),
        ));
        s.tasks.push(task(
            KEY,
            "Cladding install",
            Assignment::role(Role::Contractor),
            TaskStatus::InProgress,
            day(2026, 3, 31),
        ));
        s.assets.push(document(
            KEY,
            "Site photos March.zip",
            DocumentKind::Photo,
            "Brook & Sons",
            64_000_000,
        ));
    }
    p
}

/// The built-in sample portfolio: three projects, the studio team and
/// their invoices. Project financials are derived from the invoices.
#[must_use]
pub fn studio() -> SeedData {
    let mut projects = vec![harbour_house(), orchard_pavilion(), quarry_lane()];

    let invoices = vec![
        invoice(&projects[0], "INV-2026-001", 240_000, InvoiceStatus::Paid, day(2026, 1, 31)),
        invoice(&projects[0], "INV-2026-002", 120_000, InvoiceStatus::Paid, day(2026, 3, 31)),
        invoice(&projects[0], "INV-2026-003", 120_000, InvoiceStatus::Sent, day(2026, 5, 29)),
        invoice(&projects[1], "INV-2026-004", 40_000, InvoiceStatus::Paid, day(2026, 2, 13)),
        invoice(&projects[2], "INV-2025-011", 500_000, InvoiceStatus::Paid, day(2025, 6, 30)),
        invoice(&projects[2], "INV-2025-014", 200_000, InvoiceStatus::Paid, day(2025, 9, 30)),
        invoice(&projects[2], "INV-2025-019", 200_000, InvoiceStatus::Overdue, day(2025, 12, 19)),
    ];

    for project in &mut projects {
        for inv in invoices.iter().filter(|i| i.project == project.id) {
            project.financials.invoiced += inv.amount;
            if inv.is_paid() {
                project.financials.paid += inv.amount;
            }
        }
    }

    let members = vec![
        member("Elena Ruiz", Role::PrincipalArchitect, "elena@atelier.test"),
        member("Dana Kim", Role::ProjectManager, "dana@atelier.test"),
        member("Ana Silva", Role::SeniorArchitect, "ana@atelier.test"),
        member("Tomás Reis", Role::JuniorArchitect, "tomas@atelier.test"),
        member("Mia Laurent", Role::InteriorDesigner, "mia@atelier.test"),
        member("Ravi Patel", Role::StructuralEngineer, "ravi@atelier.test"),
    ];

    SeedData {
        projects,
        members,
        invoices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_types::assert_error_code;

    #[test]
    fn studio_is_deterministic() {
        assert_eq!(studio(), studio());
    }

    #[test]
    fn studio_shape() {
        let seed = studio();
        assert_eq!(seed.projects.len(), 3);
        assert!(seed.projects.iter().all(|p| p.stages.len() == 6));
        assert_eq!(
            seed.projects[0].id,
            ProjectId::from_seed("Harbour House")
        );
        // every invoice belongs to a seeded project
        assert!(seed
            .invoices
            .iter()
            .all(|i| seed.projects.iter().any(|p| p.id == i.project)));
    }

    #[test]
    fn financials_follow_invoices() {
        let seed = studio();
        let harbour = &seed.projects[0].financials;
        assert_eq!(harbour.invoiced, 480_000);
        assert_eq!(harbour.paid, 360_000);
        assert_eq!(harbour.outstanding(), 120_000);

        let quarry = &seed.projects[2].financials;
        assert_eq!(quarry.outstanding(), 200_000);
    }

    #[test]
    fn stage_ids_are_unique_across_projects() {
        let seed = studio();
        let mut ids: Vec<_> = seed
            .projects
            .iter()
            .flat_map(|p| p.stages.iter().map(|s| s.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn load_json_roundtrip_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("studio.json");
        let seed = studio();
        std::fs::write(&path, serde_json::to_string_pretty(&seed).expect("json")).expect("write");

        let loaded = load_json(&path).expect("load");
        assert_eq!(loaded, seed);
    }

    #[test]
    fn load_json_accepts_partial_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "{}").expect("write");

        assert_eq!(load_json(&path).expect("load"), SeedData::default());
    }

    #[test]
    fn load_json_errors() {
        let missing = load_json(Path::new("/nonexistent/studio.json")).unwrap_err();
        assert!(matches!(missing, SeedError::ReadFile { .. }));
        assert_error_code(&missing, "SEED_");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").expect("write");
        let bad = load_json(&path).unwrap_err();
        assert!(matches!(bad, SeedError::ParseJson { .. }));
        assert!(bad.to_string().contains("bad.json"));
    }
}
