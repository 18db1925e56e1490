//! End-to-end runtime flow: project config → evaluator → seeded studio.

use atelier_auth::{StageAccessReason, Visibility};
use atelier_runtime::{seed, ConfigLoader, ProjectFilter, StudioState};
use atelier_types::{Project, ProjectId, ProjectStatus, Role, StagePhase};
use chrono::NaiveDate;
use std::sync::Arc;

fn write_project_config(content: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_dir = dir.path().join(".atelier");
    std::fs::create_dir_all(&config_dir).expect("create .atelier");
    std::fs::write(config_dir.join("config.toml"), content).expect("write config");
    dir
}

fn load_studio(root: &std::path::Path) -> (StudioState, atelier_auth::Viewer) {
    let config = ConfigLoader::new()
        .skip_global_config()
        .skip_env_vars()
        .with_project_root(root)
        .load()
        .expect("config loads");
    let evaluator = config.access.evaluator().expect("valid permissions");
    let studio = StudioState::from_seed(seed::studio(), Arc::new(evaluator));
    (studio, config.viewer.to_viewer())
}

#[test]
fn configured_client_with_financial_access() {
    let dir = write_project_config(
        r#"
[viewer]
role = "Client"
name = "Lena Moreno"

[access.permissions."Client"]
canViewFinancials = true
"#,
    );
    let (studio, viewer) = load_studio(dir.path());

    let harbour = studio
        .project_view(&viewer, ProjectId::from_seed("Harbour House"))
        .expect("seeded project");
    assert_eq!(harbour.budget, Visibility::Shown(1_200_000));
    assert_eq!(harbour.outstanding(), Visibility::Shown(120_000));
    assert!(!studio.invoices(&viewer).is_empty());
}

#[test]
fn contractor_sees_construction_only() {
    let dir = write_project_config(
        r#"
[viewer]
role = "Contractor"
name = "Sam Ortiz"
"#,
    );
    let (studio, viewer) = load_studio(dir.path());

    let harbour = studio
        .find_project("harbour house")
        .map(|p| p.id)
        .expect("seeded project");
    let view = studio.project_view(&viewer, harbour).expect("view");

    let phases: Vec<_> = view.stages.iter().map(|s| s.phase).collect();
    assert_eq!(phases, [StagePhase::Construction]);
    assert_eq!(view.stages[0].access, StageAccessReason::Participant);
    assert_eq!(view.budget, Visibility::Redacted);
    assert!(studio.invoices(&viewer).is_empty());
}

#[test]
fn admin_preview_follows_simulation_policy() {
    let dir = write_project_config(
        r#"
[viewer]
role = "Junior Architect"
admin = true
simulate = true

[access]
simulation = "suppress-admin-override"
"#,
    );
    let (mut studio, viewer) = load_studio(dir.path());

    // previewing a junior architect: no edit, no money
    let err = studio
        .add_project(&viewer, Project::new("Preview", "Nobody", 1))
        .unwrap_err();
    assert!(err.is_access_denied());
    let summary = studio.summary(&viewer, NaiveDate::from_ymd_opt(2026, 4, 1).expect("date"));
    assert_eq!(summary.total_budget, Visibility::Redacted);

    // leaving the preview restores the admin override
    let admin = viewer.with_simulation(false);
    studio
        .add_project(&admin, Project::new("Real", "Somebody", 1))
        .expect("admin adds");
    assert_eq!(studio.projects().len(), 4);
}

#[test]
fn filters_over_seeded_portfolio() {
    let dir = write_project_config("");
    let (studio, viewer) = load_studio(dir.path());
    assert_eq!(viewer.role(), Some(Role::Client));

    let planning = studio.project_views(
        &viewer,
        &ProjectFilter::new().with_status(ProjectStatus::Planning),
    );
    let names: Vec<_> = planning.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["Orchard Pavilion"]);

    let with_contractor =
        studio.project_views(&viewer, &ProjectFilter::new().with_role(Role::Contractor));
    assert_eq!(with_contractor.len(), 2);

    let ravi = atelier_runtime::tasks_for(studio.projects(), "Ravi Patel");
    assert_eq!(ravi.len(), 3);
}

#[test]
fn accented_participant_name_in_any_case() {
    let dir = write_project_config(
        r#"
[viewer]
role = "Junior Architect"
name = "TOMÁS REIS"
"#,
    );
    let (studio, viewer) = load_studio(dir.path());

    let orchard = studio.find_project("ORCHARD PAVILION").map(|p| p.id).expect("seeded");
    let view = studio.project_view(&viewer, orchard).expect("view");
    let concept = view
        .stages
        .iter()
        .find(|s| s.phase == StagePhase::Concept)
        .expect("concept stage visible");
    assert_eq!(concept.access, StageAccessReason::Participant);
}

#[test]
fn summary_counts_only_visible_tasks() {
    let dir = write_project_config("[viewer]\nrole = \"Contractor\"\nname = \"Sam Ortiz\"\n");
    let (studio, contractor) = load_studio(dir.path());
    let today = NaiveDate::from_ymd_opt(2026, 4, 1).expect("date");

    let scoped = studio.summary(&contractor, today);
    let full = studio.summary(&atelier_auth::Viewer::admin(Role::Client), today);
    assert!(scoped.open_tasks < full.open_tasks);
    assert_eq!(scoped.project_count, full.project_count);
}
