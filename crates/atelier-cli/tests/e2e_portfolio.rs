//! E2E tests for portfolio reads: redaction, stage scoping and seed data.

mod common;

use common::{atelier_cmd, write_project_config};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

// ─── Projects ──────────────────────────────────────────────────────

#[test]
fn client_sees_projects_with_hidden_budgets() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.arg("projects")
        .assert()
        .success()
        .stdout(contains("Harbour House"))
        .stdout(contains("Orchard Pavilion"))
        .stdout(contains("Quarry Lane Offices"))
        .stdout(contains("budget HIDDEN"))
        .stdout(contains("1,200,000").not());
}

#[test]
fn project_manager_sees_budgets() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Project Manager", "projects"])
        .assert()
        .success()
        .stdout(contains("budget 1,200,000"))
        .stdout(contains("HIDDEN").not());
}

#[test]
fn custom_redaction_marker() {
    let (mut cmd, guard) = atelier_cmd();
    write_project_config(guard.path(), "[ui]\nredaction_marker = \"<locked>\"\n");
    cmd.arg("projects")
        .assert()
        .success()
        .stdout(contains("budget <locked>"));
}

#[test]
fn projects_filtered_by_status_and_search() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["projects", "--status", "planning"])
        .assert()
        .success()
        .stdout(contains("Orchard Pavilion"))
        .stdout(contains("Harbour House").not());

    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["projects", "--search", "leeds"])
        .assert()
        .success()
        .stdout(contains("Quarry Lane Offices"))
        .stdout(contains("Orchard Pavilion").not());

    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["projects", "--search", "nowhere"])
        .assert()
        .success()
        .stdout(contains("(no matching projects)"));
}

#[test]
fn projects_bad_status_is_an_error() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["projects", "--status", "paused"])
        .assert()
        .failure()
        .stderr(contains("Unknown project status 'paused'"));
}

// ─── Project detail and stages ─────────────────────────────────────

#[test]
fn project_detail_for_contractor() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Contractor", "--name", "Sam Ortiz", "project", "harbour house"])
        .assert()
        .success()
        .stdout(contains("Harbour House (project:"))
        .stdout(contains("progress:    0%"))
        .stdout(contains("budget:      HIDDEN"))
        .stdout(contains("stages: 1 visible, 5 hidden"))
        .stdout(contains("Construction"));
}

#[test]
fn project_root_flag_with_project_command() {
    let (mut cmd, guard) = atelier_cmd();
    let root = guard.path().join("site");
    write_project_config(&root, "[viewer]\nrole = \"Project Manager\"\n");
    cmd.arg("-C")
        .arg(&root)
        .args(["project", "Orchard Pavilion"])
        .assert()
        .success()
        .stdout(contains("Orchard Pavilion (project:"))
        .stdout(contains("budget:      650,000"));
}

#[test]
fn stages_for_accented_participant() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args([
        "--role",
        "Junior Architect",
        "--name",
        "TOMÁS REIS",
        "stages",
        "orchard pavilion",
    ])
    .assert()
    .success()
    .stdout(contains("via participant"));
}

#[test]
fn unknown_project_is_an_error() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["project", "Lighthouse"])
        .assert()
        .failure()
        .stderr(contains("project not found: Lighthouse"));
}

#[test]
fn stages_show_access_reason() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Structural Engineer", "--name", "Ravi Patel", "stages", "Quarry Lane Offices"])
        .assert()
        .success()
        .stdout(contains("via participant"))
        .stdout(contains("Steel frame inspection"))
        .stdout(contains("(5 stages hidden)"));
}

#[test]
fn stages_for_privileged_role() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["stages", "Orchard Pavilion"])
        .assert()
        .success()
        .stdout(contains("via privileged role"))
        .stdout(contains("Handover"))
        .stdout(contains("hidden").not());
}

#[test]
fn assignee_by_role_sees_stage() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Junior Architect", "stages", "Harbour House"])
        .assert()
        .success()
        .stdout(contains("Schematic Design"))
        .stdout(contains("via task assignee"));
}

#[test]
fn project_json_redacts_money() {
    let (mut cmd, _guard) = atelier_cmd();
    let output = cmd
        .args(["--json", "project", "Harbour House"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["budget"], "HIDDEN");
    assert_eq!(value["financials"], "HIDDEN");
    assert_eq!(value["stages"].as_array().map(Vec::len), Some(6));
}

// ─── Tasks and invoices ────────────────────────────────────────────

#[test]
fn tasks_for_named_person() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Project Manager", "tasks", "Ravi Patel"])
        .assert()
        .success()
        .stdout(contains("Site survey"))
        .stdout(contains("Structural scheme"))
        .stdout(contains("Steel frame inspection"));
}

#[test]
fn tasks_default_to_viewer_name() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Interior Designer", "--name", "Mia Laurent", "tasks"])
        .assert()
        .success()
        .stdout(contains("Finishes palette"));
}

#[test]
fn invoices_hidden_from_client() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.arg("invoices")
        .assert()
        .success()
        .stdout(contains("(no invoices visible)"));
}

#[test]
fn invoices_for_project_manager() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["--role", "Project Manager", "invoices"])
        .assert()
        .success()
        .stdout(contains("INV-2026-001"))
        .stdout(contains("240,000"));
}

// ─── Summary ───────────────────────────────────────────────────────

#[test]
fn summary_text() {
    let (mut cmd, _guard) = atelier_cmd();
    cmd.args(["summary", "--today", "2026-04-01"])
        .assert()
        .success()
        .stdout(contains("projects:      3"))
        .stdout(contains("total budget:  HIDDEN"));
}

#[test]
fn summary_json_for_admin() {
    let (mut cmd, _guard) = atelier_cmd();
    let output = cmd
        .args(["--admin", "--json", "summary", "--today", "2026-04-01"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["projectCount"], 3);
    assert_eq!(value["activeProjects"], 1);
    assert_eq!(value["totalBudget"], 4_250_000);
    assert_eq!(value["outstanding"], 320_000);
}

// ─── Seed files ────────────────────────────────────────────────────

const SEED: &str = r#"{
  "projects": [
    {
      "id": "0b8f2f5e-6d1c-4c8e-9a59-1f7f4c0a9e11",
      "name": "Test Tower",
      "client": "Acme",
      "budget": 5000
    }
  ]
}"#;

#[test]
fn seed_file_from_flag() {
    let (mut cmd, guard) = atelier_cmd();
    std::fs::write(guard.path().join("studio.json"), SEED).expect("write seed");
    cmd.args(["--role", "Project Manager", "--seed", "studio.json", "projects"])
        .assert()
        .success()
        .stdout(contains("Test Tower"))
        .stdout(contains("budget 5,000"))
        .stdout(contains("Harbour House").not());
}

#[test]
fn seed_file_from_config() {
    let (mut cmd, guard) = atelier_cmd();
    std::fs::write(guard.path().join("studio.json"), SEED).expect("write seed");
    write_project_config(guard.path(), "[paths]\nseed_file = \"studio.json\"\n");
    cmd.args(["project", "project:0b8f2f5e-6d1c-4c8e-9a59-1f7f4c0a9e11"])
        .assert()
        .success()
        .stdout(contains("Test Tower"))
        .stdout(contains("progress:    0%"));
}

#[test]
fn broken_seed_file_is_reported() {
    let (mut cmd, guard) = atelier_cmd();
    std::fs::write(guard.path().join("studio.json"), "[1, 2").expect("write seed");
    cmd.args(["--seed", "studio.json", "projects"])
        .assert()
        .failure()
        .stderr(contains("studio.json"));
}
