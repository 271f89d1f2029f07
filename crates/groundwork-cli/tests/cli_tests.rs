use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn gw_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gw").expect("Failed to find gw binary");
    cmd.arg("--no-color");
    cmd
}

/// Write a small two-step blueprint file the offline tests can load
fn write_blueprint(dir: &Path) -> String {
    let path = dir.join("blueprint.json");
    std::fs::write(
        &path,
        r#"{
            "summary": "a reading tracker",
            "phases": [{
                "name": "Phase 1",
                "steps": [
                    {"title": "Create book model", "area": "database"},
                    {"title": "Add list screen", "area": "frontend"}
                ]
            }]
        }"#,
    )
    .expect("Failed to write blueprint file");
    path.to_str().expect("utf-8 path").to_string()
}

#[test]
fn cli_create_plan_offline_uses_fallback() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    gw_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "a reading tracker",
            "--offline",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created build plan with ID: 1"))
        .stdout(predicate::str::contains("Set up your project"));
}

#[test]
fn cli_create_plan_from_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let blueprint = write_blueprint(temp_dir.path());

    gw_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "reading tracker",
            "--from-file",
            blueprint.as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created build plan with ID: 1"))
        .stdout(predicate::str::contains("Create book model"))
        .stdout(predicate::str::contains("Add list screen"));
}

#[test]
fn cli_create_plan_requires_some_source() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    gw_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide an idea"));
}

#[test]
fn cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    gw_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No build plans found."));
}

#[test]
fn cli_list_shows_created_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "reading tracker",
            "--offline",
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Build Plans"))
        .stdout(predicate::str::contains("reading tracker"));
}

#[test]
fn cli_show_plan_and_missing_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let blueprint = write_blueprint(temp_dir.path());

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "reading tracker",
            "--from-file",
            blueprint.as_str(),
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a reading tracker"))
        .stdout(predicate::str::contains("Current phase:"))
        .stdout(predicate::str::contains("Create book model"));

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "show", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build plan 42 not found."));
}

#[test]
fn cli_step_next_and_update() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let blueprint = write_blueprint(temp_dir.path());

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "reading tracker",
            "--from-file",
            blueprint.as_str(),
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "step", "next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create book model"))
        .stdout(predicate::str::contains("Prompt"));

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "step",
            "update",
            "1",
            "1",
            "completed",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated plan 1"))
        .stdout(predicate::str::contains("Progress: 1/2 steps (50%)"));

    // next now points at the second step
    gw_cmd()
        .args(["--database-file", db_arg, "step", "next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Add list screen"));

    // completing everything reports the terminal message
    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "step",
            "update",
            "1",
            "2",
            "completed",
        ])
        .assert()
        .success();
    gw_cmd()
        .args(["--database-file", db_arg, "step", "next", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All steps completed!"));
}

#[test]
fn cli_step_update_rejects_bad_status() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "idea",
            "--offline",
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "step", "update", "1", "1", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status: done"));
}

#[test]
fn cli_step_prompt_and_fix() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let blueprint = write_blueprint(temp_dir.path());

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "reading tracker",
            "--from-file",
            blueprint.as_str(),
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "step", "prompt", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current step: Add list screen"));

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "step",
            "fix",
            "1",
            "TypeError: boom",
            "--step-id",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fix this error in the smallest, safest way:",
        ))
        .stdout(predicate::str::contains("Working on: Create book model"));
}

#[test]
fn cli_plan_prompts_lists_every_step() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();
    let blueprint = write_blueprint(temp_dir.path());

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "reading tracker",
            "--from-file",
            blueprint.as_str(),
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "prompts", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Step 1"))
        .stdout(predicate::str::contains("## Step 2"));
}

#[test]
fn cli_plan_history_starts_empty() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "idea",
            "--offline",
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No step runs recorded."));
}

#[test]
fn cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "idea",
            "--offline",
        ])
        .assert()
        .success();

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirmed"));

    gw_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "delete",
            "1",
            "--confirm",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted build plan 'idea' (ID: 1)"));

    gw_cmd()
        .args(["--database-file", db_arg, "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No build plans found."));
}

#[test]
fn cli_bare_invocation_lists_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    gw_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No build plans found."));
}
