//! End-to-end CLI flow: drive the binary against a temporary scenario
//! directory and observe the ephemeral directory side effect plus the
//! progress banner ordering.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_crucible(args: &[&str], scenario_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crucible"))
        .args(args)
        .arg("--scenario-dir")
        .arg(scenario_dir)
        .env("RUST_LOG", "crucible=info")
        .output()
        .expect("spawn crucible")
}

#[test]
fn destroy_creates_ephemeral_directory_and_reports_progress() {
    let tmp = TempDir::new().expect("tempdir");
    let output = run_crucible(&["destroy"], tmp.path());

    assert!(output.status.success(), "crucible destroy failed");
    assert!(tmp.path().join(".crucible").is_dir());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let scenario_line = stdout.find("Scenario: 'default'").expect("scenario line");
    let term_line = stdout.find("Term: 'destroy'").expect("term line");
    assert!(
        scenario_line < term_line,
        "scenario line must precede term line:\n{stdout}"
    );
}

#[test]
fn rerun_against_existing_ephemeral_directory_succeeds() {
    let tmp = TempDir::new().expect("tempdir");
    assert!(run_crucible(&["syntax"], tmp.path()).status.success());

    let marker = tmp.path().join(".crucible/state.json");
    std::fs::write(&marker, "{}").expect("write marker");

    assert!(run_crucible(&["syntax"], tmp.path()).status.success());
    assert_eq!(
        "{}",
        std::fs::read_to_string(&marker).expect("marker survives rerun")
    );
}

#[test]
fn config_file_override_names_the_scenario_in_progress_output() {
    let tmp = TempDir::new().expect("tempdir");
    std::fs::write(
        tmp.path().join("crucible.json"),
        r#"{"scenario_name": "staging"}"#,
    )
    .expect("write config");

    let output = run_crucible(&["verify"], tmp.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Scenario: 'staging'"), "stdout:\n{stdout}");
    assert!(stdout.contains("Term: 'verify'"), "stdout:\n{stdout}");
}

#[test]
fn ephemeral_path_collision_with_file_is_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    std::fs::write(tmp.path().join(".crucible"), "not a directory").expect("write");

    let output = run_crucible(&["destroy"], tmp.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("create ephemeral directory"),
        "stderr:\n{stderr}"
    );
}
