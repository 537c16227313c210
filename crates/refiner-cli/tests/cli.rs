use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn refiner_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mermaid-refiner").expect("binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn repairs_directory_and_prints_completion() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("flow.md"), "```mermaid\nA --> B\nnote\n```\n").unwrap();
    fs::write(root.join("Todo.md"), "# Todo\n").unwrap();

    refiner_cmd()
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Mermaid formatting complete. Blank files preserved.",
        ))
        .stderr(predicate::str::contains("Skipping blank MD file"));

    assert_eq!(
        fs::read_to_string(root.join("flow.md")).unwrap(),
        "```mermaid\nA --> B\n```\nnote\n```\n"
    );
    assert_eq!(fs::read_to_string(root.join("Todo.md")).unwrap(), "# Todo\n");
}

#[test]
fn defaults_to_current_directory() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.md"), "```mermaid\nA --> B\n").unwrap();

    refiner_cmd().current_dir(temp.path()).assert().success();

    assert_eq!(
        fs::read_to_string(temp.path().join("a.md")).unwrap(),
        "```mermaid\nA --> B\n```\n"
    );
}

#[test]
fn missing_directory_is_a_soft_no_op() {
    let temp = tempdir().unwrap();

    refiner_cmd()
        .arg(temp.path().join("absent"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn json_summary_keeps_stdout_machine_readable() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("a.md"), "```mermaid\nA --> B\n").unwrap();
    fs::write(root.join("b.md"), "plain\n").unwrap();

    let output = refiner_cmd()
        .arg("--json")
        .arg(root)
        .output()
        .expect("command run");
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(summary["files_seen"], 2);
    assert_eq!(summary["rewritten"], 1);
    assert_eq!(summary["unchanged"], 1);
    assert_eq!(summary["fences_inserted"], 1);
}

#[test]
fn config_file_changes_language() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let config = root.join("refiner.toml");
    fs::write(&config, "language = \"flow\"\nmath_delimiters = false\n").unwrap();
    fs::write(root.join("a.md"), "```flow\nx --> y\n\\(z\\)\n```\n").unwrap();

    refiner_cmd()
        .arg("--config")
        .arg(&config)
        .arg(root)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(root.join("a.md")).unwrap(),
        "```flow\nx --> y\n```\n\\(z\\)\n```\n"
    );
}

#[test]
fn invalid_config_fails() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "arrow = \"\"\n").unwrap();

    refiner_cmd()
        .arg("--config")
        .arg(&config)
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
