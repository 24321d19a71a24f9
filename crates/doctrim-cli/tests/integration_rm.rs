//! End-to-end tests for `doctrim rm` against real temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// index -> guide; old and legacy/api are unreachable.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "index.rst", "Home\n====\n\n.. toctree::\n   :maxdepth: 1\n\n   guide\n");
    write(root, "guide.rst", ".. image:: img/shared.png\n");
    write(root, "old.rst", ".. image:: img/shared.png\n.. figure:: img/old.png\n");
    write(root, "legacy/api.rst", "See :download:`the archive <files/api.zip>`.\n");
    write(root, "img/shared.png", "");
    write(root, "img/old.png", "");
    write(root, "legacy/files/api.zip", "");
    dir
}

fn doctrim(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("doctrim").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DOCTRIM_ROOTS")
        .env_remove("DOCTRIM_DIRECTIVES");
    cmd
}

#[test]
fn test_dry_run_lists_plan_and_changes_nothing() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("old.rst"))
        .stdout(predicate::str::contains("legacy/api.rst"))
        .stdout(predicate::str::contains("img/old.png"))
        .stdout(predicate::str::contains("legacy/files/api.zip"))
        .stdout(predicate::str::contains("shared.png").not());

    assert!(docs.path().join("old.rst").exists());
    assert!(docs.path().join("img/old.png").exists());
    assert!(docs.path().join("legacy/files/api.zip").exists());
}

#[test]
fn test_apply_deletes_orphans_and_unique_assets() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home).arg("rm").arg(docs.path()).assert().success();

    let root = docs.path();
    assert!(!root.join("old.rst").exists());
    assert!(!root.join("legacy/api.rst").exists());
    assert!(!root.join("img/old.png").exists());
    assert!(!root.join("legacy/files/api.zip").exists());

    assert!(root.join("index.rst").exists());
    assert!(root.join("guide.rst").exists());
    assert!(root.join("img/shared.png").exists());
    // Directories stay unless --prune-dirs is given
    assert!(root.join("legacy/files").is_dir());
}

#[test]
fn test_prune_dirs_removes_emptied_directories() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .arg("--prune-dirs")
        .assert()
        .success();

    assert!(!docs.path().join("legacy").exists());
    assert!(docs.path().join("img").is_dir());
}

#[test]
fn test_dry_run_lists_directories_it_would_prune() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--dry-run", "--prune-dirs"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would remove empty directory legacy/files"))
        .stderr(predicate::str::contains("Would remove empty directory legacy\n"));

    assert!(docs.path().join("legacy/files").is_dir());
}

#[test]
fn test_second_run_finds_nothing() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home).arg("rm").arg(docs.path()).assert().success();
    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to delete"));
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();
    let docs = project();

    let output = doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--dry-run", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["dry_run"], true);
    let kinds: Vec<&str> = value["plan"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["document", "document", "asset", "asset"]);
    assert!(value["report"]["deleted"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_root_fails_without_deleting() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--root", "contents"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contents"));

    assert!(docs.path().join("old.rst").exists());
}

#[test]
fn test_missing_directory_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("no-such-docs");

    doctrim(&home).arg("rm").arg(&missing).assert().failure();
}

#[test]
fn test_extra_root_keeps_its_subtree() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--root", "index", "--root", "legacy/api"])
        .assert()
        .success();

    assert!(docs.path().join("legacy/api.rst").exists());
    assert!(docs.path().join("legacy/files/api.zip").exists());
    assert!(!docs.path().join("old.rst").exists());
}

#[test]
fn test_custom_directive_from_flag_and_config() {
    let home = TempDir::new().unwrap();
    let docs = project();
    write(docs.path(), "old.rst", ".. drawio-figure:: diagram.drawio\n.. mermaid:: flow.mmd\n");
    write(docs.path(), "diagram.drawio", "");
    write(docs.path(), "flow.mmd", "");
    write(docs.path(), "doctrim.toml", "directives = [\"mermaid\"]\n");

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--directive", "drawio-figure"])
        .assert()
        .success();

    assert!(!docs.path().join("diagram.drawio").exists());
    assert!(!docs.path().join("flow.mmd").exists());
    assert!(docs.path().join("doctrim.toml").exists());
}

#[test]
fn test_exclude_keeps_matching_documents_out_of_the_graph() {
    let home = TempDir::new().unwrap();
    let docs = project();

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .args(["--exclude", "legacy/**"])
        .assert()
        .success();

    assert!(!docs.path().join("old.rst").exists());
    assert!(docs.path().join("legacy/api.rst").exists());
}

#[test]
fn test_dangling_reference_is_reported() {
    let home = TempDir::new().unwrap();
    let docs = project();
    write(docs.path(), "guide.rst", ".. image:: img/shared.png\n.. image:: gone.png\n");

    doctrim(&home)
        .arg("rm")
        .arg(docs.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("gone.png"));
}
