use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pincer_cmd() -> Command {
    Command::cargo_bin("pincer").unwrap()
}

#[test]
fn test_diff_reports_added_removed_and_changed() {
    let tmp = TempDir::new().unwrap();
    let old = tmp.path().join("old.txt");
    let new = tmp.path().join("new.txt");
    fs::write(&old, "numpy >1.20.0\nscipy >=1.0\n").unwrap();
    fs::write(&new, "numpy >1.21.0\npandas >=1.5\n").unwrap();

    pincer_cmd()
        .args(["diff", old.to_str().unwrap(), new.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("- numpy >1.20.0"))
        .stdout(predicate::str::contains("+ numpy >1.21.0"))
        .stdout(predicate::str::contains("- scipy >=1.0"))
        .stdout(predicate::str::contains("+ pandas >=1.5"));
}

#[test]
fn test_diff_identical_manifests() {
    let tmp = TempDir::new().unwrap();
    let old = tmp.path().join("old.txt");
    let new = tmp.path().join("new.txt");
    fs::write(&old, "numpy >1.20.0\n").unwrap();
    fs::write(&new, "numpy >1.20.0\n").unwrap();

    pincer_cmd()
        .args(["diff", old.to_str().unwrap(), new.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No differences."));
}
