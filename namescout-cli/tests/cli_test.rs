use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn namescout() -> Command {
    Command::cargo_bin("namescout").expect("binary builds")
}

fn build_fixture(root: &std::path::Path) -> Result<()> {
    fs::create_dir(root.join("docs"))?;
    fs::write(root.join("docs/invoice_jan.txt"), "")?;
    fs::write(root.join("docs/notes.md"), "")?;
    fs::create_dir(root.join("docs/archive"))?;
    fs::write(root.join("docs/archive/INVOICE_feb.pdf"), "")?;
    Ok(())
}

#[test]
fn test_search_streams_matches_and_summary() -> Result<()> {
    let dir = tempdir()?;
    build_fixture(dir.path())?;

    namescout()
        .args(["search", "invoice", "-d"])
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice_jan.txt"))
        .stdout(predicate::str::contains("INVOICE_feb.pdf"))
        .stdout(predicate::str::contains("Found 2 matches"))
        .stdout(predicate::str::contains("notes.md").not());
    Ok(())
}

#[test]
fn test_search_no_matches() -> Result<()> {
    let dir = tempdir()?;
    build_fixture(dir.path())?;

    namescout()
        .args(["search", "zzz-nothing", "-d"])
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 matches"));
    Ok(())
}

#[test]
fn test_search_json_output() -> Result<()> {
    let dir = tempdir()?;
    build_fixture(dir.path())?;

    let assert = namescout()
        .args(["search", "invoice_jan", "-d"])
        .arg(dir.path())
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let mut lines = stdout.lines();

    let m: serde_json::Value = serde_json::from_str(lines.next().expect("match line"))?;
    assert!(m["path"].as_str().unwrap().ends_with("invoice_jan.txt"));
    assert!(m["containing_dir"].as_str().unwrap().ends_with("docs"));

    let summary: serde_json::Value = serde_json::from_str(lines.next().expect("summary line"))?;
    assert_eq!(summary["matches_delivered"], 1);
    Ok(())
}

#[test]
fn test_search_missing_root_fails() -> Result<()> {
    let dir = tempdir()?;

    namescout()
        .args(["search", "x", "-d"])
        .arg(dir.path().join("absent"))
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
    Ok(())
}

#[test]
fn test_browse_lists_children() -> Result<()> {
    let dir = tempdir()?;
    build_fixture(dir.path())?;

    namescout()
        .arg("browse")
        .arg(dir.path().join("docs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("archive/"))
        .stdout(predicate::str::contains("invoice_jan.txt"))
        .stdout(predicate::str::contains("notes.md"));
    Ok(())
}

#[test]
fn test_delete_removes_file() -> Result<()> {
    let dir = tempdir()?;
    let target = dir.path().join("doomed.txt");
    fs::write(&target, "bye")?;

    namescout()
        .arg("delete")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
    assert!(!target.exists());

    namescout()
        .arg("delete")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
    Ok(())
}
