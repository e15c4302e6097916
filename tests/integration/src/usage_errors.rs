//! Validation failures through the gitpack binary
//!
//! Every failure path must exit non-zero with a descriptive message
//! and leave no archive file behind.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::{IndexAddOption, Oid, Repository, Signature, Time};
use predicates::prelude::*;
use tempfile::TempDir;

fn commit_all(repo: &Repository, message: &str, seconds: i64) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let signature =
        Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    match parent {
        Some(parent) => repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &[&parent],
            )
            .unwrap(),
        None => repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &[])
            .unwrap(),
    }
}

fn setup_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    fs::write(temp.path().join("README.md"), "# proj\n").unwrap();
    commit_all(&repo, "initial", 1_000);
    temp
}

fn gitpack(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitpack").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn no_archive(dir: &Path) -> bool {
    !dir.join("proj-HEAD.tar.gz").exists()
}

#[test]
fn test_no_selection_source_fails() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args(["proj", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to select"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_manifest_flag_with_filespecs_fails() {
    let temp = setup_repo();
    fs::write(temp.path().join("m.txt"), "include *.md\n").unwrap();
    gitpack(temp.path())
        .args(["proj", "HEAD", "README.md", "--manifest", "m.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicting selection sources"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_both_manifest_flags_fail() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args([
            "proj",
            "HEAD",
            "--manifest",
            "m.txt",
            "--commit-manifest",
            "m.txt",
        ])
        .assert()
        .failure();
    assert!(no_archive(temp.path()));
}

#[test]
fn test_bad_revision_fails() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args(["proj", "not-a-branch", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not name a commit"));
}

#[test]
fn test_empty_selection_fails_before_any_archive_exists() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args(["proj", "HEAD", "absent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matched no files"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_manifest_excluding_everything_fails_with_empty_selection() {
    let temp = setup_repo();
    fs::write(temp.path().join("m.txt"), "global-exclude *\n").unwrap();
    gitpack(temp.path())
        .args(["proj", "HEAD", "--manifest", "m.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("matched no files"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_malformed_manifest_names_the_keyword() {
    let temp = setup_repo();
    fs::write(temp.path().join("m.txt"), "inclood *.md\n").unwrap();
    gitpack(temp.path())
        .args(["proj", "HEAD", "--manifest", "m.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inclood"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_missing_versioned_manifest_fails() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args(["proj", "HEAD", "--commit-manifest", "MANIFEST"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_parent_traversing_filespec_fails() {
    let temp = setup_repo();
    gitpack(temp.path())
        .args(["proj", "HEAD", "../escape.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector"));
    assert!(no_archive(temp.path()));
}

#[test]
fn test_existing_output_without_force_fails() {
    let temp = setup_repo();
    fs::write(temp.path().join("proj-HEAD.tar.gz"), b"old bytes").unwrap();

    gitpack(temp.path())
        .args(["proj", "HEAD", "README.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    // The old file survives untouched.
    assert_eq!(
        fs::read(temp.path().join("proj-HEAD.tar.gz")).unwrap(),
        b"old bytes"
    );
}

#[test]
fn test_force_overwrites_existing_output() {
    let temp = setup_repo();
    fs::write(temp.path().join("proj-HEAD.tar.gz"), b"old bytes").unwrap();

    gitpack(temp.path())
        .args(["proj", "HEAD", "README.md", "--force"])
        .assert()
        .success();
    assert_ne!(
        fs::read(temp.path().join("proj-HEAD.tar.gz")).unwrap(),
        b"old bytes"
    );
}

#[test]
fn test_outside_a_repository_fails() {
    let temp = TempDir::new().unwrap();
    gitpack(temp.path())
        .args(["proj", "HEAD", "README.md"])
        .assert()
        .failure();
}
