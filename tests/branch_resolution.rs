//! Branch resolution against real git working copies.

use std::path::Path;
use std::process::Command;

use sendoff::branch::{self, ResolveError};
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn repo_with_commit() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(
        dir.path(),
        &[
            "-c",
            "user.name=ci",
            "-c",
            "user.email=ci@example.com",
            "commit",
            "--allow-empty",
            "-m",
            "initial",
        ],
    );
    dir
}

#[test]
fn resolves_checked_out_branch() {
    let repo = repo_with_commit();
    git(repo.path(), &["checkout", "-q", "-b", "feature/login"]);

    let branch = branch::resolve(repo.path(), None).unwrap();
    assert_eq!(branch, "feature/login");
}

#[test]
fn override_takes_precedence_over_checkout() {
    let repo = repo_with_commit();
    git(repo.path(), &["checkout", "-q", "-b", "feature/login"]);

    let branch = branch::resolve(repo.path(), Some("main")).unwrap();
    assert_eq!(branch, "main");
}

#[test]
fn non_repository_reports_git_failure() {
    let dir = TempDir::new().unwrap();

    let result = branch::resolve(dir.path(), None);
    assert!(matches!(result, Err(ResolveError::GitCommand(_))));
}

#[test]
fn repo_without_commits_has_no_current_branch() {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);

    let result = branch::resolve(dir.path(), None);
    assert_eq!(result, Err(ResolveError::NoCurrentBranch));
}

#[test]
fn detached_head_resolves_via_remote_qualified_ref() {
    let repo = repo_with_commit();
    git(repo.path(), &["update-ref", "refs/remotes/origin/release1.2", "HEAD"]);
    git(repo.path(), &["checkout", "-q", "--detach"]);

    let branch = branch::resolve(repo.path(), None).unwrap();
    assert_eq!(branch, "release1.2");
}

#[test]
fn detached_head_without_remote_ref_keeps_marker_text() {
    let repo = repo_with_commit();
    git(repo.path(), &["checkout", "-q", "--detach"]);

    let branch = branch::resolve(repo.path(), None).unwrap();
    assert!(
        branch.starts_with("(HEAD detached at"),
        "unexpected branch: {}",
        branch
    );
}
