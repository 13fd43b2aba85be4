use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use derive_new::new;
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Empty git repository whose current branch is `main`
#[fixture]
pub fn git_repository_dir(repository_dir: TempDir) -> TempDir {
    run_git_command(repository_dir.path(), &["init", "-q"])
        .assert()
        .success();
    run_git_command(
        repository_dir.path(),
        &["symbolic-ref", "HEAD", "refs/heads/main"],
    )
    .assert()
    .success();

    repository_dir
}

pub fn run_lanegraph_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lanegraph").expect("Failed to find lanegraph binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("LANEGRAPH_VIEW_MODE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.args(["-c", "commit.gpgsign=false"]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

#[derive(Debug, Clone, new)]
struct RandomAuthor {
    name: String,
    email: String,
}

fn generate_random_author() -> RandomAuthor {
    let name = Name().fake::<String>();
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}

/// Run a committing git command at a fixed hour of 2023-01-01
///
/// Increasing hours keep the commit order deterministic.
fn git_with_identity(dir: &Path, args: &[&str], hour: u32) -> Command {
    let author = generate_random_author();
    let date = format!("2023-01-01 {hour:02}:00:00 +0000");

    let mut cmd = run_git_command(dir, args);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", author.name.as_str()),
        ("GIT_AUTHOR_EMAIL", author.email.as_str()),
        ("GIT_COMMITTER_NAME", author.name.as_str()),
        ("GIT_COMMITTER_EMAIL", author.email.as_str()),
        ("GIT_AUTHOR_DATE", date.as_str()),
        ("GIT_COMMITTER_DATE", date.as_str()),
    ]);
    cmd
}

/// Commit a new file with random content on the current branch
pub fn git_commit(dir: &TempDir, message: &str, hour: u32) {
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child(format!("file-{hour}.txt"))
        .write_str(&content)
        .expect("Failed to write file");

    run_git_command(dir.path(), &["add", "."])
        .assert()
        .success();
    git_with_identity(dir.path(), &["commit", "-q", "-m", message], hour)
        .assert()
        .success();
}

pub fn git_checkout(dir: &Path, branch: &str) {
    run_git_command(dir, &["checkout", "-q", branch])
        .assert()
        .success();
}

pub fn git_branch(dir: &Path, branch: &str) {
    run_git_command(dir, &["checkout", "-q", "-b", branch])
        .assert()
        .success();
}

/// Merge `branch` into the current branch with a merge commit
pub fn git_merge(dir: &Path, branch: &str, message: &str, hour: u32) {
    git_with_identity(dir, &["merge", "-q", "--no-ff", "-m", message, branch], hour)
        .assert()
        .success();
}

pub fn short_hash(dir: &Path, rev: &str) -> String {
    let output = run_git_command(dir, &["rev-parse", "--short=7", rev])
        .output()
        .expect("Failed to run git rev-parse");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn full_hash(dir: &Path, rev: &str) -> String {
    let output = run_git_command(dir, &["rev-parse", rev])
        .output()
        .expect("Failed to run git rev-parse");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// `main` and `feature` diverging from one root and merged back:
/// root (1), feature work (2), main work (3), merge (4)
pub fn merged_feature_history(dir: &TempDir) {
    git_commit(dir, "Initial commit", 1);
    git_branch(dir.path(), "feature");
    git_commit(dir, "Feature work", 2);
    git_checkout(dir.path(), "main");
    git_commit(dir, "Main work", 3);
    git_merge(dir.path(), "feature", "Merge branch 'feature'", 4);
}
