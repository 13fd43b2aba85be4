use crate::common::command::{
    full_hash, git_repository_dir, merged_feature_history, repository_dir, run_lanegraph_command,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

mod common;

const MERGE_HISTORY: &str = r#"[
    { "hash": "m", "parents": ["d", "e"], "refs": ["HEAD", "main"] },
    { "hash": "e", "parents": ["a"] },
    { "hash": "d", "parents": ["a"] },
    { "hash": "a", "parents": [] }
]"#;

#[rstest]
fn lays_out_commits_from_stdin(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_lanegraph_command(repository_dir.path(), &["layout"])
        .write_stdin(MERGE_HISTORY)
        .output()?;

    assert!(output.status.success());
    let layout = common::stdout_json(&output);
    let lanes: Vec<_> = layout["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|row| row["lane"].as_u64().expect("lane"))
        .collect();
    assert_eq!(lanes, vec![0, 1, 0, 1]);
    assert_eq!(layout["maxLane"], 1);
    assert_eq!(
        layout["rows"][0]["edges"],
        json!([{ "type": "branch-out", "fromLane": 0, "toLane": 1, "colorId": 1 }])
    );
    assert_eq!(layout["rows"][0]["commit"]["refs"], json!(["HEAD", "main"]));

    Ok(())
}

#[rstest]
fn empty_stdin_is_an_empty_layout(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_lanegraph_command(repository_dir.path(), &["layout"])
        .write_stdin("")
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        common::stdout_json(&output),
        json!({ "rows": [], "maxLane": 0, "activeLanes": [] })
    );

    Ok(())
}

#[rstest]
fn lays_out_commits_from_file(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("history.json").write_str(MERGE_HISTORY)?;

    let output = run_lanegraph_command(
        repository_dir.path(),
        &["layout", "--input", "history.json", "--pretty"],
    )
    .output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\n  \"rows\": ["));
    let layout = common::stdout_json(&output);
    assert_eq!(layout["rows"].as_array().map(Vec::len), Some(4));
    // The root ends on the feature lane, which is drawn on past the last row
    assert_eq!(layout["activeLanes"], json!([{ "lane": 1, "colorId": 1 }]));

    Ok(())
}

#[rstest]
fn lays_out_git_history(git_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    merged_feature_history(&git_repository_dir);
    let dir = git_repository_dir.path();
    let repo = dir.to_string_lossy().to_string();

    let output = run_lanegraph_command(dir, &["layout", "--repo", &repo]).output()?;

    assert!(output.status.success());
    let layout = common::stdout_json(&output);
    let rows = layout["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["commit"]["hash"], json!(full_hash(dir, "HEAD")));
    assert_eq!(
        rows[0]["commit"]["parents"],
        json!([full_hash(dir, "HEAD^1"), full_hash(dir, "HEAD^2")])
    );
    assert_eq!(rows[0]["commit"]["message"], "Merge branch 'feature'");
    assert!(rows[0]["commit"]["date"].as_str().is_some());
    assert_eq!(rows[2]["lane"], 1);
    assert_eq!(rows[2]["edges"][1]["type"], "merge-in");
    assert_eq!(layout["maxLane"], 1);

    Ok(())
}

#[rstest]
fn invalid_json_is_reported(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_lanegraph_command(repository_dir.path(), &["layout"])
        .write_stdin(r#"{ "hash": "a" }"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid commit list on stdin"));

    Ok(())
}

#[rstest]
fn input_and_repo_are_exclusive(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_lanegraph_command(
        repository_dir.path(),
        &["layout", "--input", "history.json", "--repo", "."],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot be used with"));

    Ok(())
}
