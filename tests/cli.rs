use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const STORY: &str = "A cat sat. It purred! Then it slept.";

fn shotsplit() -> Command {
    Command::cargo_bin("shotsplit").unwrap()
}

fn write_story(dir: &TempDir) -> Result<std::path::PathBuf> {
    let path = dir.path().join("story.txt");
    fs::write(&path, STORY)?;
    Ok(path)
}

fn run_json(args: &[&str]) -> Result<Value> {
    let output = shotsplit().args(args).output()?;
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(serde_json::from_slice(&output.stdout)?)
}

fn write_plan(dir: &TempDir, story: &Path, shots: &str) -> Result<std::path::PathBuf> {
    let plan = dir.path().join("plan.json");
    let output = shotsplit()
        .args(["chunk", story.to_str().unwrap(), "--mode", "punctuation", "-n", shots])
        .output()?;
    assert!(output.status.success());
    fs::write(&plan, output.stdout)?;
    Ok(plan)
}

#[test]
fn scan_reports_boundaries_and_ceiling() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    let report = run_json(&["scan", story.to_str().unwrap(), "--mode", "punctuation"])?;
    assert_eq!(report["maxPossibleShots"], 3);
    assert_eq!(report["boundaries"][0]["position"], 10);
    assert_eq!(report["boundaries"][1]["reason"], "sentence_end");
    Ok(())
}

#[test]
fn chunk_produces_worked_example() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    let plan = run_json(&["chunk", story.to_str().unwrap(), "--mode", "punctuation", "-n", "3"])?;
    let texts: Vec<&str> = plan["chunks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|chunk| chunk["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["A cat sat.", "It purred!", "Then it slept."]);
    assert_eq!(plan["chunks"][2]["endPos"], STORY.len());
    Ok(())
}

#[test]
fn chunk_reports_clamping_on_stderr() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    shotsplit()
        .args(["chunk", story.to_str().unwrap(), "--mode", "punctuation", "-n", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"applied\": 3"))
        .stderr(predicate::str::contains("at most 3"));
    Ok(())
}

#[test]
fn reads_text_from_stdin() {
    shotsplit()
        .args(["suggest", "-", "--mode", "punctuation"])
        .write_stdin(STORY)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxPossibleShots\": 3"));
}

#[test]
fn split_and_merge_rewrite_plan() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    let plan = write_plan(&dir, &story, "1")?;
    let story_arg = story.to_str().unwrap();
    let plan_arg = plan.to_str().unwrap();

    let hints = run_json(&["hints", story_arg, "--plan", plan_arg, "--chunk", "1"])?;
    assert_eq!(hints["suggestions"].as_array().unwrap().len(), 2);

    let split = run_json(&["split", story_arg, "--plan", plan_arg, "--chunk", "1", "--at", "10"])?;
    assert_eq!(split["chunks"][0]["text"], "A cat sat.");
    assert_eq!(split["chunks"][1]["id"], 3);

    let split_plan = dir.path().join("split.json");
    fs::write(&split_plan, serde_json::to_vec(&split)?)?;
    let merged = run_json(&[
        "merge",
        story_arg,
        "--plan",
        split_plan.to_str().unwrap(),
        "--chunks",
        "2,3",
    ])?;
    assert_eq!(merged["chunks"].as_array().unwrap().len(), 1);
    assert_eq!(merged["chunks"][0]["text"], STORY);
    Ok(())
}

#[test]
fn rejected_split_fails_with_reason() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    let plan = write_plan(&dir, &story, "1")?;
    shotsplit()
        .args([
            "split",
            story.to_str().unwrap(),
            "--plan",
            plan.to_str().unwrap(),
            "--chunk",
            "1",
            "--at",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not strictly inside"));
    Ok(())
}

#[test]
fn plan_from_other_text_is_refused() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    let plan = write_plan(&dir, &story, "2")?;
    let other = dir.path().join("other.txt");
    fs::write(&other, "Something much longer than the original story text.")?;
    shotsplit()
        .args([
            "merge",
            other.to_str().unwrap(),
            "--plan",
            plan.to_str().unwrap(),
            "--chunks",
            "1,2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("different input"));
    Ok(())
}

#[test]
fn invalid_weights_are_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let story = write_story(&dir)?;
    shotsplit()
        .args([
            "scan",
            story.to_str().unwrap(),
            "--weights-json",
            r#"{"story": {"dialogueBoost": 9}}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dialogue_boost"));
    Ok(())
}

#[test]
fn hand_edited_plan_with_mid_char_edges_is_refused() -> Result<()> {
    let dir = TempDir::new()?;
    let text = "caf\u{e9} noir. Then more text here.";
    let story = dir.path().join("story.txt");
    fs::write(&story, text)?;
    let plan = dir.path().join("plan.json");
    let chunks = serde_json::json!({
        "requested": 2,
        "applied": 2,
        "chunks": [
            {"id": 1, "text": "caf", "startPos": 0, "endPos": 4, "boundaryScore": 5.0},
            {"id": 2, "text": "noir.", "startPos": 4, "endPos": text.len(), "boundaryScore": 10.0}
        ]
    });
    fs::write(&plan, serde_json::to_vec(&chunks)?)?;
    let position = text.find(" Then").unwrap().to_string();
    shotsplit()
        .args([
            "split",
            story.to_str().unwrap(),
            "--plan",
            plan.to_str().unwrap(),
            "--chunk",
            "2",
            "--at",
            &position,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character boundaries"));
    Ok(())
}
