use assert_cmd::Command;
use kagglegenius_core::{load_demo, DemoKind};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Binary run from an empty directory with no credential in the environment.
fn kagglegenius(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kagglegenius").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("KAGGLEGENIUS_API_KEY")
        .env("RUST_LOG", "warn");
    cmd
}

fn gemini_reply(text: &str) -> String {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
        .to_string()
}

fn titanic_report() -> String {
    serde_json::to_string(&load_demo(DemoKind::Titanic).unwrap().report).unwrap()
}

#[test]
fn test_profile_text_output() {
    let dir = TempDir::new().unwrap();
    let file = csv_file("a,b\n1,x\n2,y\n3,x\n");

    kagglegenius(&dir)
        .args(["profile", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 3"))
        .stdout(predicate::str::contains("numeric"))
        .stdout(predicate::str::contains("categorical"))
        .stdout(predicate::str::contains("2.00"));
}

#[test]
fn test_profile_json_output() {
    let dir = TempDir::new().unwrap();
    let file = csv_file("a,b\n1,x\n2,y\n3,x\n");

    let output = kagglegenius(&dir)
        .args(["profile", "--format", "json", "--file"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["rowCount"], 3);
    assert_eq!(snapshot["columns"][0]["type"], "numeric");
    assert_eq!(snapshot["columns"][0]["stats"]["mean"], 2.0);
    assert_eq!(snapshot["columns"][1]["stats"]["uniqueCount"], 2);
    assert_eq!(snapshot["sampleRows"][0]["b"], "x");
}

#[test]
fn test_profile_empty_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = csv_file("\n\n");

    kagglegenius(&dir)
        .args(["profile", "--file"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("The uploaded file is empty."));
}

#[test]
fn test_demo_report_json() {
    let dir = TempDir::new().unwrap();
    let output = kagglegenius(&dir)
        .args(["demo", "--dataset", "housing", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["problemType"], "regression");
    assert_eq!(report["targetSuggestion"], "SalePrice");
}

#[test]
fn test_demo_text_output() {
    let dir = TempDir::new().unwrap();
    kagglegenius(&dir)
        .args(["demo", "--dataset", "Fraud"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: Class"))
        .stdout(predicate::str::contains("PR-AUC"));
}

#[test]
fn test_unknown_demo_fails() {
    let dir = TempDir::new().unwrap();
    kagglegenius(&dir)
        .args(["demo", "--dataset", "mnist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mnist"));
}

#[test]
fn test_analyze_dry_run_prints_prompt() {
    let dir = TempDir::new().unwrap();
    let file = csv_file("a,b\n1,x\n2,y\n3,x\n");

    kagglegenius(&dir)
        .args(["analyze", "--dry-run", "--model", "test-model", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN MODE"))
        .stdout(predicate::str::contains("models/test-model:generateContent"))
        .stdout(predicate::str::contains("Total Rows: 3"));
}

#[test]
fn test_analyze_without_key_suggests_configuration() {
    let dir = TempDir::new().unwrap();
    let file = csv_file("a\n1\n");

    kagglegenius(&dir)
        .args(["analyze", "--endpoint", "http://127.0.0.1:9", "--file"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"))
        .stderr(predicate::str::contains("API key is missing or invalid"));
}

#[test]
fn test_analyze_renders_and_saves_report() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/test-model:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(&titanic_report()))
        .create();

    let dir = TempDir::new().unwrap();
    let file = csv_file("a,b\n1,x\n2,y\n3,x\n");
    let output_path = dir.path().join("report.json");

    kagglegenius(&dir)
        .args(["analyze", "--api-key", "test-key", "--model", "test-model", "--endpoint"])
        .arg(server.url())
        .arg("--output")
        .arg(&output_path)
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifying Problem Type..."))
        .stdout(predicate::str::contains("Target: Survived"))
        .stdout(predicate::str::contains("Report saved"));

    mock.assert();
    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(saved["problemType"], "classification");
}

#[test]
fn test_analyze_reports_malformed_response() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/models/test-model:generateContent")
        .with_status(200)
        .with_body(gemini_reply("not json at all"))
        .create();

    let dir = TempDir::new().unwrap();
    let file = csv_file("a\n1\n");

    kagglegenius(&dir)
        .args(["analyze", "--api-key", "test-key", "--model", "test-model", "--endpoint"])
        .arg(server.url())
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid response format from AI"));
}

#[test]
fn test_analyze_then_chat() {
    let mut server = mockito::Server::new();
    let analysis = server
        .mock("POST", "/models/test-model:generateContent")
        .match_body(mockito::Matcher::Regex("responseSchema".to_string()))
        .with_status(200)
        .with_body(gemini_reply(&titanic_report()))
        .create();
    let chat = server
        .mock("POST", "/models/test-model:generateContent")
        .match_body(mockito::Matcher::Regex("systemInstruction".to_string()))
        .with_status(200)
        .with_body(gemini_reply("Try a Deck feature from Cabin."))
        .create();

    let dir = TempDir::new().unwrap();
    let file = csv_file("a,b\n1,x\n2,y\n3,x\n");

    kagglegenius(&dir)
        .args(["analyze", "--chat", "--api-key", "test-key", "--model", "test-model", "--endpoint"])
        .arg(server.url())
        .arg("--file")
        .arg(file.path())
        .write_stdin("What about cabins?\nexit\nignored\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("finished analyzing your dataset"))
        .stdout(predicate::str::contains("Try a Deck feature from Cabin."));

    analysis.assert();
    chat.assert();
}
