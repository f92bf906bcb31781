use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs the binary from an empty directory so no stray .env is picked up.
fn planscope(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("planscope").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GOOGLE_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env_remove("GEMINI_API_URL");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: planscope <COMMAND>"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_cli_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port <PORT>"))
        .stdout(predicate::str::contains("--host <HOST>"))
        .stdout(predicate::str::contains("--templates <TEMPLATES>"))
        .stdout(predicate::str::contains("8501"));
}

#[test]
fn test_cli_no_command() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: planscope <COMMAND>"));
}

#[test]
fn test_analyze_rejects_unknown_task() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .args(["analyze", "--task", "budget", "a shed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown task 'budget'"));
}

#[test]
fn test_analyze_blank_description_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .args(["analyze", "--task", "risk", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter a project description to run the analysis."));
}

#[test]
fn test_analyze_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    planscope(&dir)
        .env("GEMINI_API_URL", "http://127.0.0.1:1")
        .args(["analyze", "--task", "cost", "a shed"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("!! Cost Estimation failed"))
        .stderr(predicate::str::contains("GOOGLE_API_KEY is not set"));
}

#[test]
fn test_serve_startup_error_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = planscope(&dir)
        .env("RUST_LOG", "error")
        .args(["serve", "--port", "0", "--templates", "missing-templates"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Templates directory missing-templates not found").count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_analyze_all_against_mock_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Looks feasible." }] } }]
        })))
        .expect(6)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let assert = planscope(&dir)
        .env("GOOGLE_API_KEY", "test-key")
        .env("GEMINI_API_URL", server.uri())
        .args(["analyze", "--task", "all", "A rooftop garden"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("### All Analyses Results"));
    assert_eq!(stdout.matches("Looks feasible.").count(), 6);
    assert!(stdout.contains("Cost Estimate ($)"));
    assert!(stdout.contains("Risk Factor Likelihood"));
}
