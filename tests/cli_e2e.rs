//! End-to-end tests driving the `pyweek` binary.

#![allow(deprecated)]

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use support::fixtures::{RangeResponder, manifest_json, payload, valid_members, write_zip};
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Binary with an isolated config home and no color or log noise from the host.
fn pyweek(config_root: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("pyweek").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_root.join("xdg-config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PYWEEK_URL");
    cmd
}

#[test]
fn test_binary_help_lists_subcommands() {
    let tempdir = TempDir::new().unwrap();
    pyweek(tempdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_binary_without_subcommand_is_usage_error() {
    let tempdir = TempDir::new().unwrap();
    pyweek(tempdir.path()).assert().failure().code(2);
}

#[test]
fn test_binary_verify_valid_entry_succeeds() {
    let tempdir = TempDir::new().unwrap();
    let archive = tempdir.path().join("My-Game-1.0.zip");
    let members = valid_members("My-Game-1.0");
    let refs: Vec<&str> = members.iter().map(String::as_str).collect();
    write_zip(&archive, &refs);

    pyweek(tempdir.path())
        .arg("verify")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid."));
}

#[test]
fn test_binary_verify_missing_file_fails_with_count() {
    let tempdir = TempDir::new().unwrap();
    let archive = tempdir.path().join("Missing-1.0.zip");

    pyweek(tempdir.path())
        .arg("verify")
        .arg(&archive)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not exist."))
        .stdout(predicate::str::contains("1 error occurred while verifying file"));
}

#[test]
fn test_binary_rejects_invalid_config_file() {
    let tempdir = TempDir::new().unwrap();
    let config_dir = tempdir.path().join("xdg-config").join("pyweek");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "colour = \"always\"\n").unwrap();

    pyweek(tempdir.path())
        .arg("verify")
        .arg(tempdir.path().join("x.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test]
async fn test_binary_download_fetches_every_file() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let base = mock_server.uri();
    let content = payload(4096);

    Mock::given(method("GET"))
        .and(path("/33/downloads.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest_json(&[(
            "What the Frog!?",
            vec![("frog-1.0.zip", format!("{base}/frog-1.0.zip"), content.len())],
        )])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/frog-1.0.zip"))
        .respond_with(RangeResponder {
            content: content.clone(),
        })
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let out = tempdir.path().join("out");

    pyweek(tempdir.path())
        .env("PYWEEK_URL", &base)
        .arg("download")
        .arg("33")
        .arg("-d")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("All files downloaded successfully."));

    assert_eq!(
        std::fs::read(out.join("what-the-frog").join("frog-1.0.zip")).unwrap(),
        content
    );
}

#[tokio::test]
async fn test_binary_download_partial_failure_exits_one() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/7/downloads.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest_json(&[(
            "Entry",
            vec![
                ("ok-1.0.zip", format!("{base}/ok-1.0.zip"), 3),
                ("gone-1.0.zip", format!("{base}/gone-1.0.zip"), 3),
            ],
        )])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok-1.0.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone-1.0.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    let out = tempdir.path().join("out");

    let assert = pyweek(tempdir.path())
        .arg("-q")
        .arg("--base-url")
        .arg(&base)
        .arg("download")
        .arg("7")
        .arg("--directory")
        .arg(&out)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        stdout.contains("1 errors occurred while downloading files."),
        "stdout: {stdout:?}"
    );
    assert!(out.join("entry").join("ok-1.0.zip").exists());
}

#[tokio::test]
async fn test_binary_download_manifest_failure_reports_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/404/downloads.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    pyweek(tempdir.path())
        .arg("--base-url")
        .arg(mock_server.uri())
        .arg("download")
        .arg("404")
        .arg("-d")
        .arg(tempdir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to download challenge 404"));
}
