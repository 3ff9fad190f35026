//! Testes de integração para a CLI.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const CREDENTIAL_VARS: [&str; 4] = [
    "NAVER_CLIENT_ID",
    "NAVER_CLIENT_SECRET",
    "GOOGLE_API_KEY",
    "GOOGLE_CX_ID",
];

/// Binário com credenciais removidas do ambiente e config inexistente.
fn factcheck_bin(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_factcheck"));
    cmd.current_dir(dir.path());
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("factcheck"));
}

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_factcheck"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["init", "serve", "check", "sources", "doctor", "version"] {
        assert!(stdout.contains(command), "missing {}", command);
    }
}

#[test]
fn test_invalid_command() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .arg("invalid-command-that-does-not-exist")
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested");

    factcheck_bin(&dir)
        .arg("init")
        .arg("--path")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let content = std::fs::read_to_string(target.join("factcheck.toml")).unwrap();
    assert!(content.contains("[general]"));
    assert!(content.contains("[server]"));
    assert!(content.contains("[[sources]]"));
    assert!(content.contains("query_public_data"));
    assert!(!content.contains("naver_client_id"));
}

#[test]
fn test_sources_lists_catalog() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .arg("sources")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("search_news_fact")
                .and(predicate::str::contains("query_public_data"))
                .and(predicate::str::contains("verify_rumor_db"))
                .and(predicate::str::contains("extract_scientific_paper"))
                .and(predicate::str::contains("naver_news")),
        );
}

#[test]
fn test_sources_respects_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        r#"
[[sources]]
name = "gov"
tool_name = "query_public_data"
tool_summary = "정부 자료"
query_template = "site:go.kr {query}"
backend = "custom_search"
item_cap = 3
weight = 1.2
display_name = "정부 공식 자료"
source_type_label = "공공기관"
error_label = "공공데이터 조회"
empty_message = "관련된 정부 공식 기록을 찾지 못했습니다."
enabled = false
"#,
    )
    .unwrap();

    factcheck_bin(&dir)
        .arg("--config")
        .arg(&config)
        .arg("sources")
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"))
        .stdout(predicate::str::contains("search_news_fact").not());
}

#[test]
fn test_doctor_reports_missing_credentials() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .arg("doctor")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Configuration is valid")
                .and(predicate::str::contains("NAVER_CLIENT_ID"))
                .and(predicate::str::contains("GOOGLE_CX_ID")),
        );
}

#[test]
fn test_doctor_with_credentials() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .env("NAVER_CLIENT_ID", "id")
        .env("NAVER_CLIENT_SECRET", "secret")
        .env("GOOGLE_API_KEY", "key")
        .env("GOOGLE_CX_ID", "cx")
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("All good"));
}

#[test]
fn test_check_without_credentials() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .args(["check", "query_public_data", "공시가격"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API 키가 설정되지 않았습니다"));
}

#[test]
fn test_check_unknown_tool() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir)
        .args(["check", "nope", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown tool: nope"));
}

#[test]
fn test_serve_stdio_session() {
    let dir = TempDir::new().unwrap();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"search_news_fact","arguments":{"query":"백신"}}}"#,
        "\n"
    );

    let mut cmd = factcheck_bin(&dir);
    cmd.arg("-q").arg("serve");

    let output = assert_cmd::Command::from_std(cmd)
        .write_stdin(input)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["result"]["serverInfo"]["name"], "FactCheck-Master");
    assert_eq!(lines[1]["id"], 2);
    assert!(lines[1]["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("API 키가 설정되지 않았습니다"));
}

#[test]
fn test_verbose_and_quiet_flags() {
    let dir = TempDir::new().unwrap();
    factcheck_bin(&dir).args(["-v", "version"]).assert().success();
    factcheck_bin(&dir).args(["-q", "version"]).assert().success();
}
