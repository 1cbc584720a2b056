//! CLI end-to-end flows: config, validation, and parameter rendering.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const DQ_VARS: [&str; 5] = [
    "DQ_DEFAULT_SCENARIO",
    "DQ_DEFAULT_PAGE",
    "DQ_DEFAULT_UID",
    "DQ_BASE_URL",
    "DQ_LOG",
];

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("config")
        .join("tests")
        .join("fixtures")
        .join(relative)
}

fn dq() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dq"));
    for var in DQ_VARS {
        command.env_remove(var);
    }
    command
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn defaults_follow_config_file_and_env() -> Result<(), Box<dyn std::error::Error>> {
    let config = fixture_path("config/dq.valid.toml");
    let output = dq()
        .env("DQ_DEFAULT_UID", "env-user")
        .args(["--config"])
        .arg(&config)
        .args(["defaults"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("queryString: scenario=weekend-deals&page=landing&uid=env-user\n"));
    assert!(stdout.contains(
        "url: https://deals.example.com/offers?scenario=weekend-deals&page=landing&uid=env-user\n"
    ));
    Ok(())
}

#[test]
fn validate_reports_issues_with_exit_code_two() -> Result<(), Box<dyn std::error::Error>> {
    let output = dq()
        .args([
            "--output",
            "json",
            "validate",
            "--query",
            "scenario=deal-finder&page=foo&uid=foo&maxTotalRate=9.99&lengthOfStay=400",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value.pointer("/data/valid"), Some(&serde_json::Value::Bool(false)));
    let fields: Vec<&str> = value
        .pointer("/data/issues")
        .and_then(serde_json::Value::as_array)
        .ok_or("issues should be an array")?
        .iter()
        .filter_map(|issue| issue.get("field").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(fields, ["lengthOfStay", "maxTotalRate", "maxTotalRate"]);
    Ok(())
}

#[test]
fn params_reads_json_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = dq()
        .env("DQ_BASE_URL", "http://localhost:8080/search")
        .args(["params", "--input-json", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("stdin should be piped"))?
        .write_all(
            br#"{"scenario":"deal-finder","page":"foo","uid":"foo","destinationCity":"New York","customParameterName":"SortOrder","customParameterValue":"asc"}"#,
        )?;
    let output = child.wait_with_output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_of(&output),
        concat!(
            "status: ok\n",
            "parameters:\n",
            "  scenario: deal-finder\n",
            "  page: foo\n",
            "  uid: foo\n",
            "  destinationCity: New York\n",
            "  sortOrder: asc\n",
            "queryString: scenario=deal-finder&page=foo&uid=foo&destinationCity=New+York&sortOrder=asc\n",
            "url: http://localhost:8080/search?scenario=deal-finder&page=foo&uid=foo&destinationCity=New+York&sortOrder=asc\n",
        )
    );
    Ok(())
}

#[test]
fn params_rejects_colliding_custom_key() -> Result<(), Box<dyn std::error::Error>> {
    let output = dq()
        .args([
            "--output",
            "json",
            "params",
            "--query",
            "scenario=deal-finder&page=foo&uid=foo&customParameterName=Uid&customParameterValue=other",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value.pointer("/error/code").and_then(serde_json::Value::as_str),
        Some("ERR_DOMAIN_DUPLICATE_PARAMETER_KEY")
    );
    assert_eq!(
        value.pointer("/error/meta/key").and_then(serde_json::Value::as_str),
        Some("uid")
    );
    Ok(())
}

#[test]
fn invalid_config_version_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let output = dq()
        .arg("--config")
        .arg(fixture_path("config/dq.invalid-version.toml"))
        .args(["config", "show"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).contains("code: ERR_CONFIG_UNSUPPORTED_VERSION\n"));
    Ok(())
}

#[test]
fn config_show_renders_json_file_format() -> Result<(), Box<dyn std::error::Error>> {
    let output = dq()
        .arg("--config")
        .arg(fixture_path("config/dq.valid.json"))
        .args(["config", "show", "--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value.pointer("/defaults/uid").and_then(serde_json::Value::as_str),
        Some("user-42")
    );
    Ok(())
}

#[test]
fn verbose_json_logs_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let output = dq()
        .args([
            "-vv",
            "--log-format",
            "json",
            "params",
            "--query",
            "scenario=deal-finder&page=foo&uid=foo&utm_source=mail",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout_of(&output).contains("ignoring unknown query key"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let ignored = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|event| {
            event.pointer("/fields/message").and_then(serde_json::Value::as_str)
                == Some("ignoring unknown query key")
        })
        .ok_or("expected a JSON log line for the ignored key")?;
    assert_eq!(
        ignored.pointer("/fields/key").and_then(serde_json::Value::as_str),
        Some("utm_source")
    );
    Ok(())
}
