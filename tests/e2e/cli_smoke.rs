//! CLI smoke tests: commands that need no config or input.

use std::io;
use std::process::Command;

fn run_dq(args: &[&str]) -> io::Result<std::process::Output> {
    Command::new(env!("CARGO_BIN_EXE_dq"))
        .args(args)
        .env_remove("DQ_LOG")
        .output()
}

#[test]
fn schema_output_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let first = run_dq(&["schema"])?;
    let second = run_dq(&["schema"])?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout, "schema output should be deterministic");

    let value: serde_json::Value = serde_json::from_slice(&first.stdout)?;
    let properties = value
        .get("properties")
        .and_then(serde_json::Value::as_object)
        .ok_or("schema should list properties")?;
    assert!(properties.contains_key("customParameterName"));
    Ok(())
}

#[test]
fn schema_response_flag_switches_model() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_dq(&["schema", "--response"])?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let properties = value
        .get("properties")
        .and_then(serde_json::Value::as_object)
        .ok_or("schema should list properties")?;
    assert!(properties.contains_key("valid"));
    assert!(properties.contains_key("issues"));
    assert!(!properties.contains_key("scenario"));
    Ok(())
}

#[test]
fn version_flag_prints_binary_name() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_dq(&["--version"])?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("dq "));
    Ok(())
}

#[test]
fn missing_request_input_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_dq(&["validate"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
