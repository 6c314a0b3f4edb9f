//! Tests for the `teletest` binary's output streams

use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;

fn documents(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let diagram = dir.join("a.puml");
    let spec = dir.join("b.pdf");
    fs::write(&diagram, "@startuml\n@enduml\n").expect("Failed to write diagram");
    fs::write(&spec, b"%PDF-1.4\n").expect("Failed to write spec");
    (diagram, spec)
}

#[test]
fn test_json_report_with_copy_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let (diagram, spec) = documents(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_teletest"))
        .arg("generate")
        .arg("-d")
        .arg(&diagram)
        .arg("-s")
        .arg(&spec)
        .args(["-t", "functional", "--json", "--copy", "TC-001", "--latency-ms", "0"])
        .env("TELETEST_LOG", "off")
        .output()
        .expect("Failed to run teletest");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report");
    assert_eq!(report["success"], true);
    assert_eq!(report["testCases"].as_array().map(|c| c.len()), Some(5));
    assert_eq!(report["testCases"][0]["id"], "TC-001");

    assert!(!output.stdout.contains(&0x1b));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\x1b]52;c;"));
}

#[test]
fn test_summary_output_without_copy() {
    let dir = tempfile::tempdir().unwrap();
    let (diagram, spec) = documents(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_teletest"))
        .arg("generate")
        .arg("--diagram")
        .arg(&diagram)
        .arg("--spec")
        .arg(&spec)
        .args(["--type", "security", "--latency-ms", "0"])
        .env("TELETEST_LOG", "off")
        .output()
        .expect("Failed to run teletest");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Generated Test Cases"));
    assert!(stdout.contains("#1 Verify user can login with valid credentials"));
}
