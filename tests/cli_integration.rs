//! CLI integration tests
//!
//! These tests run the built binary against temporary repositories and check:
//! - Command parsing and help text
//! - Report and evidence output formats
//! - Exit codes for fatal and non-fatal conditions

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn polydoc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_polydoc"))
}

fn polydoc(args: &[&str]) -> Output {
    Command::new(polydoc_bin())
        .args(args)
        .env_remove("POLYDOC_REPO_ROOT")
        .env_remove("POLYDOC_OUTPUT_DIR")
        .env_remove("POLYDOC_MAX_DEPTH")
        .env_remove("POLYDOC_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute polydoc")
}

fn repo_arg(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

fn create_mixed_repo(dir: &TempDir) {
    let root = dir.path();
    fs::create_dir_all(root.join("web/src")).unwrap();
    fs::write(root.join("web/src/index.ts"), "export const x = 1;\n").unwrap();
    fs::create_dir_all(root.join("tools")).unwrap();
    fs::write(root.join("tools/gen.py"), "print('hi')\n").unwrap();
    fs::write(root.join("go.mod"), "module example.com/demo\n").unwrap();
}

#[test]
fn test_cli_help() {
    let output = polydoc(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("polydoc"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("health"));
    assert!(stdout.contains("--only"));
}

#[test]
fn test_cli_version() {
    let output = polydoc(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("polydoc"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = polydoc(&["--frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_detect_json() {
    let dir = TempDir::new().unwrap();
    create_mixed_repo(&dir);

    let output = polydoc(&["detect", "--repo", &repo_arg(&dir), "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["detected"],
        serde_json::json!(["typescript", "python", "go"])
    );
    assert_eq!(value["evidence"]["rust"], false);
    assert!(!dir.path().join("docs").exists());
}

#[test]
fn test_detect_human() {
    let dir = TempDir::new().unwrap();
    create_mixed_repo(&dir);

    let output = polydoc(&["detect", "--repo", &repo_arg(&dir)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detected: TypeScript, Python, Go"));
}

#[test]
fn test_run_on_empty_repo() {
    let dir = TempDir::new().unwrap();

    let output = polydoc(&["--repo", &repo_arg(&dir), "--skip", "doxygen"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines().take_while(|l| !l.is_empty()) {
        assert!(line.starts_with("[polydoc] "), "unprefixed line: {}", line);
    }
    assert!(stdout.contains("[polydoc] rust: not detected"));
    assert!(stdout.contains("[polydoc] doxygen: skipped by selection"));

    let output_root = dir.path().join("docs/api");
    assert!(output_root.is_dir());
    assert_eq!(fs::read_dir(&output_root).unwrap().count(), 0);
}

#[test]
fn test_run_json_report_on_stdout() {
    let dir = TempDir::new().unwrap();

    let output = polydoc(&[
        "--repo",
        &repo_arg(&dir),
        "--skip",
        "doxygen",
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let backends = report["backends"].as_array().unwrap();
    assert_eq!(backends.len(), 6);
    assert_eq!(backends[0]["toolchain"], "typescript");
    assert_eq!(backends[0]["outcome"]["status"], "not_detected");
    assert_eq!(backends[5]["outcome"]["status"], "skipped");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[polydoc] "));
}

#[test]
fn test_run_custom_output_dir() {
    let dir = TempDir::new().unwrap();

    let output = polydoc(&[
        "run",
        "--repo",
        &repo_arg(&dir),
        "--output",
        "site/reference",
        "--skip",
        "doxygen",
    ]);
    assert!(output.status.success());
    assert!(dir.path().join("site/reference").is_dir());
    assert!(!dir.path().join("docs").exists());
}

#[test]
fn test_missing_repo_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");

    let output = polydoc(&["--repo", &missing.display().to_string()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Repository root does not exist"));
}

#[test]
fn test_blocked_output_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("docs"), "a file where the output root should go").unwrap();

    let output = polydoc(&["--repo", &repo_arg(&dir)]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to create output root"));
}

#[test]
fn test_output_root_at_repo_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("python/pkg")).unwrap();
    fs::write(dir.path().join("python/pkg/mod.py"), "x = 1\n").unwrap();

    let repo = repo_arg(&dir);
    for command in ["run", "detect"] {
        let output = polydoc(&[command, "--repo", &repo, "--output", "."]);
        assert_eq!(output.status.code(), Some(1));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("must not contain the repository root"));
    }
    assert!(dir.path().join("python/pkg/mod.py").is_file());
}

#[test]
fn test_out_of_range_depth_is_fatal() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(polydoc_bin())
        .args(["detect", "--repo", &repo_arg(&dir)])
        .env("POLYDOC_MAX_DEPTH", "1000")
        .output()
        .expect("Failed to execute polydoc");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_health_lists_every_generator() {
    let output = polydoc(&["health", "--format", "json"]);
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let toolchains: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["toolchain"].as_str().unwrap())
        .collect();
    assert_eq!(
        toolchains,
        vec!["typescript", "python", "go", "java", "rust", "doxygen"]
    );
}
