//! End-to-end pipeline tests with fake generators
//!
//! Real repositories on disk, real detection, but probes and generator runs
//! are replaced so the tests do not depend on what is installed.

use async_trait::async_trait;
use polydoc::backends::{AvailabilityProbe, Invocation};
use polydoc::dispatch::{CommandRunner, ExitInfo, OutcomeKind, ToolProbe};
use polydoc::progress::{StatusEvent, StatusHandler};
use polydoc::{Orchestrator, Outcome, PolydocConfig, Selection, ToolchainId};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Reports every program in the set as installed
struct FakeProbe {
    installed: HashSet<&'static str>,
}

impl FakeProbe {
    fn all() -> Arc<Self> {
        Self::only(&["npx", "python3", "go", "javadoc", "cargo", "doxygen"])
    }

    fn only(programs: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            installed: programs.iter().copied().collect(),
        })
    }
}

#[async_trait]
impl ToolProbe for FakeProbe {
    async fn is_available(&self, probe: &AvailabilityProbe) -> bool {
        self.installed.contains(probe.program())
    }
}

/// Pretends to be every generator: writes an `index.html` into the output
/// directory named by the invocation, or fails for programs listed in
/// `failing`
#[derive(Default)]
struct FakeGenerator {
    failing: HashSet<&'static str>,
    ran: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn failing(programs: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            failing: programs.iter().copied().collect(),
            ran: Mutex::new(Vec::new()),
        })
    }

    fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

fn output_dir_of(invocation: &Invocation) -> Option<PathBuf> {
    if let Some(capture) = &invocation.stdout_capture {
        return capture.parent().map(Path::to_path_buf);
    }
    if let Some(stdin) = &invocation.stdin {
        let line = stdin
            .lines()
            .find(|l| l.starts_with("OUTPUT_DIRECTORY"))?;
        let value = line.split('=').nth(1)?.trim().trim_matches('"');
        return Some(PathBuf::from(value));
    }
    let flags = ["--out", "--output-directory", "-d", "--target-dir"];
    let args: Vec<String> = invocation
        .args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    args.windows(2)
        .find(|pair| flags.contains(&pair[0].as_str()))
        .map(|pair| PathBuf::from(&pair[1]))
}

#[async_trait]
impl CommandRunner for FakeGenerator {
    async fn run(&self, invocation: &Invocation) -> anyhow::Result<ExitInfo> {
        self.ran.lock().unwrap().push(invocation.program.clone());
        if self.failing.contains(invocation.program.as_str()) {
            return Ok(ExitInfo::failure(2));
        }
        if let Some(dir) = output_dir_of(invocation) {
            fs::write(dir.join("index.html"), "<html></html>")?;
        }
        Ok(ExitInfo::success())
    }
}

#[derive(Default)]
struct Trace {
    events: Mutex<Vec<StatusEvent>>,
}

impl StatusHandler for Trace {
    fn on_status(&self, event: &StatusEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn config() -> PolydocConfig {
    PolydocConfig {
        repo_root: None,
        output_dir: PathBuf::from("docs/api"),
        max_depth: 32,
        clean_stale: true,
        log_level: "info".to_string(),
    }
}

fn orchestrator(
    repo: &Path,
    probe: Arc<FakeProbe>,
    runner: Arc<FakeGenerator>,
) -> Orchestrator {
    Orchestrator::new(repo.to_path_buf(), &config())
        .with_probe(probe)
        .with_runner(runner)
}

fn subdirs(output_root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(output_root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn polyglot_repo(dir: &TempDir) {
    let root = dir.path();
    write(root, "web/app.tsx", "export const App = () => null;\n");
    write(root, "scripts/tool.py", "def main():\n    pass\n");
    write(root, "go.mod", "module example.com/poly\n");
    write(root, "src/main/java/App.java", "public class App {}\n");
    write(root, "Cargo.toml", "[package]\nname = \"poly\"\n");
    write(root, "Doxyfile", "PROJECT_NAME = poly\n");
}

#[tokio::test]
async fn test_empty_repository_runs_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# nothing to document\n");
    let runner = FakeGenerator::failing(&[]);

    let report = orchestrator(dir.path(), FakeProbe::only(&[]), runner.clone())
        .run(&Selection::all())
        .await
        .unwrap();

    assert!(report.evidence.is_empty());
    assert!(report
        .backends
        .iter()
        .all(|b| b.outcome == Outcome::NotDetected));
    assert!(runner.ran().is_empty());
    assert!(subdirs(&dir.path().join("docs/api")).is_empty());
}

#[tokio::test]
async fn test_single_rust_file_dispatches_only_rust() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib.rs", "pub fn answer() -> u32 { 42 }\n");
    let runner = FakeGenerator::failing(&[]);

    let report = orchestrator(dir.path(), FakeProbe::only(&["cargo"]), runner.clone())
        .run(&Selection::all())
        .await
        .unwrap();

    for entry in &report.backends {
        if entry.toolchain == ToolchainId::Rust {
            assert_eq!(entry.outcome, Outcome::Succeeded);
        } else {
            assert_eq!(entry.outcome, Outcome::NotDetected, "{}", entry.toolchain);
        }
    }
    assert_eq!(runner.ran(), vec!["cargo".to_string()]);
    assert_eq!(subdirs(&dir.path().join("docs/api")), vec!["rust"]);
}

#[tokio::test]
async fn test_missing_generator_does_not_block_others() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);
    let runner = FakeGenerator::failing(&[]);
    let probe = FakeProbe::only(&["npx", "python3", "javadoc", "cargo", "doxygen"]);

    let report = orchestrator(dir.path(), probe, runner)
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(
        report.get(ToolchainId::Go).unwrap().outcome.kind(),
        OutcomeKind::Unavailable
    );
    assert_eq!(report.succeeded(), 5);
    assert!(!dir.path().join("docs/api/go").exists());
}

#[tokio::test]
async fn test_failing_generator_does_not_block_later_ones() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);
    let runner = FakeGenerator::failing(&["python3"]);

    let report = orchestrator(dir.path(), FakeProbe::all(), runner.clone())
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(
        report.get(ToolchainId::Python).unwrap().outcome,
        Outcome::Failed {
            reason: "pdoc exited with status 2".to_string()
        }
    );
    for later in [
        ToolchainId::Go,
        ToolchainId::Java,
        ToolchainId::Rust,
        ToolchainId::Doxygen,
    ] {
        assert_eq!(report.get(later).unwrap().outcome, Outcome::Succeeded);
    }
    assert_eq!(runner.ran().len(), 6);
    assert!(dir.path().join("docs/api/rust/index.html").is_file());
    assert!(dir.path().join("docs/api/go/index.html").is_file());
}

#[tokio::test]
async fn test_rerun_gives_identical_outcomes() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);
    let probe = FakeProbe::only(&["python3", "cargo"]);

    let first = orchestrator(dir.path(), probe.clone(), FakeGenerator::failing(&["python3"]))
        .run(&Selection::all())
        .await
        .unwrap();
    let second = orchestrator(dir.path(), probe, FakeGenerator::failing(&["python3"]))
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(first.kinds(), second.kinds());
    assert_eq!(first.evidence, second.evidence);
}

#[tokio::test]
async fn test_all_toolchains_get_disjoint_subdirectories() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);

    let report = orchestrator(dir.path(), FakeProbe::all(), FakeGenerator::failing(&[]))
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 6);
    let dirs: HashSet<PathBuf> = report
        .backends
        .iter()
        .filter_map(|b| b.output_dir.clone())
        .collect();
    assert_eq!(dirs.len(), 6);
    assert_eq!(
        subdirs(&dir.path().join("docs/api")),
        vec!["doxygen", "go", "java", "python", "rust", "typescript"]
    );
}

#[tokio::test]
async fn test_doxygen_installed_without_doxyfile() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/lib.rs", "pub struct Unit;\n");
    let trace = Arc::new(Trace::default());

    let report = orchestrator(dir.path(), FakeProbe::all(), FakeGenerator::failing(&[]))
        .with_status(trace.clone())
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(
        report.get(ToolchainId::Doxygen).unwrap().outcome.kind(),
        OutcomeKind::MissingInput
    );
    assert!(!dir.path().join("docs/api/doxygen").exists());

    let events = trace.events.lock().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        StatusEvent::Detected {
            toolchain: ToolchainId::Doxygen,
            via_tool: true
        }
    )));
}

#[tokio::test]
async fn test_selection_limits_the_sweep() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);
    let runner = FakeGenerator::failing(&[]);
    let selection = Selection::new(vec![ToolchainId::Rust, ToolchainId::Go], vec![]);

    let report = orchestrator(dir.path(), FakeProbe::all(), runner.clone())
        .run(&selection)
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.count(OutcomeKind::Skipped), 4);
    assert_eq!(runner.ran(), vec!["go".to_string(), "cargo".to_string()]);
}

#[tokio::test]
async fn test_selection_keeps_output_of_unselected_backends() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib.rs", "pub fn answer() -> u32 { 42 }\n");
    write(dir.path(), "gen.py", "print('docs')\n");
    let probe = FakeProbe::only(&["python3", "cargo"]);

    orchestrator(dir.path(), probe.clone(), FakeGenerator::failing(&[]))
        .run(&Selection::all())
        .await
        .unwrap();
    assert!(dir.path().join("docs/api/python/index.html").is_file());

    let only_rust = Selection::new(vec![ToolchainId::Rust], vec![]);
    let report = orchestrator(dir.path(), probe, FakeGenerator::failing(&[]))
        .run(&only_rust)
        .await
        .unwrap();

    assert_eq!(
        report.get(ToolchainId::Python).unwrap().outcome,
        Outcome::Skipped
    );
    assert!(dir.path().join("docs/api/python/index.html").is_file());
    assert!(dir.path().join("docs/api/rust/index.html").is_file());
}

#[tokio::test]
async fn test_output_root_at_repo_root_leaves_sources_alone() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "python/pkg/mod.py", "x = 1\n");
    write(dir.path(), "go/main.go", "package main\n");
    let config = PolydocConfig {
        output_dir: PathBuf::from("."),
        ..config()
    };

    let result = Orchestrator::new(dir.path().to_path_buf(), &config)
        .with_probe(FakeProbe::all())
        .with_runner(FakeGenerator::failing(&[]))
        .run(&Selection::all())
        .await;

    assert!(matches!(
        result,
        Err(polydoc::PolydocError::OutputRootContainsRepo { .. })
    ));
    assert!(dir.path().join("python/pkg/mod.py").is_file());
    assert!(dir.path().join("go/main.go").is_file());
}

#[tokio::test]
async fn test_stale_output_from_previous_run_is_removed() {
    let dir = TempDir::new().unwrap();
    polyglot_repo(&dir);

    orchestrator(dir.path(), FakeProbe::all(), FakeGenerator::failing(&[]))
        .run(&Selection::all())
        .await
        .unwrap();
    assert!(dir.path().join("docs/api/java").is_dir());

    fs::remove_file(dir.path().join("src/main/java/App.java")).unwrap();
    let report = orchestrator(dir.path(), FakeProbe::all(), FakeGenerator::failing(&[]))
        .run(&Selection::all())
        .await
        .unwrap();

    assert_eq!(
        report.get(ToolchainId::Java).unwrap().outcome,
        Outcome::NotDetected
    );
    assert!(!dir.path().join("docs/api/java").exists());
    assert!(dir.path().join("docs/api/rust/index.html").is_file());
}
