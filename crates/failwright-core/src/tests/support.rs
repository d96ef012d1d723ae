//! Shared fixtures for the orchestrator suites.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use failwright_syntax::{Direction, MarkerDescriptor};
use tempfile::TempDir;

use crate::{Orchestrator, RunError, RunPhase, RunReporter, RunSummary, SourceLayout};

/// Source with a single failpoint marker.
pub const ONE_MARKER: &str = concat!(
    "pub fn sync() -> std::io::Result<()> {\n",
    "    // failpoint: var sync_fails bool\n",
    "    // if sync_fails { return Err(std::io::Error::other(\"injected\")); }\n",
    "    Ok(())\n",
    "}\n",
);

/// Source without failpoints.
pub const NO_MARKER: &str = "pub fn plain() -> u8 {\n    // just a comment\n    7\n}\n";

/// Source whose marker is malformed.
pub const BROKEN_MARKER: &str = "fn f() {\n    // failpoint: var 1nvalid\n}\n";

/// Events captured by [`RecordingRunReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Phase(RunPhase),
    Discovered(usize),
    Rewritten(PathBuf, usize),
    Unchanged(PathBuf),
    CompanionWritten(PathBuf),
    CompanionRemoved(PathBuf),
    Completed,
    Aborted(RunPhase),
}

/// Reporter double that records every callback.
#[derive(Debug, Default)]
pub struct RecordingRunReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingRunReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .expect("run reporter mutex poisoned")
            .clone()
    }

    /// Phases entered, in order.
    pub fn phases(&self) -> Vec<RunPhase> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RunEvent::Phase(phase) => Some(phase),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .expect("run reporter mutex poisoned")
            .clear();
    }

    fn record(&self, event: RunEvent) {
        self.events
            .lock()
            .expect("run reporter mutex poisoned")
            .push(event);
    }
}

impl RunReporter for RecordingRunReporter {
    fn phase_entered(&self, phase: RunPhase) {
        self.record(RunEvent::Phase(phase));
    }

    fn discovery_completed(&self, files: &[PathBuf]) {
        self.record(RunEvent::Discovered(files.len()));
    }

    fn file_rewritten(&self, path: &Path, markers: &[MarkerDescriptor]) {
        self.record(RunEvent::Rewritten(path.to_path_buf(), markers.len()));
    }

    fn file_unchanged(&self, path: &Path) {
        self.record(RunEvent::Unchanged(path.to_path_buf()));
    }

    fn companion_written(&self, path: &Path, _bindings: usize) {
        self.record(RunEvent::CompanionWritten(path.to_path_buf()));
    }

    fn companion_removed(&self, path: &Path) {
        self.record(RunEvent::CompanionRemoved(path.to_path_buf()));
    }

    fn run_completed(&self, _summary: &RunSummary) {
        self.record(RunEvent::Completed);
    }

    fn run_aborted(&self, error: &RunError) {
        self.record(RunEvent::Aborted(error.phase()));
    }
}

/// A scratch source directory plus the reporter runs write to.
pub struct TestWorld {
    dir: TempDir,
    pub reporter: Arc<RecordingRunReporter>,
    pub result: Option<Result<RunSummary, RunError>>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            reporter: Arc::new(RecordingRunReporter::default()),
            result: None,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(path, contents).expect("write file");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn orchestrator(&self) -> Orchestrator<Arc<RecordingRunReporter>> {
        Orchestrator::with_reporter(SourceLayout::RUST, Arc::clone(&self.reporter))
            .with_working_dir(self.root())
    }

    /// Runs `direction` over the given paths (relative to the root).
    pub fn run_paths(&mut self, direction: Direction, paths: &[&str]) {
        self.reporter.clear();
        let result = self.orchestrator().run(direction.transform(), paths);
        self.result = Some(result);
    }

    /// Runs `direction` over the whole root directory.
    pub fn run_root(&mut self, direction: Direction) {
        self.run_paths(direction, &[]);
    }

    pub fn summary(&self) -> &RunSummary {
        match &self.result {
            Some(Ok(summary)) => summary,
            other => panic!("expected a successful run, got {other:?}"),
        }
    }

    pub fn error(&self) -> &RunError {
        match &self.result {
            Some(Err(error)) => error,
            other => panic!("expected a failed run, got {other:?}"),
        }
    }
}

pub fn world() -> std::cell::RefCell<TestWorld> {
    std::cell::RefCell::new(TestWorld::new())
}
