//! Structured reporting for orchestration runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use failwright_syntax::{Direction, MarkerDescriptor};

use crate::error::RunError;

/// Stages of one run. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Resolving path arguments.
    Discovering,
    /// Rewriting discovered files one at a time.
    Rewriting,
    /// Writing or removing companion files.
    ManagingCompanions,
    /// The run finished successfully.
    Done,
    /// The run stopped at its first hard error.
    Aborted,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Discovering => "discovering",
            Self::Rewriting => "rewriting",
            Self::ManagingCompanions => "managing_companions",
            Self::Done => "done",
            Self::Aborted => "aborted",
        })
    }
}

/// Markers reported for one discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    path: PathBuf,
    markers: Vec<MarkerDescriptor>,
}

impl FileReport {
    /// Builds a report for `path`.
    #[must_use]
    pub const fn new(path: PathBuf, markers: Vec<MarkerDescriptor>) -> Self {
        Self { path, markers }
    }

    /// Absolute path of the source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Markers the transform reported; empty when the file was untouched.
    #[must_use]
    pub fn markers(&self) -> &[MarkerDescriptor] {
        &self.markers
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    direction: Direction,
    files: Vec<FileReport>,
    companions_written: usize,
    companions_removed: usize,
}

impl RunSummary {
    pub(crate) const fn new(direction: Direction, files: Vec<FileReport>) -> Self {
        Self {
            direction,
            files,
            companions_written: 0,
            companions_removed: 0,
        }
    }

    pub(crate) const fn record_companions(&mut self, written: usize, removed: usize) {
        self.companions_written = written;
        self.companions_removed = removed;
    }

    /// Direction the run applied.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Per-file results in discovery order.
    #[must_use]
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Number of files the transform rewrote.
    #[must_use]
    pub fn files_rewritten(&self) -> usize {
        self.files
            .iter()
            .filter(|file| !file.markers.is_empty())
            .count()
    }

    /// Total markers reported across all files.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.files.iter().map(|file| file.markers.len()).sum()
    }

    /// Companion files written.
    #[must_use]
    pub const fn companions_written(&self) -> usize {
        self.companions_written
    }

    /// Companion files removed.
    #[must_use]
    pub const fn companions_removed(&self) -> usize {
        self.companions_removed
    }
}

/// Observer notified as a run progresses.
pub trait RunReporter {
    /// Invoked whenever the run enters a new phase.
    fn phase_entered(&self, phase: RunPhase);

    /// Invoked once discovery produced its file list.
    fn discovery_completed(&self, files: &[PathBuf]);

    /// Invoked after a file was replaced by its transformed content.
    fn file_rewritten(&self, path: &Path, markers: &[MarkerDescriptor]);

    /// Invoked when the transform found nothing to do in a file.
    fn file_unchanged(&self, path: &Path);

    /// Invoked after a companion file was written.
    fn companion_written(&self, path: &Path, bindings: usize);

    /// Invoked after a companion file was removed.
    fn companion_removed(&self, path: &Path);

    /// Invoked when the run finished.
    fn run_completed(&self, summary: &RunSummary);

    /// Invoked when the run aborted.
    fn run_aborted(&self, error: &RunError);
}

impl<T> RunReporter for Arc<T>
where
    T: RunReporter + ?Sized,
{
    fn phase_entered(&self, phase: RunPhase) {
        (**self).phase_entered(phase);
    }

    fn discovery_completed(&self, files: &[PathBuf]) {
        (**self).discovery_completed(files);
    }

    fn file_rewritten(&self, path: &Path, markers: &[MarkerDescriptor]) {
        (**self).file_rewritten(path, markers);
    }

    fn file_unchanged(&self, path: &Path) {
        (**self).file_unchanged(path);
    }

    fn companion_written(&self, path: &Path, bindings: usize) {
        (**self).companion_written(path, bindings);
    }

    fn companion_removed(&self, path: &Path) {
        (**self).companion_removed(path);
    }

    fn run_completed(&self, summary: &RunSummary) {
        (**self).run_completed(summary);
    }

    fn run_aborted(&self, error: &RunError) {
        (**self).run_aborted(error);
    }
}

/// Default reporter that records run events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredRunReporter;

impl StructuredRunReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RunReporter for StructuredRunReporter {
    fn phase_entered(&self, phase: RunPhase) {
        tracing::debug!(
            target: "failwright::run",
            event = "phase_entered",
            phase = %phase,
            "run phase changed"
        );
    }

    fn discovery_completed(&self, files: &[PathBuf]) {
        tracing::info!(
            target: "failwright::run",
            event = "discovery_completed",
            files = files.len(),
            "discovered source files"
        );
    }

    fn file_rewritten(&self, path: &Path, markers: &[MarkerDescriptor]) {
        tracing::info!(
            target: "failwright::run",
            event = "file_rewritten",
            path = %path.display(),
            markers = markers.len(),
            "rewrote source file"
        );
    }

    fn file_unchanged(&self, path: &Path) {
        tracing::debug!(
            target: "failwright::run",
            event = "file_unchanged",
            path = %path.display(),
            "no failpoints to rewrite"
        );
    }

    fn companion_written(&self, path: &Path, bindings: usize) {
        tracing::info!(
            target: "failwright::run",
            event = "companion_written",
            path = %path.display(),
            bindings,
            "wrote companion file"
        );
    }

    fn companion_removed(&self, path: &Path) {
        tracing::info!(
            target: "failwright::run",
            event = "companion_removed",
            path = %path.display(),
            "removed companion file"
        );
    }

    fn run_completed(&self, summary: &RunSummary) {
        tracing::info!(
            target: "failwright::run",
            event = "run_completed",
            direction = %summary.direction(),
            files = summary.files().len(),
            rewritten = summary.files_rewritten(),
            markers = summary.marker_count(),
            companions_written = summary.companions_written(),
            companions_removed = summary.companions_removed(),
            "run completed"
        );
    }

    fn run_aborted(&self, error: &RunError) {
        tracing::error!(
            target: "failwright::run",
            event = "run_aborted",
            phase = %error.phase(),
            error = %error,
            "run aborted"
        );
    }
}
