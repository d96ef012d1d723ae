//! Batch sequencing: discover, rewrite each file, then manage companions.

use std::path::{Path, PathBuf};

use failwright_syntax::{BindingRenderer, Direction, Transform};

use crate::companion::{CompanionAction, CompanionManager, log_removal_failure};
use crate::discover::FileDiscoverer;
use crate::error::RunError;
use crate::layout::SourceLayout;
use crate::report::{FileReport, RunPhase, RunReporter, RunSummary, StructuredRunReporter};
use crate::rewrite::AtomicRewriter;

/// Runs one transform over a batch of files.
///
/// The run is sequential and stops at the first hard error. Each file's
/// rewrite is atomic, but files rewritten before the error stay rewritten.
pub struct Orchestrator<R = StructuredRunReporter> {
    layout: SourceLayout,
    discoverer: FileDiscoverer,
    rewriter: AtomicRewriter,
    companions: CompanionManager,
    reporter: R,
}

impl Orchestrator {
    /// Builds an orchestrator for `layout` that reports through `tracing`.
    #[must_use]
    pub fn new(layout: SourceLayout) -> Self {
        Self::with_reporter(layout, StructuredRunReporter::new())
    }
}

impl<R: RunReporter> Orchestrator<R> {
    /// Builds an orchestrator reporting to `reporter`.
    #[must_use]
    pub fn with_reporter(layout: SourceLayout, reporter: R) -> Self {
        Self {
            layout,
            discoverer: FileDiscoverer::new(layout),
            rewriter: AtomicRewriter::new(),
            companions: CompanionManager::new(layout),
            reporter,
        }
    }

    /// Resolves relative paths against `dir` instead of the process working
    /// directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.discoverer = self.discoverer.with_working_dir(dir);
        self
    }

    /// Replaces the binding renderer used for companion files.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl BindingRenderer + 'static) -> Self {
        self.companions = CompanionManager::with_renderer(self.layout, renderer);
        self
    }

    /// Runs `transform` over the files found at `paths`.
    ///
    /// # Errors
    ///
    /// Returns the first discovery, rewrite, or companion error. Companion
    /// removal failures are ignored.
    pub fn run<P: AsRef<Path>>(
        &self,
        transform: &dyn Transform,
        paths: &[P],
    ) -> Result<RunSummary, RunError> {
        match self.execute(transform, paths) {
            Ok(summary) => {
                self.reporter.phase_entered(RunPhase::Done);
                self.reporter.run_completed(&summary);
                Ok(summary)
            }
            Err(error) => {
                self.reporter.phase_entered(RunPhase::Aborted);
                self.reporter.run_aborted(&error);
                Err(error)
            }
        }
    }

    fn execute<P: AsRef<Path>>(
        &self,
        transform: &dyn Transform,
        paths: &[P],
    ) -> Result<RunSummary, RunError> {
        self.reporter.phase_entered(RunPhase::Discovering);
        let files = self.discoverer.discover(paths)?;
        self.reporter.discovery_completed(&files);

        self.reporter.phase_entered(RunPhase::Rewriting);
        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            let markers = self.rewriter.rewrite(transform, &path)?;
            if markers.is_empty() {
                self.reporter.file_unchanged(&path);
            } else {
                self.reporter.file_rewritten(&path, &markers);
            }
            reports.push(FileReport::new(path, markers));
        }

        self.reporter.phase_entered(RunPhase::ManagingCompanions);
        let mut summary = RunSummary::new(transform.direction(), reports);
        let (written, removed) = match transform.direction() {
            Direction::Activate => self.activate_companions(summary.files())?,
            Direction::Deactivate => (0, self.remove_companions(summary.files())),
        };
        summary.record_companions(written, removed);
        Ok(summary)
    }

    fn activate_companions(&self, files: &[FileReport]) -> Result<(usize, usize), RunError> {
        let mut written = 0;
        let mut removed = 0;
        for file in files {
            match self.companions.reconcile(file.path(), file.markers())? {
                CompanionAction::Written(path) => {
                    self.reporter.companion_written(&path, file.markers().len());
                    written += 1;
                }
                CompanionAction::Removed(path) => {
                    self.reporter.companion_removed(&path);
                    removed += 1;
                }
                CompanionAction::Untouched => {}
            }
        }
        Ok((written, removed))
    }

    fn remove_companions(&self, files: &[FileReport]) -> usize {
        let mut removed = 0;
        for file in files {
            match self.companions.remove(file.path()) {
                Ok(Some(path)) => {
                    self.reporter.companion_removed(&path);
                    removed += 1;
                }
                Ok(None) => {}
                Err(error) => log_removal_failure(file.path(), &error),
            }
        }
        removed
    }
}
