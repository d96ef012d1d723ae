//! Companion file lifecycle.
//!
//! A companion exists exactly when its source file carries live failpoints:
//! activation writes it for files with markers and removes leftovers for
//! files without, deactivation removes it unconditionally.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use failwright_syntax::{BindingRenderer, MarkerDescriptor, RustBindingRenderer};

use crate::error::CompanionError;
use crate::layout::SourceLayout;

/// What activation did to a source file's companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionAction {
    /// The companion was (re)written.
    Written(PathBuf),
    /// A stale companion was removed.
    Removed(PathBuf),
    /// No companion existed and none was needed.
    Untouched,
}

/// Writes and removes companion files for one source layout.
pub struct CompanionManager {
    layout: SourceLayout,
    renderer: Box<dyn BindingRenderer>,
}

impl CompanionManager {
    /// Builds a manager rendering Rust bindings.
    #[must_use]
    pub fn new(layout: SourceLayout) -> Self {
        Self::with_renderer(layout, RustBindingRenderer)
    }

    /// Builds a manager with a custom renderer.
    #[must_use]
    pub fn with_renderer(layout: SourceLayout, renderer: impl BindingRenderer + 'static) -> Self {
        Self {
            layout,
            renderer: Box::new(renderer),
        }
    }

    /// Brings the companion of `source` in line with `markers` after an
    /// activation.
    ///
    /// # Errors
    ///
    /// Returns an error when a needed companion cannot be written. Failing
    /// to remove a stale companion is not an error.
    pub fn reconcile(
        &self,
        source: &Path,
        markers: &[MarkerDescriptor],
    ) -> Result<CompanionAction, CompanionError> {
        if !markers.is_empty() {
            return self.write(source, markers).map(CompanionAction::Written);
        }
        Ok(match self.remove(source) {
            Ok(Some(path)) => CompanionAction::Removed(path),
            Ok(None) => CompanionAction::Untouched,
            Err(error) => {
                log_removal_failure(source, &error);
                CompanionAction::Untouched
            }
        })
    }

    /// Renders `markers` into the companion of `source`, replacing any
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns an error when the companion cannot be created or written.
    pub fn write(
        &self,
        source: &Path,
        markers: &[MarkerDescriptor],
    ) -> Result<PathBuf, CompanionError> {
        let path = self.layout.companion_path(source);
        let file = File::create(&path).map_err(|error| CompanionError::Create {
            path: path.clone(),
            source: error,
        })?;

        let module = self.layout.module_path(source);
        let mut writer = BufWriter::new(file);
        self.renderer
            .render(&module, markers, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|error| CompanionError::Write {
                path: path.clone(),
                source: error,
            })?;
        Ok(path)
    }

    /// Removes the companion of `source` if present.
    ///
    /// Returns the removed path, or `None` when there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns removal failures other than "not found"; callers treat them
    /// as best effort.
    pub fn remove(&self, source: &Path) -> io::Result<Option<PathBuf>> {
        let path = self.layout.companion_path(source);
        match fs::remove_file(&path) {
            Ok(()) => Ok(Some(path)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }
}

pub(crate) fn log_removal_failure(source: &Path, error: &io::Error) {
    tracing::debug!(
        target: "failwright::run",
        path = %source.display(),
        error = %error,
        "ignoring companion removal failure"
    );
}
