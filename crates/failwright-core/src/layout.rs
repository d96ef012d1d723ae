//! Naming contract between source files and their companions.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// File stems that name their directory's module rather than a module of
/// their own.
const DIRECTORY_MODULE_STEMS: [&str; 3] = ["mod", "lib", "main"];

/// Extension filter and companion naming used for one source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLayout {
    source_extension: &'static str,
    companion_suffix: &'static str,
}

impl SourceLayout {
    /// Rust sources with `<stem>.fail.rs` companions.
    pub const RUST: Self = Self::new("rs", ".fail.rs");

    /// Builds a layout from an extension (without the dot) and a companion
    /// suffix (appended to the file stem).
    #[must_use]
    pub const fn new(source_extension: &'static str, companion_suffix: &'static str) -> Self {
        Self {
            source_extension,
            companion_suffix,
        }
    }

    /// Returns true when `path` names a source file rather than a companion.
    #[must_use]
    pub fn is_source(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .is_some_and(|extension| extension == self.source_extension);
        let is_companion = path
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|name| name.ends_with(self.companion_suffix));
        has_extension && !is_companion
    }

    /// Companion path for a source file: same directory, extension replaced
    /// by the companion suffix.
    #[must_use]
    pub fn companion_path(&self, source: &Path) -> PathBuf {
        let mut name = OsString::from(source.file_stem().unwrap_or_default());
        name.push(self.companion_suffix);
        source.with_file_name(name)
    }

    /// Module context handed to the binding renderer, e.g. `storage::wal`.
    #[must_use]
    pub fn module_path(&self, source: &Path) -> String {
        let directory = source
            .parent()
            .and_then(Path::file_name)
            .and_then(OsStr::to_str);
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();

        match directory {
            Some(dir) if DIRECTORY_MODULE_STEMS.contains(&&*stem) => dir.to_owned(),
            Some(dir) => format!("{dir}::{stem}"),
            None => stem.into_owned(),
        }
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self::RUST
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("src/wal.rs", true)]
    #[case("/abs/lib.rs", true)]
    #[case("src/wal.fail.rs", false)]
    #[case("src/wal.go", false)]
    #[case("src/rs", false)]
    #[case("src/.rs", false)]
    fn classifies_sources(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(SourceLayout::RUST.is_source(Path::new(path)), expected);
    }

    #[rstest]
    #[case("/repo/src/wal.rs", "/repo/src/wal.fail.rs")]
    #[case("/repo/src/a.b.rs", "/repo/src/a.b.fail.rs")]
    #[case("lib.rs", "lib.fail.rs")]
    fn derives_companion_paths(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(
            SourceLayout::RUST.companion_path(Path::new(source)),
            PathBuf::from(expected)
        );
    }

    #[rstest]
    #[case("/repo/storage/wal.rs", "storage::wal")]
    #[case("/repo/storage/mod.rs", "storage")]
    #[case("/repo/server/main.rs", "server")]
    #[case("/repo/engine/lib.rs", "engine")]
    #[case("wal.rs", "wal")]
    #[case("/lib.rs", "lib")]
    fn derives_module_paths(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(SourceLayout::RUST.module_path(Path::new(source)), expected);
    }
}
