//! Batch engine that injects and removes failpoints across source files.
//!
//! A run discovers candidate sources, rewrites each one atomically through a
//! [`failwright_syntax::Transform`], and keeps a generated companion file in
//! lockstep with the failpoints that are live in its source:
//!
//! - [`FileDiscoverer`] resolves path arguments into absolute source paths.
//! - [`AtomicRewriter`] applies the transform with write-then-rename
//!   semantics.
//! - [`CompanionManager`] writes or removes `<stem>.fail.rs` companions.
//! - [`Orchestrator`] sequences the three and reports progress through a
//!   [`RunReporter`].

mod companion;
mod discover;
mod error;
mod layout;
mod orchestrator;
mod report;
mod rewrite;

pub use companion::{CompanionAction, CompanionManager};
pub use discover::FileDiscoverer;
pub use error::{CompanionError, DiscoveryError, RewriteError, RunError};
pub use layout::SourceLayout;
pub use orchestrator::Orchestrator;
pub use report::{FileReport, RunPhase, RunReporter, RunSummary, StructuredRunReporter};
pub use rewrite::{AtomicRewriter, TEMP_SUFFIX, temp_path};

#[cfg(test)]
mod tests;
