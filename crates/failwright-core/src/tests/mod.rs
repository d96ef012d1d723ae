//! Test suites for the failwright batch engine.

mod support;
