//! Companion binding rendering.
//!
//! Every active failpoint refers to a `__fp_<name>` binding. The renderer
//! emits those bindings for one module so the companion file can be compiled
//! next to the rewritten source.

use std::io::{self, Write};

use crate::marker::MarkerDescriptor;

/// First line of every rendered companion.
const GENERATED_HEADER: &str = "// Code generated by failwright. DO NOT EDIT.";

/// Renders the bindings that back a set of active failpoints.
pub trait BindingRenderer {
    /// Writes the bindings for `markers` declared in `module` to `sink`.
    ///
    /// Output must depend only on the arguments so repeated runs produce
    /// byte-identical companions.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `sink`.
    fn render(
        &self,
        module: &str,
        markers: &[MarkerDescriptor],
        sink: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Emits one `failwright_runtime::Failpoint` static per marker.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBindingRenderer;

impl BindingRenderer for RustBindingRenderer {
    fn render(
        &self,
        module: &str,
        markers: &[MarkerDescriptor],
        sink: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(sink, "{GENERATED_HEADER}")?;
        writeln!(
            sink,
            "// Failpoint bindings for module `{}`.",
            module.escape_debug()
        )?;
        for marker in markers {
            writeln!(sink)?;
            writeln!(sink, "#[allow(non_upper_case_globals)]")?;
            writeln!(
                sink,
                "static {}: ::failwright_runtime::Failpoint =",
                marker.binding_ident()
            )?;
            let qualified = format!("{module}::{}", marker.name());
            writeln!(
                sink,
                "    ::failwright_runtime::Failpoint::new({qualified:?}, {:?});",
                marker.kind()
            )?;
        }
        Ok(())
    }
}
