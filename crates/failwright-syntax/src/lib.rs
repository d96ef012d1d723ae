//! Failpoint marker transforms for Rust sources.
//!
//! Failpoints are declared as line comments:
//!
//! ```text
//! // failpoint: var sync_fails bool
//! // if sync_fails { return Err(io::ErrorKind::Other.into()); }
//! ```
//!
//! [`Activate`] rewrites each marker and its commented body into live code
//! guarded by a generated binding; [`Deactivate`] restores the comment form.
//! The two transforms are inverse on every input they accept, and both leave
//! unrelated lines byte-for-byte untouched.
//!
//! [`RustBindingRenderer`] produces the companion bindings the active code
//! refers to.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use failwright_syntax::{Direction, Transform};
//!
//! let source = "// failpoint: var stall\n// stall_forever();\n";
//! let mut active = Vec::new();
//! let markers = Direction::Activate
//!     .transform()
//!     .apply(&mut Cursor::new(source), &mut active)?;
//! assert_eq!(markers.len(), 1);
//!
//! let mut restored = Vec::new();
//! Direction::Deactivate
//!     .transform()
//!     .apply(&mut Cursor::new(active), &mut restored)?;
//! assert_eq!(restored, source.as_bytes());
//! # Ok::<(), failwright_syntax::TransformError>(())
//! ```

mod activate;
mod binding;
mod block;
mod deactivate;
mod error;
mod lines;
mod marker;
mod transform;

pub use activate::Activate;
pub use binding::{BindingRenderer, RustBindingRenderer};
pub use deactivate::Deactivate;
pub use error::TransformError;
pub use marker::MarkerDescriptor;
pub use transform::{Direction, Transform};
