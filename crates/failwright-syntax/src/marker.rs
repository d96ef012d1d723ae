//! Failpoint marker grammar.
//!
//! A marker is a line comment of the form
//! `// failpoint: var <name> [<kind>]`. The active form wraps the commented
//! body in an `if let` guarded by the generated failpoint binding and ends
//! with [`BLOCK_END`].

use std::fmt;

use crate::error::TransformError;

/// Prefix that introduces a failpoint marker comment.
const MARKER_PREFIX: &str = "// failpoint:";

/// Closing line of an active failpoint block (after the indentation).
pub(crate) const BLOCK_END: &str = "} // failpoint: end";

/// Kind assumed when a marker omits one.
const DEFAULT_KIND: &str = "()";

const ACTIVE_OPENING: &str = "if let Some(";
const VAR_KEYWORD: &str = "var";

/// Structured description of one failpoint marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerDescriptor {
    name: String,
    kind: String,
    line: usize,
}

impl MarkerDescriptor {
    /// Builds a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            line,
        }
    }

    /// Failpoint identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type the failpoint evaluates to.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// One-based line of the marker in the transformed input.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Name of the generated binding the active code refers to.
    #[must_use]
    pub fn binding_ident(&self) -> String {
        format!("__fp_{}", self.name)
    }

    /// Code placed before the marker comment on an active header line.
    pub(crate) fn header_code(&self) -> String {
        format!(
            "{ACTIVE_OPENING}{name}) = {binding}.eval::<{kind}>() {{ ",
            name = self.name,
            binding = self.binding_ident(),
            kind = self.kind,
        )
    }
}

impl fmt::Display for MarkerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (line {})", self.name, self.kind, self.line)
    }
}

/// Returns true when the text (after indentation) opens a marker comment.
pub(crate) fn is_marker_comment(text: &str) -> bool {
    text.starts_with(MARKER_PREFIX)
}

/// Returns true when the text (after indentation) looks like an active header.
pub(crate) fn is_active_header(text: &str) -> bool {
    text.starts_with(ACTIVE_OPENING) && text.contains(&format!("{{ {MARKER_PREFIX}"))
}

/// Parses a marker comment such as `// failpoint: var io_error bool`.
pub(crate) fn parse_marker_comment(
    text: &str,
    line: usize,
) -> Result<MarkerDescriptor, TransformError> {
    let Some(rest) = text.strip_prefix(MARKER_PREFIX) else {
        return Err(TransformError::malformed_marker(
            line,
            format!("expected '{MARKER_PREFIX}'"),
        ));
    };
    if !rest.starts_with(char::is_whitespace) {
        return Err(TransformError::malformed_marker(
            line,
            format!("expected whitespace after '{MARKER_PREFIX}'"),
        ));
    }

    let mut tokens = rest.split_whitespace();
    match tokens.next() {
        Some(VAR_KEYWORD) => {}
        Some(other) => {
            return Err(TransformError::malformed_marker(
                line,
                format!("expected '{VAR_KEYWORD}', found '{other}'"),
            ));
        }
        None => {
            return Err(TransformError::malformed_marker(
                line,
                format!("expected '{VAR_KEYWORD}' and a failpoint name"),
            ));
        }
    }

    let name = tokens
        .next()
        .ok_or_else(|| TransformError::malformed_marker(line, "missing failpoint name"))?;
    if !is_identifier(name) {
        return Err(TransformError::malformed_marker(
            line,
            format!("'{name}' is not a valid identifier"),
        ));
    }

    let kind = tokens.next().unwrap_or(DEFAULT_KIND);
    if let Some(extra) = tokens.next() {
        return Err(TransformError::malformed_marker(
            line,
            format!("unexpected token '{extra}'"),
        ));
    }

    Ok(MarkerDescriptor::new(name, kind, line))
}

/// Splits an active header (after indentation) into its descriptor and the
/// verbatim marker comment it carries.
pub(crate) fn parse_active_header(
    text: &str,
    line: usize,
) -> Result<(MarkerDescriptor, &str), TransformError> {
    let comment_start = text
        .find(MARKER_PREFIX)
        .ok_or_else(|| TransformError::malformed_header(line, "missing marker comment"))?;
    let (code, comment) = text.split_at(comment_start);
    let marker = parse_marker_comment(comment, line)?;
    if code != marker.header_code() {
        return Err(TransformError::malformed_header(
            line,
            format!("expected '{}' before the marker", marker.header_code().trim_end()),
        ));
    }
    Ok((marker, comment))
}

fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("// failpoint: var io_error bool", "io_error", "bool")]
    #[case("// failpoint: var slow_sync", "slow_sync", DEFAULT_KIND)]
    #[case("// failpoint:\tvar _retry   u32  ", "_retry", "u32")]
    fn parses_well_formed_markers(#[case] text: &str, #[case] name: &str, #[case] kind: &str) {
        let marker = parse_marker_comment(text, 7).expect("marker should parse");
        assert_eq!(marker.name(), name);
        assert_eq!(marker.kind(), kind);
        assert_eq!(marker.line(), 7);
    }

    #[rstest]
    #[case("// failpoint:")]
    #[case("// failpoint:var x")]
    #[case("// failpoint: end")]
    #[case("// failpoint: var")]
    #[case("// failpoint: var 9lives")]
    #[case("// failpoint: var x bool extra")]
    fn rejects_malformed_markers(#[case] text: &str) {
        let error = parse_marker_comment(text, 3).expect_err("marker should be rejected");
        assert!(
            matches!(error, TransformError::MalformedMarker { line: 3, .. }),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn header_code_embeds_binding_and_kind() {
        let marker = MarkerDescriptor::new("io_error", "bool", 1);
        assert_eq!(
            marker.header_code(),
            "if let Some(io_error) = __fp_io_error.eval::<bool>() { "
        );
    }

    #[test]
    fn active_header_round_trips_marker_comment() {
        let text = "if let Some(x) = __fp_x.eval::<()>() { // failpoint: var x";
        assert!(is_active_header(text));
        let (marker, comment) = parse_active_header(text, 4).expect("header should parse");
        assert_eq!(marker.name(), "x");
        assert_eq!(comment, "// failpoint: var x");
    }

    #[test]
    fn active_header_with_foreign_code_is_rejected() {
        let text = "if let Some(x) = other.eval::<()>() { // failpoint: var x";
        let error = parse_active_header(text, 2).expect_err("header should be rejected");
        assert!(matches!(error, TransformError::MalformedHeader { line: 2, .. }));
    }
}
