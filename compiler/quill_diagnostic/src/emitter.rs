//! Terminal rendering for diagnostics.
//!
//! Human-readable output with optional ANSI color. Falls back to the plain
//! `Display` form when color is disabled.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Render a diagnostic with ANSI colors.
pub fn render_colored(diag: &Diagnostic) -> String {
    let color = match diag.severity {
        Severity::Error => colors::ERROR,
        Severity::Warning => colors::WARNING,
    };
    format!(
        "{}{}:{}:{}:{} {}{}[{}]{}: {}",
        colors::BOLD,
        diag.path,
        diag.row,
        diag.column,
        colors::RESET,
        color,
        diag.severity.label(),
        diag.code.key(),
        colors::RESET,
        diag.message
    )
}

/// Write a batch of diagnostics to a stream.
///
/// With `color` off this is the plain `Display` form, one record per line.
pub fn emit_all<W: Write>(out: &mut W, diags: &[Diagnostic], color: bool) -> io::Result<()> {
    for diag in diags {
        if color {
            writeln!(out, "{}", render_colored(diag))?;
        } else {
            writeln!(out, "{diag}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagCode;

    #[test]
    fn plain_emission_is_display_per_line() {
        let diags = vec![
            Diagnostic::error(DiagCode::InvalidSyntax, "a.qul", 1, 1),
            Diagnostic::error(DiagCode::MissingExpr, "a.qul", 2, 5),
        ];
        let mut buf = Vec::new();
        emit_all(&mut buf, &diags, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], diags[0].to_string());
    }

    #[test]
    fn colored_render_keeps_the_key() {
        let diag = Diagnostic::error(DiagCode::BodyNotExist, "b.qul", 4, 2);
        let rendered = render_colored(&diag);
        assert!(rendered.contains("body_not_exist"));
        assert!(rendered.contains("b.qul:4:2"));
    }
}
