//! Diagnostic system for the Quill front-end.
//!
//! Every problem the front-end reports flows through [`Diagnostic`]: a
//! severity, a stable key from the closed [`DiagCode`] set, the source
//! position the problem is pinned to, and a rendered message. Diagnostics are
//! collected in append-only lists and never abort a build; callers decide what
//! to do once a phase returns.

mod code;
pub mod emitter;

pub use code::DiagCode;

use std::fmt;

/// Severity of a diagnostic record.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lowercase label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single diagnostic record pinned to a source position.
///
/// `row` and `column` are 1-based and always name a position of a token that
/// existed in the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagCode,
    pub path: String,
    pub row: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    /// Build an error diagnostic with the catalog message for `code`.
    #[cold]
    pub fn error(code: DiagCode, path: impl Into<String>, row: u32, column: u32) -> Self {
        Diagnostic {
            severity: Severity::Error,
            code,
            path: path.into(),
            row,
            column,
            message: code.message().to_string(),
        }
    }

    /// Replace the catalog message, keeping the code for searchability.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}[{}]: {}",
            self.path,
            self.row,
            self.column,
            self.severity.label(),
            self.code.key(),
            self.message
        )
    }
}
