//! Whitespace linter and auto-fixer for Puppet manifests.
//!
//! Tokenizes manifest source into a typed token stream, runs a set of
//! style checks over it, reports precisely located problems, and can
//! rewrite the stream to repair violations while leaving everything
//! else byte-for-byte untouched. String literals and heredoc bodies
//! are opaque tokens, so syntax lookalikes inside them can never
//! trigger a check.
//!
//! # Quick start
//!
//! ## Lint a manifest
//!
//! ```
//! use puppetlint_rs::Linter;
//!
//! let source = "class { 'example2':\n  param1 =>  'value1',\n}\n";
//! let outcome = Linter::new().run(source, false);
//! assert_eq!(outcome.problems.len(), 1);
//! assert_eq!(outcome.problems[0].line, 2);
//! assert_eq!(outcome.problems[0].column, 12);
//! // Without fixing, the text comes back untouched.
//! assert_eq!(outcome.output, source);
//! ```
//!
//! ## Repair it
//!
//! ```
//! use puppetlint_rs::Linter;
//!
//! let source = "class { 'example2':\n  param1 =>  'value1',\n}\n";
//! let outcome = Linter::new().run(source, true);
//! assert!(outcome.problems[0].fixed);
//! assert_eq!(outcome.output, "class { 'example2':\n  param1 => 'value1',\n}\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod check;
pub mod checks;
pub mod lexer;
pub mod linter;
pub mod problem;
pub mod stream;
pub mod token;

pub use check::Check;
pub use lexer::tokenize;
pub use linter::{LintOutcome, Linter};
pub use problem::{Problem, ProblemRegistry, Severity};
pub use stream::{TokenId, TokenStream};
pub use token::{Span, Token, TokenKind};

/// Errors surfaced to the caller. The lint core itself never fails: a
/// run is total over any input, and only configuration can be wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A check id that matches no registered check.
    #[error("unknown check: {0}")]
    UnknownCheck(String),
}

/// Lint a manifest with every built-in check, without fixing.
#[must_use]
pub fn lint(source: &str) -> LintOutcome {
    Linter::new().run(source, false)
}

/// Lint a manifest with every built-in check and repair what can be
/// repaired.
#[must_use]
pub fn lint_and_fix(source: &str) -> LintOutcome {
    Linter::new().run(source, true)
}
