#![allow(dead_code)]

use puppetlint_rs::{LintOutcome, Linter, TokenStream, tokenize};

/// Lint without fixing.
pub fn lint(input: &str) -> LintOutcome {
    Linter::new().run(input, false)
}

/// Lint with fixing enabled.
pub fn fix(input: &str) -> LintOutcome {
    Linter::new().run(input, true)
}

/// Assert that lexing then serializing reproduces the input exactly.
pub fn roundtrip(input: &str) {
    let output = TokenStream::new(tokenize(input)).serialize();
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Assert that exactly one problem with `message` sits at
/// `line`/`column`.
pub fn expect_problem_at(outcome: &LintOutcome, message: &str, line: usize, column: usize) {
    let found = outcome
        .problems
        .iter()
        .any(|p| p.message == message && p.line == line && p.column == column);
    assert!(
        found,
        "expected problem {message:?} at {line}:{column}, got: {:?}",
        outcome
            .problems
            .iter()
            .map(|p| (p.message, p.line, p.column))
            .collect::<Vec<_>>()
    );
}

/// Assert that every problem with `message` was fixed.
pub fn expect_fixed(outcome: &LintOutcome, message: &str) {
    let mut seen = false;
    for problem in &outcome.problems {
        if problem.message == message {
            seen = true;
            assert!(
                problem.fixed,
                "problem {message:?} at {}:{} was not fixed",
                problem.line, problem.column
            );
        }
    }
    assert!(seen, "no problem {message:?} was reported at all");
}
