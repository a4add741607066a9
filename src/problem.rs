use std::fmt;

use crate::stream::TokenId;

/// How serious a reported violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One recorded rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Id of the check that reported it.
    pub check: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    /// 1-based line of the violation's first character.
    pub line: usize,
    /// 1-based column of the violation's first character.
    pub column: usize,
    /// Token the paired fixer targets, when the check has one.
    pub token: Option<TokenId>,
    /// Set by the fix pass once the fixer has run successfully.
    pub fixed: bool,
}

/// Per-run accumulator of problems.
///
/// Append-only during inspection; the fix pass may flip `fixed` but
/// never adds, removes, or relocates entries.
#[derive(Debug, Default)]
pub struct ProblemRegistry {
    problems: Vec<Problem>,
}

impl ProblemRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            problems: Vec::new(),
        }
    }

    /// Record a violation. No deduplication: two checks may report at
    /// the same coordinate.
    pub fn report(
        &mut self,
        check: &'static str,
        message: &'static str,
        severity: Severity,
        line: usize,
        column: usize,
        token: Option<TokenId>,
    ) {
        self.problems.push(Problem {
            check,
            message,
            severity,
            line,
            column,
            token,
            fixed: false,
        });
    }

    /// All problems, in report order.
    #[must_use]
    pub fn all(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Flip the `fixed` flag. Reserved for the orchestrator's fix pass.
    pub(crate) fn mark_fixed(&mut self, index: usize) {
        if let Some(problem) = self.problems.get_mut(index) {
            problem.fixed = true;
        }
    }

    pub(crate) fn into_problems(self) -> Vec<Problem> {
        self.problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_preserves_order_and_content() {
        let mut registry = ProblemRegistry::new();
        registry.report("a-check", "first", Severity::Error, 2, 12, None);
        registry.report("b-check", "second", Severity::Warning, 4, 1, None);

        let all = registry.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].check, "a-check");
        assert_eq!(all[0].line, 2);
        assert_eq!(all[0].column, 12);
        assert!(!all[0].fixed);
        assert_eq!(all[1].severity, Severity::Warning);
    }

    #[test]
    fn duplicate_coordinates_are_kept() {
        let mut registry = ProblemRegistry::new();
        registry.report("a-check", "msg", Severity::Error, 1, 1, None);
        registry.report("b-check", "msg", Severity::Error, 1, 1, None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn mark_fixed_flips_only_the_flag() {
        let mut registry = ProblemRegistry::new();
        registry.report("a-check", "msg", Severity::Error, 3, 7, None);
        registry.mark_fixed(0);
        let problem = &registry.all()[0];
        assert!(problem.fixed);
        assert_eq!((problem.line, problem.column), (3, 7));
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
