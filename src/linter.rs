use crate::Error;
use crate::check::Check;
use crate::checks;
use crate::lexer::tokenize;
use crate::problem::{Problem, ProblemRegistry};
use crate::stream::TokenStream;

/// Result of one lint run: every problem found, and the manifest text
/// after the run. With fixing disabled the text is byte-identical to
/// the input.
#[derive(Debug)]
pub struct LintOutcome {
    pub problems: Vec<Problem>,
    pub output: String,
}

impl LintOutcome {
    /// Whether any problem was left unfixed.
    #[must_use]
    pub fn has_unfixed(&self) -> bool {
        self.problems.iter().any(|p| !p.fixed)
    }
}

/// Runs a set of checks over one manifest at a time.
///
/// A run is two strictly sequential phases: every check inspects the
/// immutable stream and reports problems; then, if fixing is enabled,
/// each problem's fixer runs in report order and marks its problem
/// fixed on success. The registry's content is frozen after
/// inspection, only the `fixed` flags change. Runs share no state, so
/// separate manifests may be linted in parallel.
pub struct Linter {
    checks: Vec<Box<dyn Check>>,
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field(
                "checks",
                &self.checks.iter().map(|c| c.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Linter {
    /// A linter with every built-in check enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: checks::all(),
        }
    }

    /// A linter with an explicit subset of checks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCheck`] for an id that matches no
    /// built-in check.
    pub fn with_checks(ids: &[&str]) -> Result<Self, Error> {
        Ok(Self {
            checks: checks::by_ids(ids)?,
        })
    }

    /// Lint `source`, repairing problems when `fix` is set.
    #[must_use]
    pub fn run(&self, source: &str, fix: bool) -> LintOutcome {
        let mut stream = TokenStream::new(tokenize(source));
        let mut registry = ProblemRegistry::new();

        for check in &self.checks {
            check.inspect(&stream, &mut registry);
        }

        if fix {
            for index in 0..registry.len() {
                let problem = registry.all()[index].clone();
                let Some(check) = self.checks.iter().find(|c| c.id() == problem.check) else {
                    continue;
                };
                if check.fix(&mut stream, &problem) {
                    registry.mark_fixed(index);
                }
            }
        }

        LintOutcome {
            problems: registry.into_problems(),
            output: stream.serialize(),
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
