use crate::problem::{Problem, ProblemRegistry};
use crate::stream::TokenStream;

/// A lint rule: a pattern inspection paired with an optional repair.
///
/// `inspect` runs during the inspection phase and must treat the
/// stream as read-only; `fix` runs during the fix phase, one call per
/// reported problem, and mutates the stream in place. Checks never
/// look inside opaque tokens (string literals, heredoc bodies), so
/// payload text resembling syntax can never match.
pub trait Check {
    /// Stable identifier used for selection and reporting.
    fn id(&self) -> &'static str;

    /// Scan the stream and report every match, in ascending
    /// line/column order.
    fn inspect(&self, stream: &TokenStream, problems: &mut ProblemRegistry);

    /// Repair one reported problem. Returns whether the repair was
    /// applied; a conflicting earlier edit makes this return `false`,
    /// leaving the problem unfixed.
    fn fix(&self, stream: &mut TokenStream, problem: &Problem) -> bool {
        let _ = (stream, problem);
        false
    }
}

impl std::fmt::Debug for dyn Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("id", &self.id()).finish()
    }
}
