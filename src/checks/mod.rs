//! Built-in checks.
//!
//! Checks are registered statically: one module per rule, one boxed
//! instance per lint run. Adding a rule means adding a module here and
//! listing it in [`all`]; the lexer, stream, and registry stay
//! untouched.

mod arrow_spacing;
mod double_newline;

pub use arrow_spacing::ArrowSingleSpace;
pub use double_newline::NoDoubleEmptyLines;

use crate::Error;
use crate::check::Check;

/// One instance of every built-in check.
#[must_use]
pub fn all() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(ArrowSingleSpace),
        Box::new(NoDoubleEmptyLines),
    ]
}

/// Ids of every built-in check, sorted.
#[must_use]
pub fn ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = all().iter().map(|c| c.id()).collect();
    ids.sort_unstable();
    ids
}

/// Select checks by id.
///
/// # Errors
///
/// Returns [`Error::UnknownCheck`] when an id matches no built-in
/// check.
pub fn by_ids(selected: &[&str]) -> Result<Vec<Box<dyn Check>>, Error> {
    let mut checks = Vec::with_capacity(selected.len());
    for id in selected {
        let check = all()
            .into_iter()
            .find(|c| c.id() == *id)
            .ok_or_else(|| Error::UnknownCheck((*id).to_string()))?;
        checks.push(check);
    }
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sorted_and_complete() {
        assert_eq!(ids(), vec!["arrow-single-space", "no-double-empty-lines"]);
    }

    #[test]
    fn by_ids_selects_subset() {
        let checks = by_ids(&["arrow-single-space"]).expect("known id");
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].id(), "arrow-single-space");
    }

    #[test]
    fn by_ids_rejects_unknown() {
        let err = by_ids(&["no-such-check"]).expect_err("unknown id");
        assert_eq!(err.to_string(), "unknown check: no-such-check");
    }
}
