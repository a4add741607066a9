use crate::check::Check;
use crate::problem::{Problem, ProblemRegistry, Severity};
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

const MESSAGE: &str = "there should be no two consecutive empty lines";

/// At most one empty line between statements.
///
/// A run of `k` newline tokens (blank runs of spaces/tabs between them
/// count as empty) separates `k - 1` lines of nothing; `k >= 3` means
/// two or more consecutive empty lines. One problem per run, reported
/// at the first excess empty line, column 1. Blank lines inside a
/// heredoc body live in one opaque token and never form a run.
pub struct NoDoubleEmptyLines;

impl Check for NoDoubleEmptyLines {
    fn id(&self) -> &'static str {
        "no-double-empty-lines"
    }

    fn inspect(&self, stream: &TokenStream, problems: &mut ProblemRegistry) {
        let mut i = 0;
        while i < stream.len() {
            if !is_blank(stream.get(i)) {
                i += 1;
                continue;
            }
            let mut newlines = Vec::new();
            while i < stream.len() && is_blank(stream.get(i)) {
                if stream.get(i).is_some_and(|t| t.kind == TokenKind::Newline) {
                    newlines.push(i);
                }
                i += 1;
            }
            if newlines.len() >= 3 {
                let index = newlines[2];
                let Some(token) = stream.get(index) else {
                    continue;
                };
                problems.report(
                    self.id(),
                    MESSAGE,
                    Severity::Error,
                    token.span.line,
                    1,
                    Some(stream.id_at(index)),
                );
            }
        }
    }

    fn fix(&self, stream: &mut TokenStream, problem: &Problem) -> bool {
        let Some(id) = problem.token else {
            return false;
        };
        let Some(index) = stream.index_of(id) else {
            return false;
        };

        // Re-derive the blank run around the target; an earlier fix
        // may already have reshaped it.
        let mut start = index;
        while start > 0 && is_blank(stream.get(start - 1)) {
            start -= 1;
        }
        let mut end = index;
        while is_blank(stream.get(end + 1)) {
            end += 1;
        }

        let newlines: Vec<usize> = (start..=end)
            .filter(|&j| stream.get(j).is_some_and(|t| t.kind == TokenKind::Newline))
            .collect();
        if newlines.len() < 3 {
            return false;
        }
        let Some(&last) = newlines.last() else {
            return false;
        };

        // Keep the first two newlines (one empty line) and whatever
        // indentation follows the run; drop the rest.
        for j in (newlines[1] + 1..=last).rev() {
            stream.remove(j);
        }
        true
    }
}

fn is_blank(token: Option<&Token>) -> bool {
    token.is_some_and(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Whitespace))
}
