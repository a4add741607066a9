use crate::check::Check;
use crate::problem::{Problem, ProblemRegistry, Severity};
use crate::stream::TokenStream;
use crate::token::TokenKind;

const MESSAGE: &str = "there should be a single space after an arrow";

/// `=>` must be followed by exactly one space when its value sits on
/// the same line.
///
/// The lexer guarantees an arrow with a value jammed against it still
/// carries a (zero-width) whitespace token, so "no space" and "wrong
/// number of spaces" are the same inspection. Whether the value is an
/// empty string, a space-only string, or anything else is irrelevant:
/// only the inter-token whitespace is examined, never literal content.
/// An arrow at the end of its line (value indented on the next line)
/// is exempt.
pub struct ArrowSingleSpace;

impl Check for ArrowSingleSpace {
    fn id(&self) -> &'static str {
        "arrow-single-space"
    }

    fn inspect(&self, stream: &TokenStream, problems: &mut ProblemRegistry) {
        for (i, token) in stream.iter().enumerate() {
            if token.kind != TokenKind::Arrow {
                continue;
            }
            let Some(next) = stream.get(i + 1) else {
                continue;
            };
            if next.kind != TokenKind::Whitespace {
                // A line break directly after the arrow: exempt.
                continue;
            }
            // Trailing whitespace before a line break is not this
            // check's business either.
            if stream
                .get(i + 2)
                .is_none_or(|t| t.kind == TokenKind::Newline)
            {
                continue;
            }
            if next.text == " " {
                continue;
            }
            problems.report(
                self.id(),
                MESSAGE,
                Severity::Error,
                token.span.line,
                token.span.column + 2,
                Some(stream.id_at(i + 1)),
            );
        }
    }

    fn fix(&self, stream: &mut TokenStream, problem: &Problem) -> bool {
        let Some(id) = problem.token else {
            return false;
        };
        let Some(index) = stream.index_of(id) else {
            return false;
        };
        let Some(token) = stream.get(index) else {
            return false;
        };
        if token.kind != TokenKind::Whitespace || token.text == " " {
            return false;
        }
        stream.replace(index, " ");
        true
    }
}
