use crate::token::{Span, Token};

/// Stable handle to a token, valid for the lifetime of one stream.
///
/// Fixers record the token they target by id rather than by index, so
/// earlier fixes that insert or remove tokens never invalidate the
/// target of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(usize);

/// Ordered, mutable sequence of tokens for one lint run.
///
/// Owns the position invariant: after every edit, each token's span
/// reflects the cumulative effect of all edits before it. Edits that
/// change neither byte length nor line count skip the reflow.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    ids: Vec<TokenId>,
    next_id: usize,
}

impl TokenStream {
    /// Build a stream from lexer output.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let ids = (0..tokens.len()).map(TokenId).collect();
        let next_id = tokens.len();
        Self {
            tokens,
            ids,
            next_id,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Stable id of the token at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn id_at(&self, index: usize) -> TokenId {
        self.ids[index]
    }

    /// Current index of the token with the given id, if it is still in
    /// the stream.
    #[must_use]
    pub fn index_of(&self, id: TokenId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// Replace the text of the token at `index`. Spans of subsequent
    /// tokens are recomputed when the edit shifts them.
    pub fn replace(&mut self, index: usize, new_text: impl Into<String>) {
        let new_text = new_text.into();
        let old = std::mem::replace(&mut self.tokens[index].text, new_text);
        let new = &self.tokens[index].text;
        if old.len() != new.len() || count_newlines(&old) != count_newlines(new) {
            self.reflow(index + 1);
        }
    }

    /// Insert a token after `index`, returning its id. The new token's
    /// span is derived from its neighbours by the reflow.
    pub fn insert_after(&mut self, index: usize, token: Token) -> TokenId {
        let id = TokenId(self.next_id);
        self.next_id += 1;
        self.tokens.insert(index + 1, token);
        self.ids.insert(index + 1, id);
        self.reflow(index + 1);
        id
    }

    /// Remove and return the token at `index`.
    pub fn remove(&mut self, index: usize) -> Token {
        let token = self.tokens.remove(index);
        self.ids.remove(index);
        if !token.text.is_empty() {
            self.reflow(index);
        }
        token
    }

    /// Concatenate all token text in order.
    ///
    /// Identity on an unmodified stream: lexing then serializing any
    /// source returns that source.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Recompute spans from `from` onward, anchored on the previous
    /// token. Positions before the edit point are untouched.
    fn reflow(&mut self, from: usize) {
        let (mut line, mut col) = if from == 0 {
            (1, 1)
        } else {
            let prev = &self.tokens[from - 1];
            advance_span(prev.span, &prev.text)
        };

        for token in &mut self.tokens[from..] {
            token.span = Span { line, column: col };
            (line, col) = advance_span(token.span, &token.text);
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Line breaks in `text`: `\n`, plus any `\r` not part of a CRLF pair.
fn count_newlines(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| {
            b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n'))
        })
        .count()
}

/// Position immediately after `text` starting at `start`, using the
/// same line-break and column accounting as the lexer: CRLF is one
/// break, a lone `\r` is one break, and a leading BOM has no width.
fn advance_span(start: Span, text: &str) -> (usize, usize) {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut line = start.line;
    let mut col = start.column;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                col = 1;
            }
            b'\r' => {
                line += 1;
                col = 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => {
                col += 1;
            }
        }
        i += 1;
    }
    (line, col)
}
