use std::collections::VecDeque;

use crate::token::{Span, Token, TokenKind};

/// Tokenize Puppet manifest source into a sequence of tokens.
///
/// The lexer is total: malformed input (unterminated strings or
/// heredocs) is recovered locally by turning the remaining text into
/// one opaque token, never by failing. Concatenating the returned
/// tokens' text reproduces the input byte-for-byte. A leading UTF-8
/// BOM becomes its own zero-column token so positions stay unshifted.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    /// Heredoc tags opened on the current line, in opening order.
    /// Their bodies start after the next line break.
    pending_heredocs: VecDeque<String>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            pending_heredocs: VecDeque::new(),
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        // A leading BOM is kept as a token of its own so serializing
        // reproduces the file, but it occupies no columns.
        if self.input.starts_with("\u{FEFF}".as_bytes()) {
            tokens.push(Token {
                kind: TokenKind::Other,
                text: "\u{FEFF}".to_string(),
                span: self.span(),
            });
            self.pos = "\u{FEFF}".len();
        }

        while self.pos < self.input.len() {
            let ch = self.input[self.pos];

            match ch {
                b'\n' | b'\r' => {
                    tokens.push(self.read_newline());
                    if !self.pending_heredocs.is_empty() {
                        self.drain_heredocs(&mut tokens);
                    }
                }
                b' ' | b'\t' => {
                    tokens.push(self.read_whitespace());
                }
                b'#' => {
                    tokens.push(self.read_comment());
                }
                b'\'' => {
                    tokens.push(self.read_string(b'\''));
                }
                b'"' => {
                    tokens.push(self.read_string(b'"'));
                }
                b'=' if self.peek_at(1) == Some(b'>') => {
                    let span = self.span();
                    self.advance();
                    self.advance();
                    tokens.push(Token {
                        kind: TokenKind::Arrow,
                        text: "=>".to_string(),
                        span,
                    });
                    // A value jammed against the arrow still gets a
                    // whitespace token, zero-width, so "no space" and
                    // "wrong space" share one shape.
                    if !matches!(self.peek(), None | Some(b' ' | b'\t' | b'\n' | b'\r')) {
                        tokens.push(Token {
                            kind: TokenKind::Whitespace,
                            text: String::new(),
                            span: self.span(),
                        });
                    }
                }
                b'@' if self.peek_at(1) == Some(b'(') => {
                    tokens.push(self.read_heredoc_open());
                }
                b'{' => {
                    tokens.push(self.single_char(TokenKind::LeftBrace));
                }
                b'}' => {
                    tokens.push(self.single_char(TokenKind::RightBrace));
                }
                b',' => {
                    tokens.push(self.single_char(TokenKind::Comma));
                }
                b':' => {
                    tokens.push(self.single_char(TokenKind::Colon));
                }
                b'$' => {
                    tokens.push(self.read_variable());
                }
                _ => {
                    tokens.push(self.read_word());
                }
            }
        }

        tokens
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            match self.input[self.pos] {
                b'\n' => {
                    self.line += 1;
                    self.col = 1;
                }
                // A carriage return alone separates lines; in a CRLF
                // pair the following `\n` does the bookkeeping.
                b'\r' if self.input.get(self.pos + 1) != Some(&b'\n') => {
                    self.line += 1;
                    self.col = 1;
                }
                _ => {
                    self.col += 1;
                }
            }
            self.pos += 1;
        }
    }

    fn raw(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let span = self.span();
        let text = char::from(self.input[self.pos]).to_string();
        self.advance();
        Token { kind, text, span }
    }

    fn read_newline(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        if self.input[self.pos] == b'\r' {
            self.advance();
            if self.peek() == Some(b'\n') {
                self.advance();
            }
        } else {
            self.advance();
        }
        Token {
            kind: TokenKind::Newline,
            text: self.raw(start),
            span,
        }
    }

    fn read_whitespace(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.advance();
        }
        Token {
            kind: TokenKind::Whitespace,
            text: self.raw(start),
            span,
        }
    }

    fn read_comment(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while !matches!(self.peek(), None | Some(b'\n' | b'\r')) {
            self.advance();
        }
        Token {
            kind: TokenKind::Comment,
            text: self.raw(start),
            span,
        }
    }

    /// Read a quoted string as one opaque token, quotes included.
    /// An unterminated string swallows the rest of the input.
    fn read_string(&mut self, quote: u8) -> Token {
        let span = self.span();
        let start = self.pos;
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None => break,
                Some(b'\\') => {
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        Token {
            kind: TokenKind::String,
            text: self.raw(start),
            span,
        }
    }

    fn read_variable(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        self.advance(); // $
        let name_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_' || c == b':')
        {
            self.advance();
        }
        let kind = if self.pos > name_start {
            TokenKind::Variable
        } else {
            TokenKind::Other
        };
        Token {
            kind,
            text: self.raw(start),
            span,
        }
    }

    /// Read a heredoc opening marker `@("TAG":syntax/flags)` and queue
    /// its tag for body capture at the next line break. An unclosed
    /// marker degrades to an `Other` token with no body capture.
    fn read_heredoc_open(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        self.advance(); // @
        self.advance(); // (

        let inner_start = self.pos;
        while !matches!(self.peek(), None | Some(b')' | b'\n' | b'\r')) {
            self.advance();
        }

        if self.peek() != Some(b')') {
            return Token {
                kind: TokenKind::Other,
                text: self.raw(start),
                span,
            };
        }

        let inner = self.raw(inner_start);
        self.advance(); // )

        let tag = heredoc_tag(&inner);
        if !tag.is_empty() {
            self.pending_heredocs.push_back(tag);
        }

        Token {
            kind: TokenKind::HeredocOpen,
            text: self.raw(start),
            span,
        }
    }

    /// Capture the bodies of every heredoc opened on the line that just
    /// ended, in opening order.
    fn drain_heredocs(&mut self, tokens: &mut Vec<Token>) {
        while let Some(tag) = self.pending_heredocs.pop_front() {
            self.read_heredoc_body(&tag, tokens);
            // The line break after a terminator belongs to the outer
            // stream; emit it before the next queued body begins.
            if !self.pending_heredocs.is_empty()
                && matches!(self.peek(), Some(b'\n' | b'\r'))
            {
                tokens.push(self.read_newline());
            }
        }
    }

    fn read_heredoc_body(&mut self, tag: &str, tokens: &mut Vec<Token>) {
        let body_span = self.span();
        let body_start = self.pos;

        while self.pos < self.input.len() {
            let line_end = self.find_line_end();
            let line = String::from_utf8_lossy(&self.input[self.pos..line_end]);

            if is_heredoc_terminator(&line, tag) {
                let body = self.raw(body_start);
                tokens.push(Token {
                    kind: TokenKind::HeredocBody,
                    text: body,
                    span: body_span,
                });
                let term_start = self.pos;
                let end_span = self.span();
                while self.pos < line_end {
                    self.advance();
                }
                tokens.push(Token {
                    kind: TokenKind::HeredocEnd,
                    text: self.raw(term_start),
                    span: end_span,
                });
                return;
            }

            // Consume the line and its break.
            while self.pos < line_end {
                self.advance();
            }
            if self.peek() == Some(b'\r') {
                self.advance();
            }
            if self.peek() == Some(b'\n') {
                self.advance();
            }
        }

        // Unterminated heredoc: the remainder is one opaque body.
        let body = self.raw(body_start);
        if !body.is_empty() {
            tokens.push(Token {
                kind: TokenKind::HeredocBody,
                text: body,
                span: body_span,
            });
        }
    }

    /// Index of the current line's terminating `\r`/`\n`, or EOF.
    fn find_line_end(&self) -> usize {
        let mut i = self.pos;
        while i < self.input.len() && self.input[i] != b'\n' && self.input[i] != b'\r' {
            i += 1;
        }
        i
    }

    fn read_word(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;

        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' || c == b'.'
        ) {
            self.advance();
        }

        if self.pos > start {
            return Token {
                kind: TokenKind::Name,
                text: self.raw(start),
                span,
            };
        }

        // Punctuation we don't classify further: one whole character
        // (never split a multi-byte sequence).
        self.advance();
        while matches!(self.peek(), Some(c) if c & 0xC0 == 0x80) {
            self.advance();
        }
        Token {
            kind: TokenKind::Other,
            text: self.raw(start),
            span,
        }
    }
}

/// Extract the tag from a heredoc marker's inner text, e.g.
/// `"DATA"/L` -> `DATA`, `END:json` -> `END`.
fn heredoc_tag(inner: &str) -> String {
    let head = inner
        .split(['/', ':'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('"');
    head.to_string()
}

/// Terminator line: optional indent, optional `|`, optional `-`, then
/// the tag and nothing else.
fn is_heredoc_terminator(line: &str, tag: &str) -> bool {
    let mut rest = line.trim();
    if let Some(stripped) = rest.strip_prefix('|') {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix('-') {
        rest = stripped.trim_start();
    }
    rest == tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn simple_parameter_line() {
        let tokens = tokenize("  param1 => 'value1',\n");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Whitespace,
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::Arrow,
                TokenKind::Whitespace,
                TokenKind::String,
                TokenKind::Comma,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn arrow_span_and_text() {
        let tokens = tokenize("  param1 => 'value1',\n");
        let arrow = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Arrow)
            .expect("arrow token");
        assert_eq!(arrow.text, "=>");
        assert_eq!(arrow.span.line, 1);
        assert_eq!(arrow.span.column, 10);
    }

    #[test]
    fn tight_arrow_gets_zero_width_whitespace() {
        let tokens = tokenize("param1 =>'value1',\n");
        let arrow_idx = tokens
            .iter()
            .position(|t| t.kind == TokenKind::Arrow)
            .expect("arrow token");
        let marker = &tokens[arrow_idx + 1];
        assert_eq!(marker.kind, TokenKind::Whitespace);
        assert_eq!(marker.text, "");
        assert_eq!(marker.span.column, 10);
        assert_eq!(tokens[arrow_idx + 2].kind, TokenKind::String);
    }

    #[test]
    fn arrow_at_end_of_line_has_no_marker() {
        let tokens = tokenize("param1 =>\n  'value1'\n");
        let arrow_idx = tokens
            .iter()
            .position(|t| t.kind == TokenKind::Arrow)
            .expect("arrow token");
        assert_eq!(tokens[arrow_idx + 1].kind, TokenKind::Newline);
    }

    #[test]
    fn string_payload_is_opaque() {
        let tokens = tokenize("\"param1 =>    'value1'\",\n");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "\"param1 =>    'value1'\"");
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Arrow));
    }

    #[test]
    fn single_quoted_with_escape() {
        let tokens = tokenize(r"'it\'s',");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r"'it\'s'");
        assert_eq!(tokens[1].kind, TokenKind::Comma);
    }

    #[test]
    fn unterminated_string_swallows_rest() {
        let tokens = tokenize("'unclosed => value\nmore");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'unclosed => value\nmore");
    }

    #[test]
    fn heredoc_body_is_opaque() {
        let input = "$data = @(\"DATA\"/L)\n  param1 =>    'value1',\n  | DATA\n";
        let tokens = tokenize(input);
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Arrow));
        let body = tokens
            .iter()
            .find(|t| t.kind == TokenKind::HeredocBody)
            .expect("heredoc body");
        assert_eq!(body.text, "  param1 =>    'value1',\n");
        assert_eq!(body.span.line, 2);
        let end = tokens
            .iter()
            .find(|t| t.kind == TokenKind::HeredocEnd)
            .expect("heredoc end");
        assert_eq!(end.text, "  | DATA");
        assert_eq!(concat(&tokens), input);
    }

    #[test]
    fn heredoc_bare_tag_terminator() {
        let input = "$x = @(EOT)\nline one\nEOT\n";
        let tokens = tokenize(input);
        let body = tokens
            .iter()
            .find(|t| t.kind == TokenKind::HeredocBody)
            .expect("heredoc body");
        assert_eq!(body.text, "line one\n");
        assert_eq!(concat(&tokens), input);
    }

    #[test]
    fn two_heredocs_on_one_line() {
        let input = "$a = @(ONE) + @(TWO)\nfirst\nONE\nsecond\nTWO\n";
        let tokens = tokenize(input);
        let bodies: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::HeredocBody)
            .collect();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].text, "first\n");
        assert_eq!(bodies[1].text, "second\n");
        assert_eq!(concat(&tokens), input);
    }

    #[test]
    fn unterminated_heredoc_swallows_rest() {
        let input = "$x = @(EOT)\nnever closed\nstill body\n";
        let tokens = tokenize(input);
        let body = tokens
            .iter()
            .find(|t| t.kind == TokenKind::HeredocBody)
            .expect("heredoc body");
        assert_eq!(body.text, "never closed\nstill body\n");
        assert_eq!(concat(&tokens), input);
    }

    #[test]
    fn comment_to_end_of_line() {
        let tokens = tokenize("param1 => 1, # a comment\n");
        let comment = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Comment)
            .expect("comment token");
        assert_eq!(comment.text, "# a comment");
    }

    #[test]
    fn crlf_is_one_newline_token() {
        let tokens = tokenize("a\r\nb\r\n");
        let newlines: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .collect();
        assert_eq!(newlines.len(), 2);
        assert_eq!(newlines[0].text, "\r\n");
        assert_eq!(concat(&tokenize("a\r\nb\r\n")), "a\r\nb\r\n");
    }

    #[test]
    fn variable_token() {
        let tokens = tokenize("$facts company::app\n");
        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].text, "$facts");
        assert_eq!(tokens[2].kind, TokenKind::Name);
        assert_eq!(tokens[3].kind, TokenKind::Colon);
        assert_eq!(tokens[4].kind, TokenKind::Colon);
        assert_eq!(tokens[5].kind, TokenKind::Name);
    }

    #[test]
    fn span_tracking_across_lines() {
        let tokens = tokenize("a\nbb c\n");
        assert_eq!(tokens[0].span, Span { line: 1, column: 1 });
        assert_eq!(tokens[2].span, Span { line: 2, column: 1 });
        assert_eq!(tokens[4].span, Span { line: 2, column: 4 });
    }

    #[test]
    fn bom_becomes_leading_token() {
        let tokens = tokenize("\u{FEFF}class");
        assert_eq!(tokens[0].kind, TokenKind::Other);
        assert_eq!(tokens[0].text, "\u{FEFF}");
        assert_eq!(tokens[0].span, Span { line: 1, column: 1 });
        assert_eq!(tokens[1].text, "class");
        assert_eq!(tokens[1].span.column, 1);
        assert_eq!(concat(&tokens), "\u{FEFF}class");
    }

    #[test]
    fn lone_carriage_return_separates_lines() {
        let tokens = tokenize("a\rb\r");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "\r");
        assert_eq!(tokens[2].span, Span { line: 2, column: 1 });
        assert_eq!(concat(&tokens), "a\rb\r");
    }

    #[test]
    fn concat_reproduces_source() {
        let input = "class { 'example2':\n  param1 =>  'value1',\n}\n";
        assert_eq!(concat(&tokenize(input)), input);
    }
}
