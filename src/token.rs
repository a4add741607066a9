/// Source location of a token's first character, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of spaces and/or tabs. May be zero-width directly after an
    /// arrow, marking the position where a separating space belongs.
    Whitespace,
    /// Parameter arrow `=>`.
    Arrow,
    /// Line break (`\n` or `\r\n`).
    Newline,
    /// Comment (`# ...`).
    Comment,
    /// Quoted string literal, single or double quoted. Opaque payload:
    /// the text keeps the quotes and is never re-tokenized.
    String,
    /// Heredoc opening marker (`@("TAG"/flags)`).
    HeredocOpen,
    /// Heredoc payload between the opening line and the terminator line.
    /// Opaque, never re-tokenized.
    HeredocBody,
    /// Heredoc terminator line (`| TAG`), without its line break.
    HeredocEnd,
    /// Opening brace `{`.
    LeftBrace,
    /// Closing brace `}`.
    RightBrace,
    /// Comma `,`.
    Comma,
    /// Colon `:`.
    Colon,
    /// Bare word: identifier, number, or `::`-qualified name.
    Name,
    /// Variable reference (`$name`).
    Variable,
    /// Any other single character of punctuation (`=`, `[`, `(`, ...).
    Other,
}

/// A single token with its kind, raw source text, and location.
///
/// `text` is the exact source substring: concatenating every token's
/// text in stream order reproduces the input byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, line: usize, column: usize) -> Self {
        Self {
            kind,
            text,
            span: Span { line, column },
        }
    }

    /// Whether this token is an opaque payload (string literal or
    /// heredoc body) whose content checks must never inspect.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self.kind, TokenKind::String | TokenKind::HeredocBody)
    }
}
