use crate::syntax::location::{SourceLocation, Spanned};
use serde::Serialize;
use std::ops::Range;

/// Lexical category of a token, following the ESTree token `type` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Punctuator,
    Keyword,
    Identifier,
    String,
    Numeric,
    Boolean,
    Null,
    Template,
    LineComment,
    BlockComment,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Punctuator => "Punctuator",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::String => "String",
            TokenKind::Numeric => "Numeric",
            TokenKind::Boolean => "Boolean",
            TokenKind::Null => "Null",
            TokenKind::Template => "Template",
            TokenKind::LineComment => "Line",
            TokenKind::BlockComment => "Block",
        }
    }
}

/// A lexical unit. Immutable once produced by the lexer; tokens never overlap, so
/// the range start is a unique identity within one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal source text (for comments, the full text including delimiters)
    pub value: String,
    pub range: Range<usize>,
    pub loc: SourceLocation,
}

impl Token {
    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    pub fn is_punctuator(&self, value: &str) -> bool {
        self.is(TokenKind::Punctuator, value)
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Same token by identity (tokens never share a start offset).
    pub fn same(&self, other: &Token) -> bool {
        self.range == other.range
    }
}

impl Spanned for Token {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}
