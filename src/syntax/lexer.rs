//! Tokenizer
//!
//! A logos-derived scanner produces raw lexemes which are then classified into
//! ESTree-style [`Token`]s with line/column locations. Comments are collected in a
//! separate stream as well as in the merged `tokens_and_comments` stream.
//!
//! Known limitations: `/` is always lexed as a division operator (there are no
//! regular-expression literals) and template literals are single tokens.

use crate::syntax::location::LineIndex;
use crate::syntax::token::{Token, TokenKind};
use logos::Logos;
use phf::phf_set;
use thiserror::Error;

/// Reserved words that are lexed as `Keyword` tokens
static KEYWORDS: phf::Set<&'static str> = phf_set! {
    "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "finally",
    "for", "function", "if", "import", "in", "instanceof", "let", "new",
    "return", "super", "switch", "this", "throw", "try", "typeof", "var",
    "void", "while", "with", "yield",
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unexpected character '{ch}' at line {line}, column {column}")]
pub struct LexError {
    pub ch: char,
    pub line: usize,
    pub column: usize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f\u{0B}\u{A0}\u{FEFF}]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,

    #[regex(r"#[A-Za-z_$][A-Za-z0-9_$]*")]
    PrivateName,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    String,

    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    Template,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    Number,

    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    #[token("~")]
    #[token("?")]
    #[token("?.")]
    #[token("??")]
    #[token("??=")]
    #[token(":")]
    #[token(".")]
    #[token("...")]
    #[token("<")]
    #[token("<=")]
    #[token("<<")]
    #[token("<<=")]
    #[token(">")]
    #[token(">=")]
    #[token(">>")]
    #[token(">>=")]
    #[token(">>>")]
    #[token(">>>=")]
    #[token("=")]
    #[token("==")]
    #[token("===")]
    #[token("=>")]
    #[token("!")]
    #[token("!=")]
    #[token("!==")]
    #[token("+")]
    #[token("++")]
    #[token("+=")]
    #[token("-")]
    #[token("--")]
    #[token("-=")]
    #[token("*")]
    #[token("**")]
    #[token("*=")]
    #[token("**=")]
    #[token("/")]
    #[token("/=")]
    #[token("%")]
    #[token("%=")]
    #[token("&")]
    #[token("&&")]
    #[token("&=")]
    #[token("&&=")]
    #[token("|")]
    #[token("||")]
    #[token("|=")]
    #[token("||=")]
    #[token("^")]
    #[token("^=")]
    #[token("@")]
    #[token("#")]
    Punct,
}

/// Consume a block comment body up to and including the closing `*/`.
/// An unterminated comment is a lex error at its `/*`.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// The token streams of one source file
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    /// Code tokens only
    pub tokens: Vec<Token>,
    /// Comment tokens only
    pub comments: Vec<Token>,
    /// Code tokens and comments merged in source order
    pub tokens_and_comments: Vec<Token>,
}

fn classify_word(word: &str) -> TokenKind {
    match word {
        "true" | "false" => TokenKind::Boolean,
        "null" => TokenKind::Null,
        _ if KEYWORDS.contains(word) => TokenKind::Keyword,
        _ => TokenKind::Identifier,
    }
}

pub fn tokenize(source: &str, index: &LineIndex) -> Result<TokenStream, LexError> {
    let mut stream = TokenStream::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let value = lexer.slice();
        let kind = match raw {
            Ok(RawToken::LineComment) => TokenKind::LineComment,
            Ok(RawToken::BlockComment) => TokenKind::BlockComment,
            Ok(RawToken::Word) => classify_word(value),
            Ok(RawToken::PrivateName) => TokenKind::Identifier,
            Ok(RawToken::String) => TokenKind::String,
            Ok(RawToken::Template) => TokenKind::Template,
            Ok(RawToken::Number) => TokenKind::Numeric,
            Ok(RawToken::Punct) => TokenKind::Punctuator,
            Err(()) => {
                let position = index.position(source, span.start);
                return Err(LexError {
                    ch: value.chars().next().unwrap_or('\0'),
                    line: position.line,
                    column: position.column,
                });
            }
        };

        let token = Token {
            kind,
            value: value.to_string(),
            loc: index.location(source, &span),
            range: span,
        };
        if kind.is_comment() {
            stream.comments.push(token.clone());
        } else {
            stream.tokens.push(token.clone());
        }
        stream.tokens_and_comments.push(token);
    }

    Ok(stream)
}
