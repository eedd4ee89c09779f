//! JavaScript/TypeScript front-end: tokens, locations, and the syntax tree the rules inspect.

pub mod ast;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod token;

pub use ast::{Ast, Node, NodeId, NodeKind, VisitEvent};
pub use lexer::{LexError, TokenStream};
pub use location::{LineIndex, Position, SourceLocation, Spanned};
pub use parser::ParseError;
pub use token::{Token, TokenKind};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// 1-based line and column of the error
    pub fn position(&self) -> (usize, usize) {
        match self {
            SyntaxError::Lex(err) => (err.line, err.column + 1),
            SyntaxError::Parse(err) => (err.line, err.column),
        }
    }
}

/// A tokenised and parsed source file
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tokens: TokenStream,
    pub ast: Ast,
    pub line_index: LineIndex,
}

/// Tokenise and parse `source`.
pub fn parse(source: &str) -> Result<ParsedSource, SyntaxError> {
    let line_index = LineIndex::new(source);
    let stream = lexer::tokenize(source, &line_index)?;
    let (ast, code_tokens) = parser::Parser::new(source, &line_index, stream.tokens).parse_program()?;

    // rebuild the merged stream, since the parser may have split compound `>` tokens
    let mut tokens_and_comments = Vec::with_capacity(code_tokens.len() + stream.comments.len());
    let mut comments = stream.comments.iter().peekable();
    for token in &code_tokens {
        while let Some(comment) = comments.next_if(|c| c.range.start < token.range.start) {
            tokens_and_comments.push(comment.clone());
        }
        tokens_and_comments.push(token.clone());
    }
    tokens_and_comments.extend(comments.cloned());

    Ok(ParsedSource {
        tokens: TokenStream {
            tokens: code_tokens,
            comments: stream.comments,
            tokens_and_comments,
        },
        ast,
        line_index,
    })
}
