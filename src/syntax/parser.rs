//! Recursive-descent parser for the JavaScript/TypeScript subset the rules inspect
//!
//! The parser consumes code tokens (comments are already separated by the lexer) and
//! builds an arena [`Ast`]. Node ranges follow ESTree: parenthesized expressions do not
//! widen their inner node, statements include their terminating semicolon, and
//! TypeScript member signatures include their delimiter.

mod expressions;
mod statements;
mod types;

use crate::syntax::ast::{Ast, Node, NodeId, NodeKind};
use crate::syntax::location::LineIndex;
use crate::syntax::token::{Token, TokenKind};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Parser state saved before a speculative parse
struct Checkpoint {
    pos: usize,
    nodes: usize,
    last_end: usize,
    splits: usize,
}

pub struct Parser<'a> {
    source: &'a str,
    index: &'a LineIndex,
    tokens: Vec<Token>,
    pos: usize,
    nodes: Vec<Node>,
    /// End offset of the most recently consumed token
    last_end: usize,
    /// Compound `>` tokens split while closing type argument lists: (position, original token)
    splits: Vec<(usize, Token)>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, index: &'a LineIndex, tokens: Vec<Token>) -> Self {
        Self {
            source,
            index,
            tokens,
            pos: 0,
            nodes: Vec::new(),
            last_end: 0,
            splits: Vec::new(),
        }
    }

    /// Parse a whole program. Returns the tree and the final code tokens (with any
    /// compound `>` tokens that close type arguments split).
    pub fn parse_program(mut self) -> PResult<(Ast, Vec<Token>)> {
        let mut body = Vec::new();
        while !self.is_eof() {
            body.push(self.parse_statement()?);
        }
        let root = self.push_node(NodeKind::Program { body }, 0..self.source.len());
        Ok((Ast::new(self.nodes, root), self.tokens))
    }

    // ---- token cursor ----

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn token_is(token: &Token, value: &str) -> bool {
        !matches!(token.kind, TokenKind::String | TokenKind::Template) && token.value == value
    }

    /// Current token is a punctuator, keyword, or identifier with this text
    fn at(&self, value: &str) -> bool {
        self.peek().is_some_and(|t| Self::token_is(t, value))
    }

    fn nth_is(&self, n: usize, value: &str) -> bool {
        self.peek_nth(n).is_some_and(|t| Self::token_is(t, value))
    }

    fn at_any(&self, values: &[&str]) -> bool {
        values.iter().any(|v| self.at(v))
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.peek_nth(n).map(|t| t.kind)
    }

    fn bump(&mut self) -> PResult<Token> {
        let token = self.peek().cloned().ok_or_else(|| self.error("Unexpected end of input"))?;
        self.pos += 1;
        self.last_end = token.range.end;
        Ok(token)
    }

    fn eat(&mut self, value: &str) -> bool {
        if self.at(value) {
            self.pos += 1;
            self.last_end = self.tokens[self.pos - 1].range.end;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, value: &str) -> PResult<Token> {
        if self.at(value) {
            self.bump()
        } else {
            Err(self.unexpected(Some(value)))
        }
    }

    /// Start offset of the current token
    fn start(&self) -> usize {
        self.peek().map_or(self.source.len(), |t| t.range.start)
    }

    /// Whether a line break separates the previous token from the current one
    fn has_newline_before(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|p| self.tokens.get(p)), self.peek()) {
            (Some(prev), Some(cur)) => prev.loc.end.line < cur.loc.start.line,
            _ => false,
        }
    }

    /// Index of the bracket closing the one at `open`
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, token) in self.tokens[open..].iter().enumerate() {
            if token.kind != TokenKind::Punctuator {
                continue;
            }
            match token.value.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(open + offset);
                    }
                }
                _ => {}
            }
        }
        None
    }

    // ---- errors ----

    fn error(&self, message: impl Into<String>) -> ParseError {
        let offset = self.peek().map_or(self.source.len(), |t| t.range.start);
        let position = self.index.position(self.source, offset);
        ParseError {
            message: message.into(),
            line: position.line,
            column: position.column + 1,
        }
    }

    fn unexpected(&self, expected: Option<&str>) -> ParseError {
        match (self.peek(), expected) {
            (Some(token), Some(expected)) => {
                self.error(format!("Expected '{expected}' but found '{}'", token.value))
            }
            (Some(token), None) => self.error(format!("Unexpected token '{}'", token.value)),
            (None, Some(expected)) => self.error(format!("Expected '{expected}' but reached end of input")),
            (None, None) => self.error("Unexpected end of input"),
        }
    }

    // ---- node construction ----

    fn push_node(&mut self, kind: NodeKind, range: Range<usize>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let loc = self.index.location(self.source, &range);
        self.nodes.push(Node {
            kind,
            range,
            loc,
            parent: None,
        });
        id
    }

    /// Create a node spanning from `start` to the end of the last consumed token
    fn finish(&mut self, kind: NodeKind, start: usize) -> NodeId {
        self.push_node(kind, start..self.last_end)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Extend a node's range to the end of the last consumed token
    fn extend_to_last(&mut self, id: NodeId) {
        let range = self.node(id).range.start..self.last_end;
        let loc = self.index.location(self.source, &range);
        let node = self.node_mut(id);
        node.range = range;
        node.loc = loc;
    }

    fn identifier_node(&mut self, token: &Token) -> NodeId {
        self.push_node(
            NodeKind::Identifier {
                name: token.value.clone(),
                optional: false,
                type_annotation: None,
            },
            token.range.clone(),
        )
    }

    fn parse_identifier(&mut self) -> PResult<NodeId> {
        if !self.at_kind(TokenKind::Identifier) {
            return Err(self.unexpected(None));
        }
        let token = self.bump()?;
        Ok(self.identifier_node(&token))
    }

    /// Identifier in a position where reserved words are allowed (property names)
    fn parse_identifier_name(&mut self) -> PResult<NodeId> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Identifier | TokenKind::Keyword | TokenKind::Boolean | TokenKind::Null) => {
                let token = self.bump()?;
                Ok(self.identifier_node(&token))
            }
            _ => Err(self.unexpected(None)),
        }
    }

    /// Property key: identifier name, string, number, or computed `[expr]`.
    /// Returns the key and whether it is computed.
    fn parse_property_key(&mut self) -> PResult<(NodeId, bool)> {
        let token = self.peek().cloned().ok_or_else(|| self.unexpected(None))?;
        match token.kind {
            TokenKind::Punctuator if token.value == "[" => {
                self.bump()?;
                let key = self.parse_assignment(false)?;
                self.expect("]")?;
                Ok((key, true))
            }
            TokenKind::String | TokenKind::Numeric => {
                self.bump()?;
                Ok((self.push_node(NodeKind::Literal { raw: token.value }, token.range), false))
            }
            _ => Ok((self.parse_identifier_name()?, false)),
        }
    }

    /// Automatic semicolon insertion, restricted form
    fn consume_semicolon(&mut self) -> PResult<()> {
        if self.eat(";") || self.is_eof() || self.at("}") || self.has_newline_before() {
            return Ok(());
        }
        Err(self.unexpected(Some(";")))
    }

    /// Consume a `>` closing a type list, splitting `>>`, `>=`, ... when needed
    fn expect_closing_angle(&mut self) -> PResult<()> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected(Some(">")));
        };
        if token.kind != TokenKind::Punctuator || !token.value.starts_with('>') {
            return Err(self.unexpected(Some(">")));
        }
        if token.value.len() > 1 {
            let split_at = token.range.start + 1;
            let head_range = token.range.start..split_at;
            let tail_range = split_at..token.range.end;
            let head = Token {
                kind: TokenKind::Punctuator,
                value: ">".to_string(),
                loc: self.index.location(self.source, &head_range),
                range: head_range,
            };
            let tail = Token {
                kind: TokenKind::Punctuator,
                value: token.value[1..].to_string(),
                loc: self.index.location(self.source, &tail_range),
                range: tail_range,
            };
            self.splits.push((self.pos, token));
            self.tokens[self.pos] = head;
            self.tokens.insert(self.pos + 1, tail);
        }
        self.bump()?;
        Ok(())
    }

    // ---- speculation ----

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            nodes: self.nodes.len(),
            last_end: self.last_end,
            splits: self.splits.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        while self.splits.len() > checkpoint.splits {
            if let Some((index, original)) = self.splits.pop() {
                self.tokens.remove(index + 1);
                self.tokens[index] = original;
            }
        }
        self.pos = checkpoint.pos;
        self.nodes.truncate(checkpoint.nodes);
        self.last_end = checkpoint.last_end;
    }

    /// Run a speculative parse, rewinding all state if it fails
    fn try_parse<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match parse(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(checkpoint);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::ast::{NodeKind, VariableKind};
    use crate::syntax::parse;

    fn type_names(source: &str) -> Vec<&'static str> {
        let parsed = parse(source).unwrap();
        parsed
            .ast
            .preorder()
            .into_iter()
            .map(|id| parsed.ast[id].type_name())
            .collect()
    }

    #[test]
    fn test_variable_declaration() {
        let parsed = parse("var foo = 1, bar = 2;").unwrap();
        let root = parsed.ast.root();
        let NodeKind::Program { body } = &parsed.ast[root].kind else {
            panic!("expected program");
        };
        let decl = &parsed.ast[body[0]];
        assert_eq!(decl.range, 0..21);
        match &decl.kind {
            NodeKind::VariableDeclaration { kind, declarations } => {
                assert_eq!(*kind, VariableKind::Var);
                assert_eq!(declarations.len(), 2);
                assert_eq!(parsed.ast[declarations[1]].range, 13..20);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_if_else_shapes() {
        assert_eq!(
            type_names("if (a) { b(); } else c;"),
            vec![
                "Program",
                "IfStatement",
                "Identifier",
                "BlockStatement",
                "ExpressionStatement",
                "CallExpression",
                "Identifier",
                "ExpressionStatement",
                "Identifier",
            ]
        );
    }

    #[test]
    fn test_parenthesized_expression_range_excludes_parens() {
        let parsed = parse("x = (a + b);").unwrap();
        let binary = parsed
            .ast
            .preorder()
            .into_iter()
            .find(|id| parsed.ast[*id].type_name() == "BinaryExpression")
            .unwrap();
        assert_eq!(parsed.ast[binary].range, 5..10);
    }

    #[test]
    fn test_arrow_functions() {
        let names = type_names("const f = (a, b = 1) => a; const g = x => { return x; };");
        assert_eq!(names.iter().filter(|n| **n == "ArrowFunctionExpression").count(), 2);
        assert!(names.contains(&"AssignmentPattern"));
        assert!(names.contains(&"ReturnStatement"));
    }

    #[test]
    fn test_conditional_is_not_mistaken_for_arrow() {
        let names = type_names("x = a ? (b) : c;");
        assert!(names.contains(&"ConditionalExpression"));
        assert!(!names.contains(&"ArrowFunctionExpression"));
    }

    #[test]
    fn test_interface_members_include_delimiters() {
        let parsed = parse("interface Foo {\n  name: string;\n  age: number\n}").unwrap();
        let members: Vec<_> = parsed
            .ast
            .preorder()
            .into_iter()
            .filter(|id| parsed.ast[*id].type_name() == "TSPropertySignature")
            .collect();
        assert_eq!(members.len(), 2);
        let first = &parsed.ast[members[0]];
        assert_eq!(&"interface Foo {\n  name: string;\n  age: number\n}"[first.range.clone()], "name: string;");
        let second = &parsed.ast[members[1]];
        assert_eq!(&"interface Foo {\n  name: string;\n  age: number\n}"[second.range.clone()], "age: number");
    }

    #[test]
    fn test_nested_type_arguments_split_shift_token() {
        let parsed = parse("let x: Array<Array<string>> = [];").unwrap();
        let values: Vec<&str> = parsed.tokens.tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["let", "x", ":", "Array", "<", "Array", "<", "string", ">", ">", "=", "[", "]", ";"]
        );
    }

    #[test]
    fn test_comparison_is_not_type_arguments() {
        let names = type_names("if (a < b && c >> d) {}");
        assert!(names.contains(&"LogicalExpression"));
        assert!(!names.contains(&"TSTypeParameterInstantiation"));
    }

    #[test]
    fn test_class_members() {
        let names = type_names("class A extends B {\n  x = 1;\n  static y: number;\n  constructor() {}\n  get z() { return 1; }\n}");
        assert_eq!(names.iter().filter(|n| **n == "PropertyDefinition").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "MethodDefinition").count(), 2);
    }

    #[test]
    fn test_modules() {
        let names = type_names("import a, { b as c, d } from 'x';\nexport { c };\nexport default a;\nexport * from 'y';");
        assert!(names.contains(&"ImportDefaultSpecifier"));
        assert_eq!(names.iter().filter(|n| **n == "ImportSpecifier").count(), 2);
        assert!(names.contains(&"ExportNamedDeclaration"));
        assert!(names.contains(&"ExportDefaultDeclaration"));
        assert!(names.contains(&"ExportAllDeclaration"));
    }

    #[test]
    fn test_array_holes() {
        let parsed = parse("[a,, b];").unwrap();
        let array = parsed
            .ast
            .preorder()
            .into_iter()
            .find(|id| parsed.ast[*id].type_name() == "ArrayExpression")
            .unwrap();
        let NodeKind::ArrayExpression { elements } = &parsed.ast[array].kind else {
            panic!("expected array");
        };
        assert_eq!(elements.len(), 3);
        assert!(elements[1].is_none());
    }

    #[test]
    fn test_missing_semicolon_on_same_line_is_an_error() {
        let err = parse("a b").unwrap_err();
        assert!(err.to_string().contains("Expected ';'"));
    }

    #[test]
    fn test_parents_are_linked() {
        let parsed = parse("function f(a) { return a; }").unwrap();
        for id in parsed.ast.preorder() {
            if id == parsed.ast.root() {
                assert!(parsed.ast[id].parent.is_none());
            } else {
                let parent = parsed.ast[id].parent.unwrap();
                assert!(parsed.ast.children(parent).contains(&id));
            }
        }
    }
}
