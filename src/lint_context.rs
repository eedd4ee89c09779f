//! Shared view of one source file for all rules: the token streams, the syntax tree, and
//! token navigation helpers.

use crate::rule::LintError;
use crate::syntax::{self, Ast, LineIndex, Node, NodeId, Spanned, Token};
use std::ops::Range;

/// Options for token searches.
///
/// `skip` skips that many matches before returning one; `include_comments` searches
/// the merged token/comment stream; `filter` restricts matches to tokens for which it
/// returns true.
#[derive(Clone, Copy, Default)]
pub struct TokenQuery<'f> {
    pub skip: usize,
    pub include_comments: bool,
    pub filter: Option<&'f dyn Fn(&Token) -> bool>,
}

impl<'f> TokenQuery<'f> {
    pub fn with_comments() -> Self {
        Self {
            include_comments: true,
            ..Self::default()
        }
    }

    pub fn skip(skip: usize) -> Self {
        Self {
            skip,
            ..Self::default()
        }
    }

    pub fn filter(filter: &'f dyn Fn(&Token) -> bool) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    fn matches(&self, token: &Token) -> bool {
        self.filter.is_none_or(|filter| filter(token))
    }
}

/// Turns a missing expected token or node into a fatal precondition error
pub trait Required<T> {
    fn required(self, what: &str) -> Result<T, LintError>;
}

impl<T> Required<T> for Option<T> {
    fn required(self, what: &str) -> Result<T, LintError> {
        self.ok_or_else(|| LintError::Precondition(format!("expected {what}")))
    }
}

pub struct LintContext<'a> {
    pub content: &'a str,
    /// Code tokens only
    pub tokens: Vec<Token>,
    /// Comments only
    pub comments: Vec<Token>,
    /// Code tokens and comments in source order
    pub tokens_and_comments: Vec<Token>,
    pub ast: Ast,
    line_index: LineIndex,
    lines: Vec<&'a str>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str) -> Result<Self, LintError> {
        let parsed = syntax::parse(content).map_err(|err| LintError::ParsingError(err.to_string()))?;
        Ok(Self {
            content,
            tokens: parsed.tokens.tokens,
            comments: parsed.tokens.comments,
            tokens_and_comments: parsed.tokens.tokens_and_comments,
            ast: parsed.ast,
            line_index: parsed.line_index,
            lines: content.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect(),
        })
    }

    fn stream(&self, include_comments: bool) -> &[Token] {
        if include_comments {
            &self.tokens_and_comments
        } else {
            &self.tokens
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.ast.get(id)
    }

    /// Nearest token ending at or before `target`'s start
    pub fn token_before(&self, target: impl Spanned, query: TokenQuery) -> Option<&Token> {
        let stream = self.stream(query.include_comments);
        let start = target.start();
        let index = stream.partition_point(|t| t.range.start < start);
        stream[..index]
            .iter()
            .rev()
            .filter(|t| t.range.end <= start && query.matches(t))
            .nth(query.skip)
    }

    /// Nearest token starting at or after `target`'s end
    pub fn token_after(&self, target: impl Spanned, query: TokenQuery) -> Option<&Token> {
        let stream = self.stream(query.include_comments);
        let end = target.end();
        let index = stream.partition_point(|t| t.range.start < end);
        stream[index..].iter().filter(|t| query.matches(t)).nth(query.skip)
    }

    /// Tokens fully inside `target`
    pub fn tokens_in(&self, target: impl Spanned, include_comments: bool) -> &[Token] {
        self.slice_between(target.start(), target.end(), include_comments)
    }

    /// Tokens strictly between the end of `left` and the start of `right`
    pub fn tokens_between(&self, left: impl Spanned, right: impl Spanned, include_comments: bool) -> &[Token] {
        self.slice_between(left.end(), right.start(), include_comments)
    }

    fn slice_between(&self, start: usize, end: usize, include_comments: bool) -> &[Token] {
        let stream = self.stream(include_comments);
        let from = stream.partition_point(|t| t.range.start < start);
        let to = stream.partition_point(|t| t.range.end <= end);
        if from >= to { &[] } else { &stream[from..to] }
    }

    pub fn first_token(&self, target: impl Spanned, query: TokenQuery) -> Option<&Token> {
        self.tokens_in(&target, query.include_comments)
            .iter()
            .filter(|t| query.matches(t))
            .nth(query.skip)
    }

    pub fn last_token(&self, target: impl Spanned, query: TokenQuery) -> Option<&Token> {
        self.tokens_in(&target, query.include_comments)
            .iter()
            .rev()
            .filter(|t| query.matches(t))
            .nth(query.skip)
    }

    pub fn first_token_between(&self, left: impl Spanned, right: impl Spanned, query: TokenQuery) -> Option<&Token> {
        self.tokens_between(left, right, query.include_comments)
            .iter()
            .filter(|t| query.matches(t))
            .nth(query.skip)
    }

    /// Comments directly before `target` with no code token in between
    pub fn comments_before(&self, target: impl Spanned) -> Vec<&Token> {
        let start = target.start();
        let index = self.tokens_and_comments.partition_point(|t| t.range.start < start);
        let mut comments: Vec<&Token> = self.tokens_and_comments[..index]
            .iter()
            .rev()
            .take_while(|t| t.is_comment())
            .collect();
        comments.reverse();
        comments
    }

    /// Comments directly after `target` with no code token in between
    pub fn comments_after(&self, target: impl Spanned) -> Vec<&Token> {
        let end = target.end();
        let index = self.tokens_and_comments.partition_point(|t| t.range.start < end);
        self.tokens_and_comments[index..]
            .iter()
            .take_while(|t| t.is_comment())
            .collect()
    }

    pub fn comments_exist_between(&self, left: impl Spanned, right: impl Spanned) -> bool {
        self.tokens_between(left, right, true).iter().any(Token::is_comment)
    }

    /// Whether horizontal whitespace separates `left` from `right`. Only the gaps between
    /// adjacent tokens and comments count, not the text inside comments.
    pub fn is_space_between(&self, left: impl Spanned, right: impl Spanned) -> bool {
        let (start, end) = (left.end(), right.start());
        if start >= end {
            return false;
        }
        let mut gap_start = start;
        for token in self.tokens_between(start..start, end..end, true) {
            if self.has_horizontal_space(gap_start..token.range.start) {
                return true;
            }
            gap_start = token.range.end;
        }
        self.has_horizontal_space(gap_start..end)
    }

    fn has_horizontal_space(&self, range: Range<usize>) -> bool {
        self.content
            .get(range)
            .is_some_and(|gap| gap.chars().any(|c| c.is_whitespace() && c != '\n' && c != '\r'))
    }

    pub fn text(&self, target: impl Spanned) -> &str {
        self.content.get(target.range()).unwrap_or("")
    }

    pub fn text_between(&self, left: impl Spanned, right: impl Spanned) -> &str {
        self.content.get(left.end()..right.start()).unwrap_or("")
    }

    /// Source lines without line terminators
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Byte offset where a 1-based line starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_index.line_start(line)
    }

    /// Convert a byte offset to a 1-based (line, column)
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let position = self.line_index.position(self.content, offset);
        (position.line, position.column + 1)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Leading whitespace of the line `token` starts on
    pub fn token_indent(&self, token: &Token) -> &'a str {
        let line = self.lines.get(token.loc.start.line - 1).copied().unwrap_or("");
        let trimmed = line.trim_start_matches([' ', '\t']);
        &line[..line.len() - trimmed.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ast_utils::is_comma_token;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_token_before_and_after() {
        let ctx = LintContext::new("foo(a, /* c */ b);").unwrap();
        let b = ctx.tokens.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(ctx.token_before(b, TokenQuery::default()).unwrap().value, ",");
        assert_eq!(ctx.token_before(b, TokenQuery::with_comments()).unwrap().value, "/* c */");
        assert_eq!(ctx.token_before(b, TokenQuery::skip(1)).unwrap().value, "a");
        assert_eq!(ctx.token_after(b, TokenQuery::default()).unwrap().value, ")");

        let not_comma = |t: &Token| !is_comma_token(t);
        assert_eq!(ctx.token_before(b, TokenQuery::filter(&not_comma)).unwrap().value, "a");
    }

    #[test]
    fn test_searches_past_the_stream_return_none() {
        let ctx = LintContext::new("a;").unwrap();
        let first = &ctx.tokens[0];
        assert!(ctx.token_before(first, TokenQuery::default()).is_none());
        assert!(ctx.token_after(first, TokenQuery::skip(5)).is_none());
        let never = |_: &Token| false;
        assert!(ctx.token_after(first, TokenQuery::filter(&never)).is_none());
    }

    #[test]
    fn test_first_and_last_token_of_node() {
        let ctx = LintContext::new("x = { a: 1 };").unwrap();
        let object = ctx
            .ast
            .preorder()
            .into_iter()
            .find(|id| ctx.ast[*id].type_name() == "ObjectExpression")
            .unwrap();
        let node = ctx.node(object);
        assert_eq!(ctx.first_token(node, TokenQuery::default()).unwrap().value, "{");
        assert_eq!(ctx.last_token(node, TokenQuery::default()).unwrap().value, "}");
        assert_eq!(ctx.last_token(node, TokenQuery::skip(1)).unwrap().value, "1");
        assert_eq!(values(ctx.tokens_in(node, false)), vec!["{", "a", ":", "1", "}"]);
    }

    #[test]
    fn test_tokens_between_and_comments() {
        let ctx = LintContext::new("a // one\n/* two */ + b;").unwrap();
        let a = &ctx.tokens[0];
        let plus = &ctx.tokens[1];
        assert!(ctx.tokens_between(a, plus, false).is_empty());
        assert_eq!(values(ctx.tokens_between(a, plus, true)), vec!["// one", "/* two */"]);
        assert!(ctx.comments_exist_between(a, plus));
        assert_eq!(ctx.comments_before(plus).len(), 2);
        assert_eq!(ctx.comments_after(a).len(), 2);
        assert!(ctx.comments_after(plus).is_empty());
    }

    #[test]
    fn test_is_space_between() {
        let ctx = LintContext::new("f( a,b );").unwrap();
        let tokens = &ctx.tokens;
        assert!(ctx.is_space_between(&tokens[1], &tokens[2]));
        assert!(!ctx.is_space_between(&tokens[2], &tokens[3]));
        assert!(!ctx.is_space_between(&tokens[3], &tokens[4]));
        assert!(ctx.is_space_between(&tokens[4], &tokens[5]));

        // newlines alone are not horizontal space; comment text is ignored
        let ctx = LintContext::new("a\n+b/*x y*/;").unwrap();
        assert!(!ctx.is_space_between(&ctx.tokens[0], &ctx.tokens[1]));
        assert!(!ctx.is_space_between(&ctx.tokens[2], &ctx.tokens[3]));
    }

    #[test]
    fn test_required_reports_precondition() {
        let ctx = LintContext::new("a;").unwrap();
        let err = ctx
            .token_before(&ctx.tokens[0], TokenQuery::default())
            .required("a token before the first token")
            .unwrap_err();
        assert!(matches!(err, LintError::Precondition(_)));
    }

    #[test]
    fn test_line_helpers() {
        let ctx = LintContext::new("a;\n    b;\r\nc;").unwrap();
        assert_eq!(ctx.lines(), &["a;", "    b;", "c;"]);
        assert_eq!(ctx.line_start(2), Some(3));
        assert_eq!(ctx.offset_to_line_col(7), (2, 5));
        let b = ctx.tokens.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(ctx.token_indent(b), "    ");
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = LintContext::new("a b").err().unwrap();
        assert!(matches!(err, LintError::ParsingError(_)));
    }
}
