//! Token relationship utilities: classification predicates and line relationships
//! shared by every rule.

use crate::syntax::{Node, SourceLocation, Token, TokenKind};
use regex::Regex;
use std::sync::LazyLock;

/// Matches any line terminator sequence
pub static LINEBREAK_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|[\r\n\u{2028}\u{2029}]").expect("valid line break regex"));

/// Anything with a line/column location
pub trait Located {
    fn loc(&self) -> SourceLocation;
}

impl Located for Token {
    fn loc(&self) -> SourceLocation {
        self.loc
    }
}

impl Located for Node {
    fn loc(&self) -> SourceLocation {
        self.loc
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn loc(&self) -> SourceLocation {
        (**self).loc()
    }
}

/// Whether `left` ends on the line `right` starts on
pub fn is_token_on_same_line(left: impl Located, right: impl Located) -> bool {
    left.loc().end.line == right.loc().start.line
}

/// Number of line breaks between the end of `left` and the start of `right`
pub fn line_breaks_between(left: impl Located, right: impl Located) -> usize {
    right.loc().start.line.saturating_sub(left.loc().end.line)
}

pub fn is_comment_token(token: &Token) -> bool {
    token.kind.is_comment()
}

pub fn is_line_comment(token: &Token) -> bool {
    token.kind == TokenKind::LineComment
}

pub fn is_punctuator_token(token: &Token, value: &str) -> bool {
    token.is_punctuator(value)
}

pub fn is_opening_brace_token(token: &Token) -> bool {
    token.is_punctuator("{")
}

pub fn is_closing_brace_token(token: &Token) -> bool {
    token.is_punctuator("}")
}

pub fn is_opening_paren_token(token: &Token) -> bool {
    token.is_punctuator("(")
}

pub fn is_closing_paren_token(token: &Token) -> bool {
    token.is_punctuator(")")
}

pub fn is_not_closing_paren_token(token: &Token) -> bool {
    !is_closing_paren_token(token)
}

pub fn is_opening_bracket_token(token: &Token) -> bool {
    token.is_punctuator("[")
}

pub fn is_closing_bracket_token(token: &Token) -> bool {
    token.is_punctuator("]")
}

pub fn is_comma_token(token: &Token) -> bool {
    token.is_punctuator(",")
}

pub fn is_not_comma_token(token: &Token) -> bool {
    !is_comma_token(token)
}

pub fn is_semicolon_token(token: &Token) -> bool {
    token.is_punctuator(";")
}

pub fn is_colon_token(token: &Token) -> bool {
    token.is_punctuator(":")
}

pub fn is_not_opening_paren_token(token: &Token) -> bool {
    !is_opening_paren_token(token)
}

/// A keyword token, optionally with a specific value
pub fn is_keyword_token(token: &Token, value: Option<&str>) -> bool {
    token.kind == TokenKind::Keyword && value.is_none_or(|v| token.value == v)
}

/// Whether `text` contains a line terminator
pub fn has_linebreak(text: &str) -> bool {
    LINEBREAK_MATCHER.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint_context::LintContext;

    #[test]
    fn test_classification() {
        let ctx = LintContext::new("if (a) { b, c; } // done").unwrap();
        let find = |v: &str| ctx.tokens_and_comments.iter().find(|t| t.value == v).unwrap();
        assert!(is_keyword_token(find("if"), None));
        assert!(is_keyword_token(find("if"), Some("if")));
        assert!(!is_keyword_token(find("if"), Some("else")));
        assert!(is_opening_paren_token(find("(")));
        assert!(is_closing_paren_token(find(")")));
        assert!(is_opening_brace_token(find("{")));
        assert!(is_closing_brace_token(find("}")));
        assert!(is_comma_token(find(",")));
        assert!(is_semicolon_token(find(";")));
        assert!(is_comment_token(find("// done")));
        assert!(is_line_comment(find("// done")));
        assert!(!is_comment_token(find("b")));
    }

    #[test]
    fn test_same_line_uses_end_of_left() {
        let ctx = LintContext::new("x = `a\nb` + c;\nd;").unwrap();
        let template = &ctx.tokens[2];
        let plus = &ctx.tokens[3];
        let d = ctx.tokens.iter().find(|t| t.value == "d").unwrap();
        assert!(is_token_on_same_line(template, plus));
        assert!(!is_token_on_same_line(plus, d));
        assert_eq!(line_breaks_between(plus, d), 1);
    }

    #[test]
    fn test_has_linebreak() {
        assert!(has_linebreak("a\nb"));
        assert!(has_linebreak("a\r\nb"));
        assert!(has_linebreak("a\u{2028}b"));
        assert!(!has_linebreak("a b"));
    }
}
