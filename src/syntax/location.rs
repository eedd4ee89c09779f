//! Source positions and byte-offset/line-column conversion.

use serde::Serialize;
use std::ops::Range;

/// A line/column position. Lines are 1-based, columns are 0-based and counted in
/// characters, matching ESTree `loc` conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the location starts and ends on the same line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// Anything with a half-open byte range in the source: tokens, nodes, raw ranges.
pub trait Spanned {
    fn range(&self) -> Range<usize>;

    fn start(&self) -> usize {
        self.range().start
    }

    fn end(&self) -> usize {
        self.range().end
    }
}

impl Spanned for Range<usize> {
    fn range(&self) -> Range<usize> {
        self.clone()
    }
}

impl<T: Spanned + ?Sized> Spanned for &T {
    fn range(&self) -> Range<usize> {
        (**self).range()
    }
}

/// Pre-computed line starts for a document
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line - 1).copied()
    }

    /// Map a byte offset to a position (1-based line, 0-based character column)
    pub fn position(&self, content: &str, offset: usize) -> Position {
        let offset = offset.min(content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = content
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position::new(line_idx + 1, column)
    }

    pub fn location(&self, content: &str, range: &Range<usize>) -> SourceLocation {
        SourceLocation::new(self.position(content, range.start), self.position(content, range.end))
    }
}
