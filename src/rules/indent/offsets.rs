//! Offset bookkeeping for the indent rule.
//!
//! Every token's desired indentation is stored as an offset, in indentation levels,
//! from some other token. The descriptors live in an interval map keyed by source
//! offset: setting the offset of a range replaces the descriptors inside it and
//! restores whatever applied before once the range ends. Desired indentation is only
//! resolved after all relationships are recorded, so a token's expected column always
//! follows its anchor's expected column, never its anchor's actual one.

use crate::lint_context::LintContext;
use crate::syntax::{Spanned, Token};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Position-independent facts about the tokens of one file
pub struct TokenInfo<'a> {
    ctx: &'a LintContext<'a>,
    first_tokens_by_line: HashMap<usize, &'a Token>,
}

impl<'a> TokenInfo<'a> {
    pub fn new(ctx: &'a LintContext<'a>) -> Self {
        let mut first_tokens_by_line = HashMap::new();
        for token in &ctx.tokens_and_comments {
            first_tokens_by_line.entry(token.loc.start.line).or_insert(token);
            // a multi-line token is also the first token of the line it ends on,
            // unless it is preceded there only by whitespace
            let end_line = token.loc.end.line;
            if !first_tokens_by_line.contains_key(&end_line) {
                let line_start = ctx.line_start(end_line).unwrap_or(token.range.end);
                let before_end = ctx.content.get(line_start..token.range.end).unwrap_or("");
                if !before_end.trim().is_empty() {
                    first_tokens_by_line.insert(end_line, token);
                }
            }
        }
        Self {
            ctx,
            first_tokens_by_line,
        }
    }

    pub fn first_token_of_line(&self, token: &'a Token) -> &'a Token {
        self.first_tokens_by_line
            .get(&token.loc.start.line)
            .copied()
            .unwrap_or(token)
    }

    pub fn first_token_on(&self, line: usize) -> Option<&'a Token> {
        self.first_tokens_by_line.get(&line).copied()
    }

    pub fn is_first_token_of_line(&self, token: &Token) -> bool {
        self.first_tokens_by_line
            .get(&token.loc.start.line)
            .is_some_and(|first| first.same(token))
    }

    /// Whitespace before the token on its line
    pub fn token_indent(&self, token: &Token) -> &'a str {
        self.ctx.token_indent(token)
    }
}

/// Where a token's indentation comes from
#[derive(Debug, Clone, Copy)]
struct OffsetDescriptor<'a> {
    offset: usize,
    from: Option<&'a Token>,
    force: bool,
}

/// The token→anchor relationships of one file and their resolution
pub struct OffsetStorage<'a> {
    info: TokenInfo<'a>,
    indent_char: char,
    indent_size: usize,
    index: BTreeMap<usize, OffsetDescriptor<'a>>,
    locked_first_tokens: HashMap<usize, &'a Token>,
    ignored_tokens: HashSet<usize>,
    desired_indent_cache: HashMap<usize, String>,
}

impl<'a> OffsetStorage<'a> {
    pub fn new(info: TokenInfo<'a>, indent_char: char, indent_size: usize) -> Self {
        let mut index = BTreeMap::new();
        index.insert(
            0,
            OffsetDescriptor {
                offset: 0,
                from: None,
                force: false,
            },
        );
        Self {
            info,
            indent_char,
            indent_size,
            index,
            locked_first_tokens: HashMap::new(),
            ignored_tokens: HashSet::new(),
            desired_indent_cache: HashMap::new(),
        }
    }

    pub fn info(&self) -> &TokenInfo<'a> {
        &self.info
    }

    fn descriptor(&self, offset: usize) -> OffsetDescriptor<'a> {
        self.index
            .range(..=offset)
            .next_back()
            .map(|(_, descriptor)| *descriptor)
            .unwrap_or(OffsetDescriptor {
                offset: 0,
                from: None,
                force: false,
            })
    }

    /// Make `token` use the same indentation as `base`, so that list elements which
    /// start their own line line up with the first element
    pub fn match_offset_of(&mut self, base: &'a Token, token: &'a Token) {
        log::trace!(
            "indent: {}:{} aligned with {}:{}",
            token.loc.start.line,
            token.loc.start.column,
            base.loc.start.line,
            base.loc.start.column
        );
        self.locked_first_tokens.insert(token.start(), base);
    }

    pub fn set_desired_offset(&mut self, token: &'a Token, from: Option<&'a Token>, offset: usize) {
        self.set_desired_offsets(token.range(), from, offset);
    }

    /// Offset every token in `range` by `offset` levels from `from`.
    ///
    /// When `from` itself lies inside the range it keeps its previous descriptor, so
    /// a token never becomes its own anchor.
    pub fn set_desired_offsets(&mut self, range: std::ops::Range<usize>, from: Option<&'a Token>, offset: usize) {
        self.set_offsets(range, from, offset, false);
    }

    /// Like [`set_desired_offsets`](Self::set_desired_offsets), but the offset
    /// applies even when the token shares a line with its anchor
    pub fn force_desired_offsets(&mut self, range: std::ops::Range<usize>, from: Option<&'a Token>, offset: usize) {
        self.set_offsets(range, from, offset, true);
    }

    fn set_offsets(&mut self, range: std::ops::Range<usize>, from: Option<&'a Token>, offset: usize, force: bool) {
        // an empty range ends up holding the descriptor it already had
        if range.start >= range.end {
            return;
        }
        log::trace!(
            "indent: {}..{} offset {offset} from {:?}",
            range.start,
            range.end,
            from.map(|t| (t.loc.start.line, t.loc.start.column))
        );
        let inserted = OffsetDescriptor { offset, from, force };
        let after_range = self.descriptor(range.end);
        let from_in_range = from.filter(|t| t.range.start >= range.start && t.range.end <= range.end);
        let from_descriptor = from_in_range.map(|t| self.descriptor(t.start()));

        let doomed: Vec<usize> = self.index.range(range.start + 1..range.end).map(|(k, _)| *k).collect();
        for key in doomed {
            self.index.remove(&key);
        }
        self.index.insert(range.start, inserted);
        if let (Some(token), Some(descriptor)) = (from_in_range, from_descriptor) {
            self.index.insert(token.range.start, descriptor);
            self.index.insert(token.range.end, inserted);
        }
        self.index.insert(range.end, after_range);
    }

    /// Leave the token's indentation unchecked, if it starts its line
    pub fn ignore_token(&mut self, token: &'a Token) {
        if self.info.is_first_token_of_line(token) {
            self.ignored_tokens.insert(token.start());
        }
    }

    /// The anchor this token's indentation is measured from
    pub fn first_dependency(&self, token: &Token) -> Option<&'a Token> {
        self.descriptor(token.start()).from
    }

    /// Expected leading whitespace of `token`'s line if `token` started it.
    ///
    /// Resolution follows anchor chains iteratively; a chain that loops back on
    /// itself resolves the repeated anchor to no indentation.
    pub fn desired_indent(&mut self, token: &'a Token) -> String {
        let mut stack: Vec<&'a Token> = vec![token];
        let mut pending: HashSet<usize> = HashSet::from([token.start()]);

        while let Some(&current) = stack.last() {
            if self.desired_indent_cache.contains_key(&current.start()) {
                stack.pop();
                pending.remove(&current.start());
                continue;
            }
            match self.resolve(current) {
                Ok(indent) => {
                    self.desired_indent_cache.insert(current.start(), indent);
                    stack.pop();
                    pending.remove(&current.start());
                }
                Err(anchor) => {
                    if pending.insert(anchor.start()) {
                        stack.push(anchor);
                    } else {
                        log::trace!(
                            "indent: anchor cycle at {}:{}",
                            anchor.loc.start.line,
                            anchor.loc.start.column
                        );
                        self.desired_indent_cache.insert(anchor.start(), String::new());
                    }
                }
            }
        }

        self.desired_indent_cache
            .get(&token.start())
            .cloned()
            .unwrap_or_default()
    }

    /// Desired indentation of `token`, or the anchor that must be resolved first
    fn resolve(&self, token: &'a Token) -> Result<String, &'a Token> {
        if self.ignored_tokens.contains(&token.start()) {
            return Ok(self.info.token_indent(token).to_string());
        }

        if let Some(first) = self.locked_first_tokens.get(&token.start()) {
            let line_first = self.info.first_token_of_line(first);
            let base = self.desired_indent_cache.get(&line_first.start()).ok_or(line_first)?;
            let gap = first.loc.start.column.saturating_sub(line_first.loc.start.column);
            return Ok(format!("{base}{}", self.repeat(gap)));
        }

        let descriptor = self.descriptor(token.start());
        let Some(from) = descriptor.from else {
            return Ok(self.repeat(descriptor.offset * self.indent_size));
        };
        let base = self.desired_indent_cache.get(&from.start()).ok_or(from)?;
        let offset = if from.loc.start.line == token.loc.start.line && !descriptor.force {
            0
        } else {
            descriptor.offset * self.indent_size
        };
        Ok(format!("{base}{}", self.repeat(offset)))
    }

    fn repeat(&self, count: usize) -> String {
        std::iter::repeat_n(self.indent_char, count).collect()
    }
}
