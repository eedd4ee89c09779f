/// Rule indent: enforce consistent indentation
///
/// Runs in two phases. A walk over the tree records, for every token, an offset in
/// indentation levels from an anchor token (a block's members sit one level in from
/// its opening brace, a call's arguments one level in from its opening paren, and so
/// on). Once the walk is done, the first token of every line is compared with the
/// indentation its anchor chain resolves to, and mismatched lines are reported with a
/// fix that rewrites their leading whitespace.
use crate::fix::TextEdit;
use crate::lint_context::{LintContext, Required, TokenQuery};
use crate::rule::{LintError, LintResult, MessageTable, Reporter, Rule, RuleCategory};
use crate::syntax::{NodeId, NodeKind, Position, SourceLocation, Spanned, Token, TokenKind, VisitEvent};
use crate::utils::ast_utils::{
    LINEBREAK_MATCHER, is_closing_paren_token, is_not_closing_paren_token, is_not_opening_paren_token,
    is_opening_paren_token, is_semicolon_token, is_token_on_same_line,
};
use crate::utils::warn_once::WarnOnce;
use std::collections::HashSet;

mod indent_config;
pub mod offsets;
pub mod shape;

pub use indent_config::{
    CallOffsets, FunctionOffsets, IndentConfig, IndentWidth, OffsetKeyword, OffsetValue, PerKindOffsets,
    VariableDeclaratorOption,
};
use offsets::{OffsetStorage, TokenInfo};
use shape::{FunctionFamily, ListFamily, Shape};

const MESSAGES: MessageTable = &[(
    "wrongIndentation",
    "Expected indentation of {{expected}} but found {{actual}}.",
)];

#[derive(Debug, Clone, Default)]
pub struct Indent {
    config: IndentConfig,
}

impl Indent {
    pub fn new(indent: IndentWidth) -> Self {
        Self::from_config_struct(IndentConfig {
            indent,
            ..Default::default()
        })
    }

    pub fn from_config_struct(config: IndentConfig) -> Self {
        Self { config }
    }
}

/// Levels an offset option contributes; `first` and `off` still indent the list body
/// by one level
fn levels(value: OffsetValue) -> usize {
    match value {
        OffsetValue::Levels(levels) => levels,
        OffsetValue::Keyword(_) => 1,
    }
}

fn trailing_linebreaks(value: &str) -> usize {
    let trailing = &value[value.trim_end().len()..];
    LINEBREAK_MATCHER.find_iter(trailing).count()
}

/// Offset recording for one file
struct Layout<'a, 'c> {
    ctx: &'a LintContext<'a>,
    config: &'c IndentConfig,
    offsets: OffsetStorage<'a>,
    /// Start offsets of parens that belong to parameter or argument lists
    parameter_parens: HashSet<usize>,
}

impl<'a> Layout<'a, '_> {
    fn node(&self, id: NodeId) -> &'a crate::syntax::Node {
        self.ctx.node(id)
    }

    fn first_token(&self, target: impl Spanned) -> Result<&'a Token, LintError> {
        self.ctx
            .first_token(target, TokenQuery::default())
            .required("a first token")
    }

    fn last_token(&self, target: impl Spanned) -> Result<&'a Token, LintError> {
        self.ctx
            .last_token(target, TokenQuery::default())
            .required("a last token")
    }

    fn token_before(&self, target: impl Spanned) -> Result<&'a Token, LintError> {
        self.ctx
            .token_before(target, TokenQuery::default())
            .required("a token before")
    }

    fn token_after(&self, target: impl Spanned) -> Result<&'a Token, LintError> {
        self.ctx
            .token_after(target, TokenQuery::default())
            .required("a token after")
    }

    fn set(&mut self, token: &'a Token, from: &'a Token, offset: usize) {
        self.offsets.set_desired_offset(token, Some(from), offset);
    }

    /// Every node's tokens start out level with its first token
    fn offset_node(&mut self, id: NodeId) {
        let node = self.node(id);
        if let Some(first) = self.ctx.first_token(node, TokenQuery::default()) {
            self.offsets.set_desired_offsets(node.range.clone(), Some(first), 0);
        }
    }

    /// First token of a list element, including any parens wrapped around it
    fn element_first_token(&self, element: NodeId, start: &'a Token) -> Result<&'a Token, LintError> {
        let mut token = self.token_before(self.node(element))?;
        while is_opening_paren_token(token) && !token.same(start) {
            token = self.token_before(token)?;
        }
        self.token_after(token)
    }

    fn add_element_list_indent(
        &mut self,
        elements: &[Option<NodeId>],
        start: &'a Token,
        end: &'a Token,
        offset: OffsetValue,
    ) -> Result<(), LintError> {
        self.offsets
            .set_desired_offsets(start.end()..end.start(), Some(start), levels(offset));
        self.set(end, start, 0);

        if offset == OffsetValue::FIRST && elements.first().is_some_and(Option::is_none) {
            return Ok(());
        }
        for (index, element) in elements.iter().enumerate() {
            let Some(element) = *element else {
                continue;
            };
            let element_first = self.element_first_token(element, start)?;
            if offset == OffsetValue::OFF {
                self.offsets.ignore_token(element_first);
            }
            if index == 0 {
                continue;
            }
            if offset == OffsetValue::FIRST && self.offsets.info().is_first_token_of_line(element_first) {
                if let Some(Some(first_element)) = elements.first() {
                    let base = self.element_first_token(*first_element, start)?;
                    self.offsets.match_offset_of(base, element_first);
                }
            } else if let Some(Some(previous)) = elements.get(index - 1) {
                let previous_node = self.node(*previous);
                let previous_last = self.last_token(previous_node)?;
                let previous_end_line = previous_last
                    .loc
                    .end
                    .line
                    .saturating_sub(trailing_linebreaks(&previous_last.value));
                if previous_end_line > start.loc.end.line {
                    let previous_first = self.element_first_token(*previous, start)?;
                    self.offsets.set_desired_offsets(
                        previous_node.end()..self.node(element).end(),
                        Some(previous_first),
                        0,
                    );
                }
            }
        }
        Ok(())
    }

    /// Statement bodies written without braces sit one level in from their parent
    fn add_blockless_node_indent(&mut self, body: NodeId) -> Result<(), LintError> {
        let node = self.node(body);
        if matches!(node.kind, NodeKind::BlockStatement { .. }) {
            return Ok(());
        }
        let last_parent_token = self
            .ctx
            .token_before(node, TokenQuery::filter(&is_not_opening_paren_token))
            .required("the token before a statement body")?;
        let mut first_body_token = self.first_token(node)?;
        let mut last_body_token = self.last_token(node)?;
        loop {
            let before = self.ctx.token_before(first_body_token, TokenQuery::default());
            let after = self.ctx.token_after(last_body_token, TokenQuery::default());
            match (before, after) {
                (Some(before), Some(after)) if is_opening_paren_token(before) && is_closing_paren_token(after) => {
                    first_body_token = before;
                    last_body_token = after;
                }
                _ => break,
            }
        }
        self.offsets.set_desired_offsets(
            first_body_token.start()..last_body_token.end(),
            Some(last_parent_token),
            1,
        );

        let last_token = self.last_token(node)?;
        if !matches!(node.kind, NodeKind::EmptyStatement) && is_semicolon_token(last_token) {
            self.set(last_token, last_parent_token, 0);
        }
        Ok(())
    }

    fn add_function_call_indent(
        &mut self,
        id: NodeId,
        callee: NodeId,
        arguments: &[NodeId],
    ) -> Result<(), LintError> {
        let node = self.node(id);
        let opening_paren = match arguments.first() {
            Some(first) => self
                .ctx
                .first_token_between(self.node(callee), self.node(*first), TokenQuery::filter(&is_opening_paren_token)),
            None => self.ctx.last_token(node, TokenQuery::skip(1)),
        }
        .required("the opening paren of a call")?;
        let closing_paren = self.last_token(node)?;
        self.parameter_parens.insert(opening_paren.start());
        self.parameter_parens.insert(closing_paren.start());

        let offset_token = self.token_before(opening_paren)?;
        self.set(opening_paren, offset_token, 0);
        let elements: Vec<Option<NodeId>> = arguments.iter().copied().map(Some).collect();
        self.add_element_list_indent(
            &elements,
            opening_paren,
            closing_paren,
            self.config.call_expression.arguments,
        )
    }

    fn add_parameters_indent(
        &mut self,
        id: NodeId,
        params: &[NodeId],
        close_before: Option<NodeId>,
        family: FunctionFamily,
    ) -> Result<(), LintError> {
        let node = self.node(id);
        let closing_paren = match close_before {
            Some(anchor) => self
                .ctx
                .token_before(self.node(anchor), TokenQuery::filter(&is_closing_paren_token)),
            None => self
                .ctx
                .last_token(node, TokenQuery::filter(&is_closing_paren_token)),
        }
        .required("the closing paren of a parameter list")?;
        let opening_paren = match params.first() {
            Some(first) => self.token_before(self.node(*first))?,
            None => self.token_before(closing_paren)?,
        };
        self.parameter_parens.insert(opening_paren.start());
        self.parameter_parens.insert(closing_paren.start());

        let offset = match family {
            FunctionFamily::Declaration => self.config.function_declaration.parameters,
            FunctionFamily::Expression => self.config.function_expression.parameters,
        };
        let elements: Vec<Option<NodeId>> = params.iter().copied().map(Some).collect();
        self.add_element_list_indent(&elements, opening_paren, closing_paren, offset)
    }

    fn body_indent(&self, id: NodeId) -> OffsetValue {
        let Some(parent) = self.ctx.ast.parent(id) else {
            return OffsetValue::Levels(1);
        };
        match &self.node(parent).kind {
            NodeKind::FunctionExpression(_) | NodeKind::ArrowFunctionExpression { .. }
                if shape::is_outer_iife(&self.ctx.ast, parent) =>
            {
                self.config.outer_iife_body
            }
            NodeKind::FunctionExpression(_) | NodeKind::ArrowFunctionExpression { .. } => {
                OffsetValue::Levels(self.config.function_expression.body)
            }
            NodeKind::FunctionDeclaration(_) => OffsetValue::Levels(self.config.function_declaration.body),
            _ => OffsetValue::Levels(1),
        }
    }

    /// Whether `token` is on the first line of the statement or declaration containing `leaf`
    fn is_on_first_line_of_statement(&self, token: &Token, leaf: NodeId) -> bool {
        let ast = &self.ctx.ast;
        let mut current = leaf;
        while let Some(parent) = ast.parent(current) {
            let type_name = ast[parent].type_name();
            if type_name.ends_with("Statement") || type_name.ends_with("Declaration") {
                break;
            }
            current = parent;
        }
        ast.parent_node(current)
            .is_none_or(|statement| statement.loc.start.line == token.loc.start.line)
    }

    /// Record the offsets of one node; `generic` is false when the node shares its first
    /// token with an ignored node
    fn enter(&mut self, id: NodeId, generic: bool) -> Result<(), LintError> {
        if generic {
            self.offset_node(id);
        }
        let Some(shape) = shape::project(&self.ctx.ast, id) else {
            return Ok(());
        };
        let node = self.node(id);

        match shape {
            Shape::ElementList {
                open,
                close,
                open_after,
                elements,
                family,
            } => {
                let is_open = |token: &Token| token.is_punctuator(open);
                let is_close = |token: &Token| token.is_punctuator(close);
                let opening = match open_after {
                    Some(after) => self
                        .ctx
                        .token_after(self.node(after), TokenQuery::filter(&is_open)),
                    None => self.ctx.first_token(node, TokenQuery::default()),
                }
                .required("an opening delimiter")?;
                let last_element = elements.iter().rev().flatten().next();
                let search_from = last_element.map_or(opening.range(), |id| self.node(*id).range.clone());
                let closing = self
                    .ctx
                    .token_after(search_from, TokenQuery::filter(&is_close))
                    .required("a closing delimiter")?;
                let offset = match family {
                    ListFamily::Array => self.config.array_expression,
                    ListFamily::Object => self.config.object_expression,
                    ListFamily::TypeParameters => OffsetValue::Levels(1),
                };
                self.add_element_list_indent(&elements, opening, closing, offset)?;
            }
            Shape::Body { elements } => {
                let opening = self.first_token(node)?;
                let closing = self.last_token(node)?;
                if let Some(parent) = self.ctx.ast.parent_node(id)
                    && !parent.kind.is_statement_list_parent()
                {
                    let parent_first = self.first_token(parent)?;
                    self.set(opening, parent_first, 0);
                }
                let elements: Vec<Option<NodeId>> = elements.into_iter().map(Some).collect();
                self.add_element_list_indent(&elements, opening, closing, self.body_indent(id))?;
            }
            Shape::Operator { left, right, operator } => {
                let is_operator = |token: &Token| token.value == operator;
                let operator_token = self
                    .ctx
                    .first_token_between(self.node(left), self.node(right), TokenQuery::filter(&is_operator))
                    .required("a binary operator")?;
                let after = self.token_after(operator_token)?;
                self.offsets.ignore_token(operator_token);
                self.offsets.ignore_token(after);
                self.set(after, operator_token, 0);
            }
            Shape::Assignment { left, right, operator } => {
                let is_operator = |token: &Token| token.value == operator;
                let operator_token = self
                    .ctx
                    .first_token_between(self.node(left), self.node(right), TokenQuery::filter(&is_operator))
                    .required("an assignment operator")?;
                let left_last = self.last_token(self.node(left))?;
                self.offsets
                    .set_desired_offsets(operator_token.start()..node.end(), Some(left_last), 1);
                self.offsets.ignore_token(operator_token);
                let after = self.token_after(operator_token)?;
                self.offsets.ignore_token(after);
            }
            Shape::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let first = self.first_token(node)?;
                let (test, consequent, alternate) = (self.node(test), self.node(consequent), self.node(alternate));
                if !self.config.flat_ternary_expressions
                    || !is_token_on_same_line(test, consequent)
                    || self.is_on_first_line_of_statement(first, id)
                {
                    let is_question = |token: &Token| token.is_punctuator("?");
                    let is_colon = |token: &Token| token.is_punctuator(":");
                    let question = self
                        .ctx
                        .first_token_between(test, consequent, TokenQuery::filter(&is_question))
                        .required("a '?' token")?;
                    let colon = self
                        .ctx
                        .first_token_between(consequent, alternate, TokenQuery::filter(&is_colon))
                        .required("a ':' token")?;
                    let first_consequent = self.token_after(question)?;
                    let last_consequent = self.token_before(colon)?;
                    let first_alternate = self.token_after(colon)?;
                    let branch_offset = |token: &Token| {
                        if token.kind == TokenKind::Punctuator && self.config.offset_ternary_expressions {
                            2
                        } else {
                            1
                        }
                    };
                    let (consequent_offset, alternate_offset) =
                        (branch_offset(first_consequent), branch_offset(first_alternate));

                    self.set(question, first, 1);
                    self.set(colon, first, 1);
                    self.set(first_consequent, first, consequent_offset);
                    if last_consequent.loc.end.line == first_alternate.loc.start.line {
                        self.set(first_alternate, first_consequent, 0);
                    } else {
                        self.set(first_alternate, first, alternate_offset);
                    }
                }
            }
            Shape::Declarator { id: name, init } => {
                if let Some(init) = init {
                    let is_equals = |token: &Token| token.is_punctuator("=");
                    let equals = self
                        .ctx
                        .token_before(self.node(init), TokenQuery::filter(&is_equals))
                        .required("an '=' token")?;
                    let after = self.token_after(equals)?;
                    self.offsets.ignore_token(equals);
                    self.offsets.ignore_token(after);
                    self.offsets
                        .set_desired_offsets(after.start()..node.end(), Some(equals), 1);
                    let name_last = self.last_token(self.node(name))?;
                    self.set(equals, name_last, 0);
                }
            }
            Shape::Declaration { kind, declarations } => {
                let option = self.config.variable_declarator.for_kind(kind);
                let first = self.first_token(node)?;
                let last = self.last_token(node)?;
                if option == OffsetValue::FIRST && declarations.len() > 1 {
                    let elements: Vec<Option<NodeId>> = declarations.iter().copied().map(Some).collect();
                    return self.add_element_list_indent(&elements, first, last, OffsetValue::FIRST);
                }
                let spans_lines = declarations
                    .last()
                    .is_some_and(|last_declaration| self.node(*last_declaration).loc.start.line > node.loc.start.line);
                let offset = if spans_lines { levels(option) } else { 1 };
                self.offsets
                    .set_desired_offsets(node.range.clone(), Some(first), offset);
                if is_semicolon_token(last) {
                    self.offsets.ignore_token(last);
                }
            }
            Shape::Call {
                callee,
                arguments,
                is_new,
            } => {
                let has_parens = !is_new || !arguments.is_empty() || {
                    let last = self.ctx.last_token(node, TokenQuery::default());
                    let before_last = self.ctx.last_token(node, TokenQuery::skip(1));
                    last.is_some_and(is_closing_paren_token) && before_last.is_some_and(is_opening_paren_token)
                };
                if has_parens {
                    self.add_function_call_indent(id, callee, &arguments)?;
                }
            }
            Shape::Parameters {
                params,
                close_before,
                family,
            } => self.add_parameters_indent(id, &params, close_before, family)?,
            Shape::Arrow {
                params,
                close_before,
                body,
                is_async,
            } => {
                let maybe_paren = self
                    .ctx
                    .first_token(node, TokenQuery::skip(usize::from(is_async)))
                    .required("an arrow function token")?;
                if is_opening_paren_token(maybe_paren) {
                    let closing_paren = self
                        .ctx
                        .token_before(self.node(close_before), TokenQuery::filter(&is_closing_paren_token))
                        .required("the closing paren of arrow parameters")?;
                    self.parameter_parens.insert(maybe_paren.start());
                    self.parameter_parens.insert(closing_paren.start());
                    let elements: Vec<Option<NodeId>> = params.iter().copied().map(Some).collect();
                    self.add_element_list_indent(
                        &elements,
                        maybe_paren,
                        closing_paren,
                        self.config.function_expression.parameters,
                    )?;
                }
                self.add_blockless_node_indent(body)?;
            }
            Shape::Heritage { super_class, body } => {
                let class_token = self.first_token(node)?;
                let extends_token = self
                    .ctx
                    .token_before(self.node(super_class), TokenQuery::filter(&is_not_opening_paren_token))
                    .required("an 'extends' token")?;
                self.offsets.set_desired_offsets(
                    extends_token.start()..self.node(body).start(),
                    Some(class_token),
                    1,
                );
            }
            Shape::Blockless { bodies } => {
                for body in bodies {
                    self.add_blockless_node_indent(body)?;
                }
            }
            Shape::For {
                init,
                test,
                update,
                body,
            } => {
                let for_paren = self
                    .ctx
                    .first_token(node, TokenQuery::skip(1))
                    .required("the paren of a for statement")?;
                for part in [init, test, update].into_iter().flatten() {
                    let range = self.node(part).range.clone();
                    self.offsets.set_desired_offsets(range, Some(for_paren), 1);
                }
                self.add_blockless_node_indent(body)?;
            }
            Shape::Switch { discriminant, cases } => {
                let is_open = |token: &Token| token.is_punctuator("{");
                let opening = self
                    .ctx
                    .token_after(self.node(discriminant), TokenQuery::filter(&is_open))
                    .required("the opening brace of a switch")?;
                let closing = self.last_token(node)?;
                self.offsets.set_desired_offsets(
                    opening.end()..closing.start(),
                    Some(opening),
                    self.config.switch_case,
                );
                if let Some(last_case) = cases.last() {
                    let trailing: Vec<&'a Token> = self
                        .ctx
                        .tokens_between(self.node(*last_case), closing, true)
                        .iter()
                        .filter(|token| token.is_comment())
                        .collect();
                    for comment in trailing {
                        self.offsets.ignore_token(comment);
                    }
                }
            }
            Shape::SwitchCase { consequent } => {
                let single_block = consequent.len() == 1
                    && matches!(self.node(consequent[0]).kind, NodeKind::BlockStatement { .. });
                if !single_block {
                    let case_keyword = self.first_token(node)?;
                    let after_case = self.token_after(node)?;
                    self.offsets
                        .set_desired_offsets(case_keyword.end()..after_case.start(), Some(case_keyword), 1);
                }
            }
            Shape::Import { named } => {
                if !named.is_empty() {
                    let is_open = |token: &Token| token.is_punctuator("{");
                    let is_close = |token: &Token| token.is_punctuator("}");
                    let opening = self
                        .ctx
                        .first_token(node, TokenQuery::filter(&is_open))
                        .required("the opening brace of an import")?;
                    let closing = self
                        .ctx
                        .last_token(node, TokenQuery::filter(&is_close))
                        .required("the closing brace of an import")?;
                    let elements: Vec<Option<NodeId>> = named.iter().copied().map(Some).collect();
                    self.add_element_list_indent(&elements, opening, closing, self.config.import_declaration)?;
                }
                let is_from = |token: &Token| token.is(TokenKind::Identifier, "from");
                let is_source = |token: &Token| token.kind == TokenKind::String;
                let from = self.ctx.last_token(node, TokenQuery::filter(&is_from));
                let source = self.ctx.last_token(node, TokenQuery::filter(&is_source));
                if let (Some(from), Some(source)) = (from, source) {
                    let first = self.first_token(node)?;
                    self.offsets
                        .set_desired_offsets(from.start()..source.end(), Some(first), 1);
                }
            }
            Shape::ExportList {
                specifiers,
                has_source,
            } => {
                let is_open = |token: &Token| token.is_punctuator("{");
                let is_close = |token: &Token| token.is_punctuator("}");
                let opening = self
                    .ctx
                    .first_token(node, TokenQuery::filter(&is_open))
                    .required("the opening brace of an export")?;
                let closing = self
                    .ctx
                    .last_token(node, TokenQuery::filter(&is_close))
                    .required("the closing brace of an export")?;
                let elements: Vec<Option<NodeId>> = specifiers.iter().copied().map(Some).collect();
                self.add_element_list_indent(&elements, opening, closing, OffsetValue::Levels(1))?;
                if has_source {
                    let first = self.first_token(node)?;
                    self.offsets
                        .set_desired_offsets(closing.end()..node.end(), Some(first), 1);
                }
            }
            Shape::Member {
                object,
                property,
                computed,
            } => self.add_member_indent(id, object, property, computed)?,
            Shape::Property { key, value } => {
                let is_colon = |token: &Token| token.is_punctuator(":");
                let colon = self
                    .ctx
                    .first_token_between(self.node(key), self.node(value), TokenQuery::filter(&is_colon))
                    .required("a ':' token")?;
                let after = self.token_after(colon)?;
                self.offsets.ignore_token(after);
            }
            Shape::ClassField { key, value, computed } => self.add_class_field_indent(id, key, value, computed)?,
        }
        Ok(())
    }

    fn add_member_indent(&mut self, id: NodeId, object: NodeId, property: NodeId, computed: bool) -> Result<(), LintError> {
        let node = self.node(id);
        let (object, property) = (self.node(object), self.node(property));
        let first_non_object = self
            .ctx
            .first_token_between(object, property, TokenQuery::filter(&is_not_closing_paren_token))
            .required("a member access token")?;
        let second_non_object = self.token_after(first_non_object)?;
        let object_paren_count = self
            .ctx
            .tokens_between(object, property, false)
            .iter()
            .filter(|token| is_closing_paren_token(token))
            .count();
        let first_object_token = if object_paren_count > 0 {
            self.ctx
                .token_before(object, TokenQuery::skip(object_paren_count - 1))
                .required("an opening paren around an object")?
        } else {
            self.first_token(object)?
        };
        let last_object_token = self.token_before(first_non_object)?;
        let first_property_token = if computed { first_non_object } else { second_non_object };

        if computed {
            let last = self.last_token(node)?;
            self.set(last, first_non_object, 0);
            self.offsets
                .set_desired_offsets(property.range.clone(), Some(first_non_object), 1);
        }

        let offset_base = if last_object_token.loc.end.line == first_property_token.loc.start.line {
            last_object_token
        } else {
            first_object_token
        };
        match self.config.member_expression {
            OffsetValue::Levels(levels) => {
                self.set(first_non_object, offset_base, levels);
                let second_base = if computed { first_non_object } else { offset_base };
                self.set(second_non_object, second_base, levels);
            }
            OffsetValue::Keyword(_) => {
                self.offsets.ignore_token(first_non_object);
                self.offsets.ignore_token(second_non_object);
                self.set(first_non_object, offset_base, 0);
                self.set(second_non_object, first_non_object, 0);
            }
        }
        Ok(())
    }

    fn add_class_field_indent(
        &mut self,
        id: NodeId,
        key: NodeId,
        value: Option<NodeId>,
        computed: bool,
    ) -> Result<(), LintError> {
        let node = self.node(id);
        let first = self.first_token(node)?;
        let maybe_semicolon = self.last_token(node)?;
        let key_node = self.node(key);

        let key_last = if computed {
            let is_open = |token: &Token| token.is_punctuator("[");
            let is_close = |token: &Token| token.is_punctuator("]");
            let bracket_left = self
                .ctx
                .token_before(key_node, TokenQuery::filter(&is_open))
                .required("the '[' of a computed key")?;
            let bracket_right = self
                .ctx
                .token_after(key_node, TokenQuery::filter(&is_close))
                .required("the ']' of a computed key")?;
            if !bracket_left.same(first) {
                self.set(bracket_left, first, 0);
            }
            self.offsets
                .set_desired_offsets(bracket_left.end()..bracket_right.start(), Some(bracket_left), 1);
            self.set(bracket_right, bracket_left, 0);
            bracket_right
        } else {
            let key_token = self.first_token(key_node)?;
            if !key_token.same(first) {
                self.set(key_token, first, 1);
            }
            key_token
        };

        if let Some(value) = value {
            let is_equals = |token: &Token| token.is_punctuator("=");
            let equals = self
                .ctx
                .token_before(self.node(value), TokenQuery::filter(&is_equals))
                .required("the '=' of a class field")?;
            let value_token = self.token_after(equals)?;
            self.set(equals, key_last, 1);
            self.set(value_token, equals, 1);
            if is_semicolon_token(maybe_semicolon) {
                self.set(maybe_semicolon, equals, 1);
            }
        } else if is_semicolon_token(maybe_semicolon) {
            self.set(maybe_semicolon, key_last, 1);
        }
        Ok(())
    }

    /// A `;` that ends a brace-less body but starts its own line aligns with the statement
    fn exit(&mut self, id: NodeId) -> Result<(), LintError> {
        let bodies: Vec<NodeId> = match &self.node(id).kind {
            NodeKind::IfStatement {
                consequent, alternate, ..
            } => std::iter::once(*consequent).chain(*alternate).collect(),
            NodeKind::DoWhileStatement { body, .. }
            | NodeKind::ForStatement { body, .. }
            | NodeKind::ForInStatement { body, .. }
            | NodeKind::ForOfStatement { body, .. }
            | NodeKind::WhileStatement { body, .. } => vec![*body],
            _ => return Ok(()),
        };
        for body in bodies {
            let last = self.last_token(self.node(body))?;
            if !is_semicolon_token(last) {
                continue;
            }
            let before = self.token_before(last)?;
            let after = self.ctx.token_after(last, TokenQuery::default());
            if !is_token_on_same_line(before, last) && after.is_some_and(|after| is_token_on_same_line(last, after)) {
                let statement_first = self.first_token(self.node(id))?;
                self.set(last, statement_first, 0);
            }
        }
        Ok(())
    }

    /// Leave the tokens of a node as written, unless they are anchored inside it
    fn ignore_node(&mut self, id: NodeId) {
        let tokens = self.ctx.tokens_in(self.node(id), true);
        let inside: HashSet<usize> = tokens.iter().map(|token| token.start()).collect();
        for token in tokens {
            let anchored_inside = self
                .offsets
                .first_dependency(token)
                .is_some_and(|dependency| inside.contains(&dependency.start()));
            if anchored_inside {
                continue;
            }
            let first_of_line = self.offsets.info().first_token_of_line(token);
            if first_of_line.same(token) {
                self.offsets.ignore_token(token);
            } else {
                self.set(token, first_of_line, 0);
            }
        }
    }

    /// Tokens inside grouping parens sit one level in from the opening paren
    fn add_parens_indent(&mut self) {
        let ctx = self.ctx;
        let mut stack: Vec<&'a Token> = Vec::new();
        let mut pairs: Vec<(&'a Token, &'a Token)> = Vec::new();
        for token in &ctx.tokens {
            if is_opening_paren_token(token) {
                stack.push(token);
            } else if is_closing_paren_token(token)
                && let Some(left) = stack.pop()
            {
                pairs.push((left, token));
            }
        }
        for (left, right) in pairs.into_iter().rev() {
            if !self.parameter_parens.contains(&left.start()) && !self.parameter_parens.contains(&right.start()) {
                let inner = ctx.tokens_between(left, right, false);
                let inside: HashSet<usize> = inner.iter().map(|token| token.start()).collect();
                for token in inner {
                    let anchored_inside = self
                        .offsets
                        .first_dependency(token)
                        .is_some_and(|dependency| inside.contains(&dependency.start()));
                    if !anchored_inside {
                        self.set(token, left, 1);
                    }
                }
            }
            self.set(right, left, 0);
        }
    }
}

impl Indent {
    fn validate_token_indent(info: &TokenInfo, token: &Token, desired: &str) -> bool {
        let actual = info.token_indent(token);
        // mixed spaces and tabs are left to other tools
        actual == desired || (actual.contains(' ') && actual.contains('\t'))
    }

    fn has_blank_lines_between(ctx: &LintContext, first: &Token, second: &Token) -> bool {
        let lines = ctx.lines();
        (first.loc.end.line + 1..second.loc.start.line)
            .any(|line| lines.get(line - 1).is_some_and(|text| text.trim().is_empty()))
    }

    fn report(
        &self,
        ctx: &LintContext,
        reporter: &mut Reporter,
        info: &TokenInfo,
        token: &Token,
        desired: &str,
    ) -> Result<(), LintError> {
        let (indent_char, _) = self.config.indent.unit();
        let unit = if indent_char == '\t' { "tab" } else { "space" };
        let actual = info.token_indent(token);
        let spaces = actual.chars().filter(|c| *c == ' ').count();
        let tabs = actual.chars().filter(|c| *c == '\t').count();
        let expected_amount = desired.chars().count();
        let plural = |n: usize| if n == 1 { "" } else { "s" };

        let expected = format!("{expected_amount} {unit}{}", plural(expected_amount));
        let found = if spaces > 0 {
            if indent_char == ' ' {
                spaces.to_string()
            } else {
                format!("{spaces} space{}", plural(spaces))
            }
        } else if tabs > 0 {
            if indent_char == '\t' {
                tabs.to_string()
            } else {
                format!("{tabs} tab{}", plural(tabs))
            }
        } else {
            "0".to_string()
        };

        let line = token.loc.start.line;
        let line_start = ctx.line_start(line).required("the start of a reported line")?;
        let loc = SourceLocation::new(Position::new(line, 0), Position::new(line, token.loc.start.column));
        reporter.report(
            loc,
            "wrongIndentation",
            &[("expected", expected), ("actual", found)],
            Some(vec![TextEdit::replace_range(line_start..token.start(), desired)]),
        )
    }
}

impl Rule for Indent {
    fn name(&self) -> &'static str {
        "indent"
    }

    fn description(&self) -> &'static str {
        "Enforce consistent indentation"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut reporter = Reporter::new(ctx, self.name(), MESSAGES);
        let (indent_char, indent_size) = self.config.indent.unit();
        let mut layout = Layout {
            ctx,
            config: &self.config,
            offsets: OffsetStorage::new(TokenInfo::new(ctx), indent_char, indent_size),
            parameter_parens: HashSet::new(),
        };

        if self.config.ignore_comments {
            for comment in &ctx.comments {
                layout.offsets.ignore_token(comment);
            }
        }

        let mut events = Vec::with_capacity(ctx.ast.len() * 2);
        ctx.ast.walk(|event| events.push(event));
        let ignored: Vec<NodeId> = ctx
            .ast
            .preorder()
            .into_iter()
            .filter(|id| {
                let type_name = ctx.node(*id).type_name();
                self.config.ignored_nodes.iter().any(|name| name == type_name)
            })
            .collect();
        let ignored_set: HashSet<NodeId> = ignored.iter().copied().collect();
        let ignored_first_tokens: HashSet<usize> = ignored
            .iter()
            .filter_map(|id| ctx.first_token(ctx.node(*id), TokenQuery::default()))
            .map(|token| token.start())
            .collect();

        for event in events {
            match event {
                VisitEvent::Enter(id) if !ignored_set.contains(&id) => {
                    let starts_ignored_node = ctx
                        .first_token(ctx.node(id), TokenQuery::default())
                        .is_some_and(|first| ignored_first_tokens.contains(&first.start()));
                    layout.enter(id, !starts_ignored_node)?;
                }
                VisitEvent::Exit(id) if !ignored_set.contains(&id) => layout.exit(id)?,
                _ => {}
            }
        }
        for id in &ignored {
            layout.ignore_node(*id);
        }
        layout.add_parens_indent();

        let Layout { mut offsets, .. } = layout;
        for line in 1..=ctx.lines().len() {
            let Some(first) = offsets.info().first_token_on(line) else {
                continue;
            };
            if first.loc.start.line != line {
                // continuation of a multi-line token
                continue;
            }

            if first.is_comment() {
                let before = ctx.token_before(first, TokenQuery::with_comments());
                let after = match before {
                    Some(before) => ctx.token_after(before, TokenQuery::default()),
                    None => ctx.tokens.first(),
                };
                let may_align_before = before.is_some_and(|before| !Self::has_blank_lines_between(ctx, before, first));
                let may_align_after = after.is_some_and(|after| !Self::has_blank_lines_between(ctx, first, after));
                if let Some(after) = after
                    && is_semicolon_token(after)
                    && !is_token_on_same_line(first, after)
                {
                    offsets.set_desired_offset(first, Some(after), 0);
                }
                if let Some(before) = before.filter(|_| may_align_before) {
                    let desired = offsets.desired_indent(before);
                    if Self::validate_token_indent(offsets.info(), first, &desired) {
                        continue;
                    }
                }
                if let Some(after) = after.filter(|_| may_align_after) {
                    let desired = offsets.desired_indent(after);
                    if Self::validate_token_indent(offsets.info(), first, &desired) {
                        continue;
                    }
                }
            }

            let desired = offsets.desired_indent(first);
            if Self::validate_token_indent(offsets.info(), first, &desired) {
                continue;
            }
            self.report(ctx, &mut reporter, offsets.info(), first, &desired)?;
        }

        Ok(reporter.into_warnings())
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        ctx.tokens.is_empty()
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Indentation
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        crate::rule_config_serde::default_config_section::<IndentConfig>()
    }

    fn from_config(config: &crate::config::Config, _warn_once: &WarnOnce) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<IndentConfig>(config);
        Box::new(Self::from_config_struct(rule_config))
    }
}
