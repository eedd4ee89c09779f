use super::{PResult, Parser};
use crate::syntax::ast::{NodeId, NodeKind, PropertyKind};
use crate::syntax::token::{Token, TokenKind};

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=", "||=", "??=",
];

/// Tokens that cannot follow `get`/`set`/`async` when those words start an accessor or method
const PROPERTY_NAME_FOLLOWERS: &[&str] = &["(", ",", ":", "}", "=", "<"];

fn binary_precedence(token: &Token, no_in: bool) -> Option<u8> {
    if !matches!(token.kind, TokenKind::Punctuator | TokenKind::Keyword) {
        return None;
    }
    let precedence = match token.value.as_str() {
        "??" | "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "instanceof" => 7,
        "in" if !no_in => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        "**" => 11,
        _ => return None,
    };
    Some(precedence)
}

impl Parser<'_> {
    /// Comma-separated expression list (a `SequenceExpression` when more than one)
    pub(super) fn parse_expression(&mut self, no_in: bool) -> PResult<NodeId> {
        let start = self.start();
        let first = self.parse_assignment(no_in)?;
        if !self.at(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(",") {
            expressions.push(self.parse_assignment(no_in)?);
        }
        Ok(self.finish(NodeKind::SequenceExpression { expressions }, start))
    }

    pub(super) fn parse_assignment(&mut self, no_in: bool) -> PResult<NodeId> {
        if self.looks_like_arrow()
            && let Some(arrow) = self.try_parse(|p| p.parse_arrow(no_in))
        {
            return Ok(arrow);
        }

        if self.at("yield") {
            return self.parse_yield(no_in);
        }

        let start = self.start();
        let left = self.parse_conditional(no_in)?;
        let is_assignment = self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Punctuator && ASSIGNMENT_OPERATORS.contains(&t.value.as_str()));
        if !is_assignment {
            return Ok(left);
        }
        let operator = self.bump()?.value;
        if operator == "=" {
            self.to_pattern(left);
        }
        let right = self.parse_assignment(no_in)?;
        Ok(self.finish(NodeKind::AssignmentExpression { operator, left, right }, start))
    }

    /// Cheap lookahead deciding whether an arrow function parse is worth attempting
    fn looks_like_arrow(&self) -> bool {
        let paren_then_arrow = |open: usize| {
            self.matching_close(open)
                .and_then(|close| self.tokens.get(close + 1))
                .is_some_and(|t| Self::token_is(t, "=>") || Self::token_is(t, ":"))
        };
        if self.at_kind(TokenKind::Identifier) && self.nth_is(1, "=>") {
            return true;
        }
        if self.at("(") {
            return paren_then_arrow(self.pos);
        }
        if self.at("async") {
            return (self.nth_kind(1) == Some(TokenKind::Identifier) && self.nth_is(2, "=>"))
                || (self.nth_is(1, "(") && paren_then_arrow(self.pos + 1));
        }
        false
    }

    fn parse_arrow(&mut self, no_in: bool) -> PResult<NodeId> {
        let start = self.start();
        let is_async = self.at("async") && !self.nth_is(1, "=>") && self.eat("async");
        let params = if self.at("(") {
            self.parse_parameters()?
        } else {
            vec![self.parse_identifier()?]
        };
        let return_type = self.parse_optional_type_annotation()?;
        if self.has_newline_before() {
            return Err(self.unexpected(Some("=>")));
        }
        self.expect("=>")?;
        let (body, expression) = if self.at("{") {
            (self.parse_block()?, false)
        } else {
            (self.parse_assignment(no_in)?, true)
        };
        Ok(self.finish(
            NodeKind::ArrowFunctionExpression {
                params,
                return_type,
                body,
                expression,
                is_async,
            },
            start,
        ))
    }

    fn parse_yield(&mut self, no_in: bool) -> PResult<NodeId> {
        let start = self.start();
        self.expect("yield")?;
        let delegate = !self.has_newline_before() && self.eat("*");
        let ends_here = self.is_eof()
            || self.has_newline_before()
            || self.at_any(&[")", "]", "}", ",", ";", ":"]);
        let argument = if ends_here && !delegate {
            None
        } else {
            Some(self.parse_assignment(no_in)?)
        };
        Ok(self.finish(NodeKind::YieldExpression { argument, delegate }, start))
    }

    fn parse_conditional(&mut self, no_in: bool) -> PResult<NodeId> {
        let start = self.start();
        let test = self.parse_binary(1, no_in)?;
        if !self.eat("?") {
            return Ok(test);
        }
        let consequent = self.parse_assignment(false)?;
        self.expect(":")?;
        let alternate = self.parse_assignment(no_in)?;
        Ok(self.finish(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_binary(&mut self, min_precedence: u8, no_in: bool) -> PResult<NodeId> {
        let start = self.start();
        let mut left = self.parse_unary()?;
        loop {
            let Some(token) = self.peek() else {
                break;
            };
            if token.kind == TokenKind::Identifier
                && token.value == "as"
                && min_precedence <= 7
                && !self.has_newline_before()
            {
                self.bump()?;
                let type_annotation = self.parse_type()?;
                left = self.finish(
                    NodeKind::TSAsExpression {
                        expression: left,
                        type_annotation,
                    },
                    start,
                );
                continue;
            }
            let Some(precedence) = binary_precedence(token, no_in) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            let operator = self.bump()?.value;
            let next_min = if operator == "**" { precedence } else { precedence + 1 };
            let right = self.parse_binary(next_min, no_in)?;
            let kind = if matches!(operator.as_str(), "||" | "&&" | "??") {
                NodeKind::LogicalExpression { operator, left, right }
            } else {
                NodeKind::BinaryExpression { operator, left, right }
            };
            left = self.finish(kind, start);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let Some(token) = self.peek() else {
            return Err(self.unexpected(None));
        };
        let is_operator = matches!(token.kind, TokenKind::Punctuator | TokenKind::Keyword);
        let value = token.value.clone();

        if is_operator && matches!(value.as_str(), "!" | "~" | "+" | "-" | "typeof" | "void" | "delete") {
            self.bump()?;
            let argument = self.parse_unary()?;
            return Ok(self.finish(
                NodeKind::UnaryExpression {
                    operator: value,
                    argument,
                },
                start,
            ));
        }
        if is_operator && matches!(value.as_str(), "++" | "--") {
            self.bump()?;
            let argument = self.parse_unary()?;
            return Ok(self.finish(
                NodeKind::UpdateExpression {
                    operator: value,
                    prefix: true,
                    argument,
                },
                start,
            ));
        }
        if is_operator && value == "await" {
            self.bump()?;
            let argument = self.parse_unary()?;
            return Ok(self.finish(NodeKind::AwaitExpression { argument }, start));
        }

        let argument = self.parse_left_hand_side()?;
        if self.at_any(&["++", "--"]) && !self.has_newline_before() {
            let operator = self.bump()?.value;
            return Ok(self.finish(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: false,
                    argument,
                },
                start,
            ));
        }
        Ok(argument)
    }

    /// Call, member, and `new` expressions
    pub(super) fn parse_left_hand_side(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let mut expression = if self.at("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };

        loop {
            if self.eat(".") {
                let property = self.parse_identifier_name()?;
                expression = self.finish(
                    NodeKind::MemberExpression {
                        object: expression,
                        property,
                        computed: false,
                        optional: false,
                    },
                    start,
                );
            } else if self.eat("?.") {
                if self.at("(") {
                    let arguments = self.parse_arguments()?;
                    expression = self.finish(
                        NodeKind::CallExpression {
                            callee: expression,
                            arguments,
                            optional: true,
                        },
                        start,
                    );
                } else {
                    let computed = self.eat("[");
                    let property = if computed {
                        let property = self.parse_expression(false)?;
                        self.expect("]")?;
                        property
                    } else {
                        self.parse_identifier_name()?
                    };
                    expression = self.finish(
                        NodeKind::MemberExpression {
                            object: expression,
                            property,
                            computed,
                            optional: true,
                        },
                        start,
                    );
                }
            } else if self.eat("[") {
                let property = self.parse_expression(false)?;
                self.expect("]")?;
                expression = self.finish(
                    NodeKind::MemberExpression {
                        object: expression,
                        property,
                        computed: true,
                        optional: false,
                    },
                    start,
                );
            } else if self.at("(") {
                let arguments = self.parse_arguments()?;
                expression = self.finish(
                    NodeKind::CallExpression {
                        callee: expression,
                        arguments,
                        optional: false,
                    },
                    start,
                );
            } else if self.at("!") && !self.has_newline_before() {
                self.bump()?;
                expression = self.finish(NodeKind::TSNonNullExpression { expression }, start);
            } else if self.at_kind(TokenKind::Template) {
                let token = self.bump()?;
                let quasi = self.push_node(NodeKind::TemplateLiteral { raw: token.value }, token.range);
                expression = self.finish(NodeKind::TaggedTemplateExpression { tag: expression, quasi }, start);
            } else if self.at("<") {
                // `f<T>(x)`: explicit type arguments on a call
                let call = self.try_parse(|p| {
                    p.parse_type_arguments()?;
                    if !p.at("(") {
                        return Err(p.unexpected(Some("(")));
                    }
                    p.parse_arguments()
                });
                match call {
                    Some(arguments) => {
                        expression = self.finish(
                            NodeKind::CallExpression {
                                callee: expression,
                                arguments,
                                optional: false,
                            },
                            start,
                        );
                    }
                    None => break,
                }
            } else {
                break;
            }
        }
        Ok(expression)
    }

    fn parse_new(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("new")?;
        let callee_start = self.start();
        let mut callee = if self.at("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            if self.eat(".") {
                let property = self.parse_identifier_name()?;
                callee = self.finish(
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: false,
                        optional: false,
                    },
                    callee_start,
                );
            } else if self.eat("[") {
                let property = self.parse_expression(false)?;
                self.expect("]")?;
                callee = self.finish(
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: true,
                        optional: false,
                    },
                    callee_start,
                );
            } else {
                break;
            }
        }
        if self.at("<") {
            self.try_parse(|p| p.parse_type_arguments());
        }
        let arguments = if self.at("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish(NodeKind::NewExpression { callee, arguments }, start))
    }

    pub(super) fn parse_arguments(&mut self) -> PResult<Vec<NodeId>> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        while !self.at(")") {
            arguments.push(self.parse_spread_or_assignment()?);
            if !self.at(")") {
                self.expect(",")?;
            }
        }
        self.expect(")")?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> PResult<NodeId> {
        if self.at("...") {
            let start = self.start();
            self.bump()?;
            let argument = self.parse_assignment(false)?;
            return Ok(self.finish(NodeKind::SpreadElement { argument }, start));
        }
        self.parse_assignment(false)
    }

    fn parse_primary(&mut self) -> PResult<NodeId> {
        let token = self.peek().cloned().ok_or_else(|| self.unexpected(None))?;
        match token.kind {
            TokenKind::Identifier => {
                if token.value == "async" && self.nth_is(1, "function") {
                    return self.parse_function(true, false);
                }
                self.bump()?;
                Ok(self.identifier_node(&token))
            }
            TokenKind::Keyword => match token.value.as_str() {
                "this" => {
                    self.bump()?;
                    Ok(self.push_node(NodeKind::ThisExpression, token.range))
                }
                "super" => {
                    self.bump()?;
                    Ok(self.push_node(NodeKind::Super, token.range))
                }
                "function" => self.parse_function(true, false),
                "class" => self.parse_class(false),
                "import" => {
                    self.bump()?;
                    Ok(self.identifier_node(&token))
                }
                _ => Err(self.unexpected(None)),
            },
            TokenKind::String | TokenKind::Numeric | TokenKind::Boolean | TokenKind::Null => {
                self.bump()?;
                Ok(self.push_node(NodeKind::Literal { raw: token.value }, token.range))
            }
            TokenKind::Template => {
                self.bump()?;
                Ok(self.push_node(NodeKind::TemplateLiteral { raw: token.value }, token.range))
            }
            TokenKind::Punctuator => match token.value.as_str() {
                "(" => {
                    self.bump()?;
                    let expression = self.parse_expression(false)?;
                    self.expect(")")?;
                    Ok(expression)
                }
                "[" => self.parse_array_literal(),
                "{" => self.parse_object_literal(),
                _ => Err(self.unexpected(None)),
            },
            TokenKind::LineComment | TokenKind::BlockComment => Err(self.unexpected(None)),
        }
    }

    fn parse_array_literal(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("[")?;
        let mut elements = Vec::new();
        loop {
            if self.at("]") {
                break;
            }
            if self.eat(",") {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_spread_or_assignment()?));
            if !self.at("]") {
                self.expect(",")?;
            }
        }
        self.expect("]")?;
        Ok(self.finish(NodeKind::ArrayExpression { elements }, start))
    }

    fn parse_object_literal(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("{")?;
        let mut properties = Vec::new();
        while !self.at("}") {
            properties.push(self.parse_object_member()?);
            if !self.at("}") {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(self.finish(NodeKind::ObjectExpression { properties }, start))
    }

    /// Whether the word at the cursor is a modifier (`get`, `set`, `async`) rather than a key
    fn at_property_modifier(&self, word: &str) -> bool {
        self.at(word)
            && self
                .peek_nth(1)
                .is_some_and(|next| !PROPERTY_NAME_FOLLOWERS.contains(&next.value.as_str()))
    }

    fn parse_object_member(&mut self) -> PResult<NodeId> {
        let start = self.start();
        if self.eat("...") {
            let argument = self.parse_assignment(false)?;
            return Ok(self.finish(NodeKind::SpreadElement { argument }, start));
        }

        let mut kind = PropertyKind::Init;
        let mut is_async = false;
        if self.at_property_modifier("get") {
            self.bump()?;
            kind = PropertyKind::Get;
        } else if self.at_property_modifier("set") {
            self.bump()?;
            kind = PropertyKind::Set;
        } else if self.at_property_modifier("async") {
            self.bump()?;
            is_async = true;
        }
        let generator = self.eat("*");
        let (key, computed) = self.parse_property_key()?;

        if self.at("(") || self.at("<") {
            let value = self.parse_method_value(is_async, generator)?;
            return Ok(self.finish(
                NodeKind::Property {
                    key,
                    value,
                    kind,
                    shorthand: false,
                    computed,
                    method: kind == PropertyKind::Init,
                },
                start,
            ));
        }
        if kind != PropertyKind::Init || is_async || generator {
            return Err(self.unexpected(Some("(")));
        }

        let (value, shorthand) = if self.eat(":") {
            (self.parse_assignment(false)?, false)
        } else if self.eat("=") {
            // shorthand with a default, only valid once converted to a pattern
            let right = self.parse_assignment(false)?;
            let key_start = self.node(key).range.start;
            (self.finish(NodeKind::AssignmentPattern { left: key, right }, key_start), true)
        } else {
            (key, true)
        };
        Ok(self.finish(
            NodeKind::Property {
                key,
                value,
                kind,
                shorthand,
                computed,
                method: false,
            },
            start,
        ))
    }

    /// Re-tag an expression used as an assignment target as the matching pattern
    pub(super) fn to_pattern(&mut self, id: NodeId) {
        let kind = self.node(id).kind.clone();
        match kind {
            NodeKind::ObjectExpression { properties } => {
                for property in &properties {
                    if let NodeKind::Property { value, .. } = self.node(*property).kind {
                        self.to_pattern(value);
                    }
                }
                self.node_mut(id).kind = NodeKind::ObjectPattern {
                    properties,
                    type_annotation: None,
                };
            }
            NodeKind::ArrayExpression { elements } => {
                for element in elements.iter().flatten() {
                    self.to_pattern(*element);
                }
                self.node_mut(id).kind = NodeKind::ArrayPattern {
                    elements,
                    type_annotation: None,
                };
            }
            NodeKind::AssignmentExpression { operator, left, right } if operator == "=" => {
                self.node_mut(id).kind = NodeKind::AssignmentPattern { left, right };
            }
            NodeKind::SpreadElement { argument } => {
                self.to_pattern(argument);
                self.node_mut(id).kind = NodeKind::RestElement {
                    argument,
                    type_annotation: None,
                };
            }
            _ => {}
        }
    }
}
