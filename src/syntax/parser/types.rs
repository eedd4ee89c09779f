use super::{PResult, Parser};
use crate::syntax::ast::{NodeId, NodeKind};
use crate::syntax::token::TokenKind;

/// Type names that map to keyword types rather than references
const KEYWORD_TYPES: &[&str] = &[
    "any", "unknown", "never", "number", "object", "string", "symbol", "bigint", "boolean", "undefined",
];

impl Parser<'_> {
    /// `: Type` annotation; the node's range starts at the colon
    pub(super) fn parse_optional_type_annotation(&mut self) -> PResult<Option<NodeId>> {
        if !self.at(":") {
            return Ok(None);
        }
        let start = self.start();
        self.bump()?;
        let type_annotation = self.parse_type()?;
        Ok(Some(self.finish(NodeKind::TSTypeAnnotation { type_annotation }, start)))
    }

    pub(super) fn parse_type(&mut self) -> PResult<NodeId> {
        if self.at("(")
            && let Some(function_type) = self.try_parse(|p| p.parse_function_type())
        {
            return Ok(function_type);
        }

        // a leading `|` is allowed before the first union member
        self.eat("|");
        let start = self.start();
        let first = self.parse_intersection_type()?;
        if !self.at("|") {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat("|") {
            types.push(self.parse_intersection_type()?);
        }
        Ok(self.finish(NodeKind::TSUnionType { types }, start))
    }

    fn parse_function_type(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let params = self.parse_parameters()?;
        self.expect("=>")?;
        let return_type = self.parse_type()?;
        Ok(self.finish(NodeKind::TSFunctionType { params, return_type }, start))
    }

    fn parse_intersection_type(&mut self) -> PResult<NodeId> {
        self.eat("&");
        let start = self.start();
        let first = self.parse_array_type()?;
        if !self.at("&") {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat("&") {
            types.push(self.parse_array_type()?);
        }
        Ok(self.finish(NodeKind::TSIntersectionType { types }, start))
    }

    fn parse_array_type(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let mut element_type = self.parse_primary_type()?;
        while self.at("[") && self.nth_is(1, "]") && !self.has_newline_before() {
            self.bump()?;
            self.bump()?;
            element_type = self.finish(NodeKind::TSArrayType { element_type }, start);
        }
        Ok(element_type)
    }

    fn parse_primary_type(&mut self) -> PResult<NodeId> {
        let token = self.peek().cloned().ok_or_else(|| self.unexpected(None))?;
        match token.kind {
            TokenKind::Punctuator => match token.value.as_str() {
                "{" => {
                    let start = self.start();
                    let members = self.parse_type_members()?;
                    Ok(self.finish(NodeKind::TSTypeLiteral { members }, start))
                }
                "[" => self.parse_tuple_type(),
                "(" => {
                    self.bump()?;
                    let inner = self.parse_type()?;
                    self.expect(")")?;
                    Ok(inner)
                }
                _ => Err(self.unexpected(None)),
            },
            TokenKind::String | TokenKind::Numeric | TokenKind::Boolean | TokenKind::Template => {
                self.bump()?;
                let literal = self.push_node(NodeKind::Literal { raw: token.value }, token.range.clone());
                Ok(self.push_node(NodeKind::TSLiteralType { literal }, token.range))
            }
            TokenKind::Null => {
                self.bump()?;
                Ok(self.push_node(NodeKind::TSKeywordType { name: token.value }, token.range))
            }
            TokenKind::Keyword => match token.value.as_str() {
                "void" | "this" => {
                    self.bump()?;
                    Ok(self.push_node(NodeKind::TSKeywordType { name: token.value }, token.range))
                }
                "typeof" => {
                    let start = self.start();
                    self.bump()?;
                    let expr_name = self.parse_entity_name()?;
                    Ok(self.finish(NodeKind::TSTypeQuery { expr_name }, start))
                }
                _ => Err(self.unexpected(None)),
            },
            TokenKind::Identifier if KEYWORD_TYPES.contains(&token.value.as_str()) && !self.nth_is(1, ".") => {
                self.bump()?;
                Ok(self.push_node(NodeKind::TSKeywordType { name: token.value }, token.range))
            }
            TokenKind::Identifier => {
                let start = self.start();
                let type_name = self.parse_entity_name()?;
                let type_arguments = if self.at("<") && !self.has_newline_before() {
                    Some(self.parse_type_arguments()?)
                } else {
                    None
                };
                Ok(self.finish(
                    NodeKind::TSTypeReference {
                        type_name,
                        type_arguments,
                    },
                    start,
                ))
            }
            _ => Err(self.unexpected(None)),
        }
    }

    fn parse_tuple_type(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("[")?;
        let mut element_types = Vec::new();
        while !self.at("]") {
            element_types.push(self.parse_type()?);
            if !self.at("]") {
                self.expect(",")?;
            }
        }
        self.expect("]")?;
        Ok(self.finish(NodeKind::TSTupleType { element_types }, start))
    }

    /// `A` or `A.B.C`
    fn parse_entity_name(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let mut name = self.parse_identifier()?;
        while self.at(".") {
            self.bump()?;
            let right = self.parse_identifier_name()?;
            name = self.finish(NodeKind::TSQualifiedName { left: name, right }, start);
        }
        Ok(name)
    }

    /// `<A, B>` in a type reference or call
    pub(super) fn parse_type_arguments(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("<")?;
        let mut params = Vec::new();
        loop {
            params.push(self.parse_type()?);
            if !self.eat(",") {
                break;
            }
        }
        self.expect_closing_angle()?;
        Ok(self.finish(NodeKind::TSTypeParameterInstantiation { params }, start))
    }

    /// `<T extends U = D, ...>` on a declaration
    pub(super) fn parse_type_parameters(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("<")?;
        let mut params = Vec::new();
        while !self.at(">") {
            let param_start = self.start();
            let name = self.parse_identifier()?;
            let constraint = if self.eat("extends") {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat("=") {
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(self.finish(
                NodeKind::TSTypeParameter {
                    name,
                    constraint,
                    default,
                },
                param_start,
            ));
            if !self.at(">") {
                self.expect(",")?;
            }
        }
        self.expect_closing_angle()?;
        Ok(self.finish(NodeKind::TSTypeParameterDeclaration { params }, start))
    }

    /// `Name<Args>` in an `extends` or `implements` clause
    pub(super) fn parse_heritage(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let expression = self.parse_entity_name()?;
        let type_arguments = if self.at("<") {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(self.finish(
            NodeKind::TSInterfaceHeritage {
                expression,
                type_arguments,
            },
            start,
        ))
    }

    /// `{ member; member, ... }` of an interface body or type literal
    pub(super) fn parse_type_members(&mut self) -> PResult<Vec<NodeId>> {
        self.expect("{")?;
        let mut members = Vec::new();
        while !self.at("}") {
            if self.is_eof() {
                return Err(self.unexpected(Some("}")));
            }
            members.push(self.parse_type_member()?);
        }
        self.expect("}")?;
        Ok(members)
    }

    fn parse_type_member(&mut self) -> PResult<NodeId> {
        let start = self.start();

        if self.at("[") && self.nth_kind(1) == Some(TokenKind::Identifier) && self.nth_is(2, ":") {
            self.bump()?;
            let parameter = self.parse_binding_target_typed()?;
            self.expect("]")?;
            let type_annotation = self.parse_optional_type_annotation()?;
            self.consume_member_delimiter()?;
            return Ok(self.finish(
                NodeKind::TSIndexSignature {
                    parameters: vec![parameter],
                    type_annotation,
                },
                start,
            ));
        }

        let readonly = self.at("readonly")
            && self
                .peek_nth(1)
                .is_some_and(|next| !matches!(next.value.as_str(), "?" | ":" | "(" | ";" | "," | "}"))
            && self.eat("readonly");
        let (key, computed) = self.parse_property_key()?;
        let optional = self.eat("?");

        if self.at("(") || self.at("<") {
            if self.at("<") {
                // method type parameters are not tracked
                self.parse_type_parameters()?;
            }
            let params = self.parse_parameters()?;
            let return_type = self.parse_optional_type_annotation()?;
            self.consume_member_delimiter()?;
            return Ok(self.finish(
                NodeKind::TSMethodSignature {
                    key,
                    params,
                    return_type,
                    optional,
                },
                start,
            ));
        }

        let type_annotation = self.parse_optional_type_annotation()?;
        self.consume_member_delimiter()?;
        Ok(self.finish(
            NodeKind::TSPropertySignature {
                key,
                type_annotation,
                computed,
                optional,
                readonly,
            },
            start,
        ))
    }

    /// A `;` or `,` ending a type member; absent before `}` or a line break
    fn consume_member_delimiter(&mut self) -> PResult<()> {
        if self.eat(";") || self.eat(",") || self.at("}") || self.has_newline_before() {
            return Ok(());
        }
        Err(self.unexpected(Some(";")))
    }
}
