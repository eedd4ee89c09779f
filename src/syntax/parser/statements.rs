use super::{PResult, Parser};
use crate::syntax::ast::{Class, Function, MethodKind, NodeId, NodeKind, PropertyKind, VariableKind};
use crate::syntax::token::TokenKind;

/// Modifiers that may precede a class member name
const CLASS_MODIFIERS: &[&str] = &[
    "static", "public", "private", "protected", "readonly", "abstract", "declare", "override", "accessor",
];

/// Tokens after which a would-be modifier is really the member name
const MEMBER_NAME_FOLLOWERS: &[&str] = &["(", "=", ";", ":", "}", "?", "!", "<"];

impl Parser<'_> {
    pub(super) fn parse_statement(&mut self) -> PResult<NodeId> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected(None));
        };
        let kind = token.kind;
        let value = token.value.clone();

        match (kind, value.as_str()) {
            (TokenKind::Punctuator, "{") => self.parse_block(),
            (TokenKind::Punctuator, ";") => {
                let start = self.start();
                self.bump()?;
                Ok(self.finish(NodeKind::EmptyStatement, start))
            }
            (TokenKind::Keyword, "const") if self.nth_is(1, "enum") => self.parse_enum(),
            (TokenKind::Keyword, "var" | "let" | "const") => self.parse_variable_declaration(false, true),
            (TokenKind::Keyword, "function") => self.parse_function(false, true),
            (TokenKind::Identifier, "async") if self.nth_is(1, "function") => self.parse_function(false, true),
            (TokenKind::Keyword, "class") => self.parse_class(true),
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "for") => self.parse_for(),
            (TokenKind::Keyword, "while") => self.parse_while(),
            (TokenKind::Keyword, "do") => self.parse_do_while(),
            (TokenKind::Keyword, "switch") => self.parse_switch(),
            (TokenKind::Keyword, "try") => self.parse_try(),
            (TokenKind::Keyword, "throw") => {
                let start = self.start();
                self.bump()?;
                let argument = self.parse_expression(false)?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::ThrowStatement { argument }, start))
            }
            (TokenKind::Keyword, "return") => self.parse_return(),
            (TokenKind::Keyword, "break" | "continue") => self.parse_break_continue(value == "break"),
            (TokenKind::Keyword, "debugger") => {
                let start = self.start();
                self.bump()?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::DebuggerStatement, start))
            }
            (TokenKind::Keyword, "import") if !self.nth_is(1, "(") && !self.nth_is(1, ".") => self.parse_import(),
            (TokenKind::Keyword, "export") => self.parse_export(),
            (TokenKind::Keyword, "enum") => self.parse_enum(),
            (TokenKind::Identifier, "interface") if self.nth_kind(1) == Some(TokenKind::Identifier) => {
                self.parse_interface()
            }
            (TokenKind::Identifier, "type")
                if self.nth_kind(1) == Some(TokenKind::Identifier) && (self.nth_is(2, "=") || self.nth_is(2, "<")) =>
            {
                self.parse_type_alias()
            }
            (TokenKind::Identifier, _) if self.nth_is(1, ":") => {
                let start = self.start();
                let label = self.parse_identifier()?;
                self.expect(":")?;
                let body = self.parse_statement()?;
                Ok(self.finish(NodeKind::LabeledStatement { label, body }, start))
            }
            _ => {
                let start = self.start();
                let expression = self.parse_expression(false)?;
                self.consume_semicolon()?;
                Ok(self.finish(NodeKind::ExpressionStatement { expression }, start))
            }
        }
    }

    pub(super) fn parse_block(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("{")?;
        let mut body = Vec::new();
        while !self.at("}") {
            if self.is_eof() {
                return Err(self.unexpected(Some("}")));
            }
            body.push(self.parse_statement()?);
        }
        self.expect("}")?;
        Ok(self.finish(NodeKind::BlockStatement { body }, start))
    }

    /// `var`/`let`/`const` declaration. `no_in` is set in `for` heads, where the
    /// declaration also carries no semicolon.
    pub(super) fn parse_variable_declaration(&mut self, no_in: bool, statement: bool) -> PResult<NodeId> {
        let start = self.start();
        let keyword = self.bump()?;
        let kind = match keyword.value.as_str() {
            "var" => VariableKind::Var,
            "let" => VariableKind::Let,
            _ => VariableKind::Const,
        };

        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.start();
            let id = self.parse_binding_target_typed()?;
            let init = if self.eat("=") {
                Some(self.parse_assignment(no_in)?)
            } else {
                None
            };
            declarations.push(self.finish(NodeKind::VariableDeclarator { id, init }, declarator_start));
            if !self.eat(",") {
                break;
            }
        }

        if statement {
            self.consume_semicolon()?;
        }
        Ok(self.finish(NodeKind::VariableDeclaration { kind, declarations }, start))
    }

    /// Function declaration or expression starting at `function` or `async function`
    pub(super) fn parse_function(&mut self, expression: bool, require_id: bool) -> PResult<NodeId> {
        let start = self.start();
        let is_async = self.eat("async");
        self.expect("function")?;
        let generator = self.eat("*");
        let id = if self.at_kind(TokenKind::Identifier) {
            Some(self.parse_identifier()?)
        } else if require_id && !expression {
            return Err(self.unexpected(None));
        } else {
            None
        };
        let function = self.parse_function_signature_and_body(id, is_async, generator)?;
        let kind = if expression {
            NodeKind::FunctionExpression(function)
        } else {
            NodeKind::FunctionDeclaration(function)
        };
        Ok(self.finish(kind, start))
    }

    fn parse_function_signature_and_body(
        &mut self,
        id: Option<NodeId>,
        is_async: bool,
        generator: bool,
    ) -> PResult<Function> {
        let type_parameters = if self.at("<") {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let params = self.parse_parameters()?;
        let return_type = self.parse_optional_type_annotation()?;
        let body = self.parse_block()?;
        Ok(Function {
            id,
            type_parameters,
            params,
            return_type,
            body,
            is_async,
            generator,
        })
    }

    /// The anonymous function value of a method, starting at its parameter list
    pub(super) fn parse_method_value(&mut self, is_async: bool, generator: bool) -> PResult<NodeId> {
        let start = self.start();
        let function = self.parse_function_signature_and_body(None, is_async, generator)?;
        Ok(self.finish(NodeKind::FunctionExpression(function), start))
    }

    pub(super) fn parse_parameters(&mut self) -> PResult<Vec<NodeId>> {
        self.expect("(")?;
        let mut params = Vec::new();
        while !self.at(")") {
            while self.at_any(&["public", "private", "protected", "readonly", "override"])
                && matches!(self.nth_kind(1), Some(TokenKind::Identifier))
            {
                self.bump()?;
            }
            if self.at("...") {
                params.push(self.parse_rest_element()?);
            } else {
                params.push(self.parse_binding_element()?);
            }
            if !self.at(")") {
                self.expect(",")?;
            }
        }
        self.expect(")")?;
        Ok(params)
    }

    fn parse_rest_element(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("...")?;
        let argument = self.parse_binding_target()?;
        let type_annotation = self.parse_optional_type_annotation()?;
        Ok(self.finish(
            NodeKind::RestElement {
                argument,
                type_annotation,
            },
            start,
        ))
    }

    /// Binding target with an optional default value
    pub(super) fn parse_binding_element(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let target = self.parse_binding_target_typed()?;
        if self.eat("=") {
            let right = self.parse_assignment(false)?;
            return Ok(self.finish(NodeKind::AssignmentPattern { left: target, right }, start));
        }
        Ok(target)
    }

    /// Binding target followed by an optional `?`, `!`, and type annotation. The
    /// annotation is part of the target's range.
    pub(super) fn parse_binding_target_typed(&mut self) -> PResult<NodeId> {
        let target = self.parse_binding_target()?;
        let optional = self.eat("?");
        self.eat("!");
        let annotation = self.parse_optional_type_annotation()?;
        if optional || annotation.is_some() {
            match &mut self.node_mut(target).kind {
                NodeKind::Identifier {
                    optional: opt,
                    type_annotation,
                    ..
                } => {
                    *opt = optional;
                    *type_annotation = annotation;
                }
                NodeKind::ArrayPattern { type_annotation, .. } | NodeKind::ObjectPattern { type_annotation, .. } => {
                    *type_annotation = annotation;
                }
                _ => {}
            }
            self.extend_to_last(target);
        }
        Ok(target)
    }

    pub(super) fn parse_binding_target(&mut self) -> PResult<NodeId> {
        if self.at("[") {
            return self.parse_array_pattern();
        }
        if self.at("{") {
            return self.parse_object_pattern();
        }
        self.parse_identifier()
    }

    fn parse_array_pattern(&mut self) -> PResult<NodeId> {
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
            let element = if self.at("...") {
                self.parse_rest_element()?
            } else {
                self.parse_binding_element()?
            };
            elements.push(Some(element));
            if !self.at("]") {
                self.expect(",")?;
            }
        }
        self.expect("]")?;
        Ok(self.finish(
            NodeKind::ArrayPattern {
                elements,
                type_annotation: None,
            },
            start,
        ))
    }

    fn parse_object_pattern(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("{")?;
        let mut properties = Vec::new();
        while !self.at("}") {
            let property_start = self.start();
            if self.at("...") {
                properties.push(self.parse_rest_element()?);
            } else {
                let (key, computed) = self.parse_property_key()?;
                let (value, shorthand) = if self.eat(":") {
                    (self.parse_binding_element()?, false)
                } else if self.eat("=") {
                    let right = self.parse_assignment(false)?;
                    let key_start = self.node(key).range.start;
                    (self.finish(NodeKind::AssignmentPattern { left: key, right }, key_start), true)
                } else {
                    (key, true)
                };
                properties.push(self.finish(
                    NodeKind::Property {
                        key,
                        value,
                        kind: PropertyKind::Init,
                        shorthand,
                        computed,
                        method: false,
                    },
                    property_start,
                ));
            }
            if !self.at("}") {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(self.finish(
            NodeKind::ObjectPattern {
                properties,
                type_annotation: None,
            },
            start,
        ))
    }

    fn parse_if(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("if")?;
        self.expect("(")?;
        let test = self.parse_expression(false)?;
        self.expect(")")?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(self.finish(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_for(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("for")?;
        self.eat("await");
        self.expect("(")?;

        let init = if self.at(";") {
            None
        } else if self.at_any(&["var", "let", "const"]) {
            Some(self.parse_variable_declaration(true, false)?)
        } else {
            Some(self.parse_expression(true)?)
        };

        if let Some(left) = init {
            let is_of = self.at("of");
            if is_of || self.at("in") {
                self.bump()?;
                self.to_pattern(left);
                let right = if is_of {
                    self.parse_assignment(false)?
                } else {
                    self.parse_expression(false)?
                };
                self.expect(")")?;
                let body = self.parse_statement()?;
                let kind = if is_of {
                    NodeKind::ForOfStatement { left, right, body }
                } else {
                    NodeKind::ForInStatement { left, right, body }
                };
                return Ok(self.finish(kind, start));
            }
        }

        self.expect(";")?;
        let test = if self.at(";") {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(";")?;
        let update = if self.at(")") {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(self.finish(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            start,
        ))
    }

    fn parse_while(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("while")?;
        self.expect("(")?;
        let test = self.parse_expression(false)?;
        self.expect(")")?;
        let body = self.parse_statement()?;
        Ok(self.finish(NodeKind::WhileStatement { test, body }, start))
    }

    fn parse_do_while(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("do")?;
        let body = self.parse_statement()?;
        self.expect("while")?;
        self.expect("(")?;
        let test = self.parse_expression(false)?;
        self.expect(")")?;
        self.eat(";");
        Ok(self.finish(NodeKind::DoWhileStatement { body, test }, start))
    }

    fn parse_switch(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("switch")?;
        self.expect("(")?;
        let discriminant = self.parse_expression(false)?;
        self.expect(")")?;
        self.expect("{")?;
        let mut cases = Vec::new();
        while !self.at("}") {
            let case_start = self.start();
            let test = if self.eat("case") {
                Some(self.parse_expression(false)?)
            } else {
                self.expect("default")?;
                None
            };
            self.expect(":")?;
            let mut consequent = Vec::new();
            while !self.at_any(&["case", "default", "}"]) {
                if self.is_eof() {
                    return Err(self.unexpected(Some("}")));
                }
                consequent.push(self.parse_statement()?);
            }
            cases.push(self.finish(NodeKind::SwitchCase { test, consequent }, case_start));
        }
        self.expect("}")?;
        Ok(self.finish(NodeKind::SwitchStatement { discriminant, cases }, start))
    }

    fn parse_try(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("try")?;
        let block = self.parse_block()?;
        let handler = if self.at("catch") {
            let handler_start = self.start();
            self.bump()?;
            let param = if self.eat("(") {
                let param = self.parse_binding_target_typed()?;
                self.expect(")")?;
                Some(param)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(self.finish(NodeKind::CatchClause { param, body }, handler_start))
        } else {
            None
        };
        let finalizer = if self.eat("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected(Some("catch")));
        }
        Ok(self.finish(
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
            start,
        ))
    }

    fn parse_return(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("return")?;
        let argument = if self.at(";") || self.at("}") || self.is_eof() || self.has_newline_before() {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.consume_semicolon()?;
        Ok(self.finish(NodeKind::ReturnStatement { argument }, start))
    }

    fn parse_break_continue(&mut self, is_break: bool) -> PResult<NodeId> {
        let start = self.start();
        self.bump()?;
        let label = if self.at_kind(TokenKind::Identifier) && !self.has_newline_before() {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let kind = if is_break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.finish(kind, start))
    }

    pub(super) fn parse_class(&mut self, declaration: bool) -> PResult<NodeId> {
        let start = self.start();
        self.expect("class")?;
        let id = if self.at_kind(TokenKind::Identifier) && !self.at("extends") && !self.at("implements") {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let type_parameters = if self.at("<") {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let super_class = if self.eat("extends") {
            let super_class = self.parse_left_hand_side()?;
            if self.at("<") {
                // type arguments of the base class are not tracked
                self.parse_type_arguments()?;
            }
            Some(super_class)
        } else {
            None
        };
        let mut implements = Vec::new();
        if self.eat("implements") {
            loop {
                implements.push(self.parse_heritage()?);
                if !self.eat(",") {
                    break;
                }
            }
        }
        let body = self.parse_class_body()?;
        let class = Class {
            id,
            type_parameters,
            super_class,
            implements,
            body,
        };
        let kind = if declaration {
            NodeKind::ClassDeclaration(class)
        } else {
            NodeKind::ClassExpression(class)
        };
        Ok(self.finish(kind, start))
    }

    fn parse_class_body(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("{")?;
        let mut body = Vec::new();
        while !self.at("}") {
            if self.is_eof() {
                return Err(self.unexpected(Some("}")));
            }
            // stray semicolons between members produce no node
            if self.eat(";") {
                continue;
            }
            body.push(self.parse_class_member()?);
        }
        self.expect("}")?;
        Ok(self.finish(NodeKind::ClassBody { body }, start))
    }

    /// Whether the current token is a modifier rather than a member name
    fn at_member_modifier(&self, modifiers: &[&str]) -> bool {
        let (Some(current), Some(next)) = (self.peek(), self.peek_nth(1)) else {
            return false;
        };
        current.kind == TokenKind::Identifier
            && modifiers.contains(&current.value.as_str())
            && !MEMBER_NAME_FOLLOWERS.contains(&next.value.as_str())
            && current.loc.end.line == next.loc.start.line
    }

    fn parse_class_member(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let mut is_static = false;
        while self.at_member_modifier(CLASS_MODIFIERS) {
            if self.bump()?.value == "static" {
                is_static = true;
            }
        }

        let is_async = self.at_member_modifier(&["async"]) && self.eat("async");
        let generator = self.eat("*");
        let mut kind = MethodKind::Method;
        if self.at_member_modifier(&["get", "set"]) {
            kind = if self.bump()?.value == "get" {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
        }

        let (key, computed) = self.parse_property_key()?;
        if !self.eat("?") {
            self.eat("!");
        }

        if self.at("(") || self.at("<") {
            let value = self.parse_method_value(is_async, generator)?;
            if matches!(&self.node(key).kind, NodeKind::Identifier { name, .. } if name == "constructor") {
                kind = MethodKind::Constructor;
            }
            return Ok(self.finish(
                NodeKind::MethodDefinition {
                    key,
                    value,
                    kind,
                    computed,
                    is_static,
                },
                start,
            ));
        }

        let type_annotation = self.parse_optional_type_annotation()?;
        let value = if self.eat("=") {
            Some(self.parse_assignment(false)?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(self.finish(
            NodeKind::PropertyDefinition {
                key,
                value,
                type_annotation,
                computed,
                is_static,
            },
            start,
        ))
    }

    fn parse_module_source(&mut self) -> PResult<NodeId> {
        if !self.at_kind(TokenKind::String) {
            return Err(self.unexpected(None));
        }
        let token = self.bump()?;
        Ok(self.push_node(NodeKind::Literal { raw: token.value }, token.range))
    }

    /// Name in an import/export specifier: identifier name or string
    fn parse_module_export_name(&mut self) -> PResult<NodeId> {
        if self.at_kind(TokenKind::String) {
            return self.parse_module_source();
        }
        self.parse_identifier_name()
    }

    fn parse_import(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("import")?;
        let mut specifiers = Vec::new();

        if self.at_kind(TokenKind::String) {
            let source = self.parse_module_source()?;
            self.consume_semicolon()?;
            return Ok(self.finish(NodeKind::ImportDeclaration { specifiers, source }, start));
        }

        if self.at("type")
            && (self.nth_is(1, "{")
                || self.nth_is(1, "*")
                || (self.nth_kind(1) == Some(TokenKind::Identifier) && !self.nth_is(1, "from")))
        {
            self.bump()?;
        }

        if self.at_kind(TokenKind::Identifier) {
            let specifier_start = self.start();
            let local = self.parse_identifier()?;
            specifiers.push(self.finish(NodeKind::ImportDefaultSpecifier { local }, specifier_start));
            self.eat(",");
        }

        if self.at("*") {
            let specifier_start = self.start();
            self.bump()?;
            self.expect("as")?;
            let local = self.parse_identifier()?;
            specifiers.push(self.finish(NodeKind::ImportNamespaceSpecifier { local }, specifier_start));
        } else if self.eat("{") {
            while !self.at("}") {
                if self.at("type") && !self.nth_is(1, ",") && !self.nth_is(1, "}") && !self.nth_is(1, "as") {
                    self.bump()?;
                }
                let specifier_start = self.start();
                let imported = self.parse_module_export_name()?;
                let local = if self.eat("as") {
                    self.parse_identifier()?
                } else {
                    imported
                };
                specifiers.push(self.finish(NodeKind::ImportSpecifier { imported, local }, specifier_start));
                if !self.at("}") {
                    self.expect(",")?;
                }
            }
            self.expect("}")?;
        }

        self.expect("from")?;
        let source = self.parse_module_source()?;
        self.consume_semicolon()?;
        Ok(self.finish(NodeKind::ImportDeclaration { specifiers, source }, start))
    }

    fn parse_export(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("export")?;

        if self.eat("default") {
            let declaration = if self.at("function") || (self.at("async") && self.nth_is(1, "function")) {
                self.parse_function(false, false)?
            } else if self.at("class") {
                self.parse_class(true)?
            } else {
                let expression = self.parse_assignment(false)?;
                self.consume_semicolon()?;
                expression
            };
            return Ok(self.finish(NodeKind::ExportDefaultDeclaration { declaration }, start));
        }

        if self.eat("*") {
            let exported = if self.eat("as") {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect("from")?;
            let source = self.parse_module_source()?;
            self.consume_semicolon()?;
            return Ok(self.finish(NodeKind::ExportAllDeclaration { exported, source }, start));
        }

        if self.at("type") && self.nth_is(1, "{") {
            self.bump()?;
        }

        if self.eat("{") {
            let mut specifiers = Vec::new();
            while !self.at("}") {
                let specifier_start = self.start();
                let local = self.parse_module_export_name()?;
                let exported = if self.eat("as") {
                    self.parse_module_export_name()?
                } else {
                    local
                };
                specifiers.push(self.finish(NodeKind::ExportSpecifier { local, exported }, specifier_start));
                if !self.at("}") {
                    self.expect(",")?;
                }
            }
            self.expect("}")?;
            let source = if self.eat("from") {
                Some(self.parse_module_source()?)
            } else {
                None
            };
            self.consume_semicolon()?;
            return Ok(self.finish(
                NodeKind::ExportNamedDeclaration {
                    declaration: None,
                    specifiers,
                    source,
                },
                start,
            ));
        }

        let declaration = self.parse_statement()?;
        Ok(self.finish(
            NodeKind::ExportNamedDeclaration {
                declaration: Some(declaration),
                specifiers: Vec::new(),
                source: None,
            },
            start,
        ))
    }

    fn parse_interface(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("interface")?;
        let id = self.parse_identifier()?;
        let type_parameters = if self.at("<") {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        let mut extends = Vec::new();
        if self.eat("extends") {
            loop {
                extends.push(self.parse_heritage()?);
                if !self.eat(",") {
                    break;
                }
            }
        }
        let body_start = self.start();
        let members = self.parse_type_members()?;
        let body = self.finish(NodeKind::TSInterfaceBody { body: members }, body_start);
        Ok(self.finish(
            NodeKind::TSInterfaceDeclaration {
                id,
                type_parameters,
                extends,
                body,
            },
            start,
        ))
    }

    fn parse_type_alias(&mut self) -> PResult<NodeId> {
        let start = self.start();
        self.expect("type")?;
        let id = self.parse_identifier()?;
        let type_parameters = if self.at("<") {
            Some(self.parse_type_parameters()?)
        } else {
            None
        };
        self.expect("=")?;
        let type_annotation = self.parse_type()?;
        self.consume_semicolon()?;
        Ok(self.finish(
            NodeKind::TSTypeAliasDeclaration {
                id,
                type_parameters,
                type_annotation,
            },
            start,
        ))
    }

    fn parse_enum(&mut self) -> PResult<NodeId> {
        let start = self.start();
        let is_const = self.eat("const");
        self.expect("enum")?;
        let id = self.parse_identifier()?;
        self.expect("{")?;
        let mut members = Vec::new();
        while !self.at("}") {
            let member_start = self.start();
            let member_id = self.parse_module_export_name()?;
            let initializer = if self.eat("=") {
                Some(self.parse_assignment(false)?)
            } else {
                None
            };
            members.push(self.finish(
                NodeKind::TSEnumMember {
                    id: member_id,
                    initializer,
                },
                member_start,
            ));
            if !self.at("}") {
                self.expect(",")?;
            }
        }
        self.expect("}")?;
        Ok(self.finish(NodeKind::TSEnumDeclaration { id, members, is_const }, start))
    }
}
