//! Arena-allocated syntax tree
//!
//! Nodes live in a flat arena and refer to each other through [`NodeId`]s. The
//! `parent` field is a plain back-reference filled in once after parsing; nodes are
//! never mutated afterwards. Rules dispatch with an exhaustive `match` over
//! [`NodeKind`] rather than by node-type strings.

use crate::syntax::location::{SourceLocation, Spanned};
use std::ops::{Index, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

/// Shared shape of function declarations and function expressions
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<NodeId>,
    pub type_parameters: Option<NodeId>,
    pub params: Vec<NodeId>,
    pub return_type: Option<NodeId>,
    pub body: NodeId,
    pub is_async: bool,
    pub generator: bool,
}

/// Shared shape of class declarations and class expressions
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<NodeId>,
    pub type_parameters: Option<NodeId>,
    pub super_class: Option<NodeId>,
    pub implements: Vec<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program { body: Vec<NodeId> },

    // Statements
    BlockStatement { body: Vec<NodeId> },
    EmptyStatement,
    DebuggerStatement,
    ExpressionStatement { expression: NodeId },
    VariableDeclaration { kind: VariableKind, declarations: Vec<NodeId> },
    VariableDeclarator { id: NodeId, init: Option<NodeId> },
    FunctionDeclaration(Function),
    ReturnStatement { argument: Option<NodeId> },
    IfStatement { test: NodeId, consequent: NodeId, alternate: Option<NodeId> },
    ForStatement { init: Option<NodeId>, test: Option<NodeId>, update: Option<NodeId>, body: NodeId },
    ForInStatement { left: NodeId, right: NodeId, body: NodeId },
    ForOfStatement { left: NodeId, right: NodeId, body: NodeId },
    WhileStatement { test: NodeId, body: NodeId },
    DoWhileStatement { body: NodeId, test: NodeId },
    SwitchStatement { discriminant: NodeId, cases: Vec<NodeId> },
    SwitchCase { test: Option<NodeId>, consequent: Vec<NodeId> },
    TryStatement { block: NodeId, handler: Option<NodeId>, finalizer: Option<NodeId> },
    CatchClause { param: Option<NodeId>, body: NodeId },
    ThrowStatement { argument: NodeId },
    BreakStatement { label: Option<NodeId> },
    ContinueStatement { label: Option<NodeId> },
    LabeledStatement { label: NodeId, body: NodeId },

    // Classes
    ClassDeclaration(Class),
    ClassExpression(Class),
    ClassBody { body: Vec<NodeId> },
    MethodDefinition { key: NodeId, value: NodeId, kind: MethodKind, computed: bool, is_static: bool },
    PropertyDefinition {
        key: NodeId,
        value: Option<NodeId>,
        type_annotation: Option<NodeId>,
        computed: bool,
        is_static: bool,
    },

    // Modules
    ImportDeclaration { specifiers: Vec<NodeId>, source: NodeId },
    ImportSpecifier { imported: NodeId, local: NodeId },
    ImportDefaultSpecifier { local: NodeId },
    ImportNamespaceSpecifier { local: NodeId },
    ExportNamedDeclaration { declaration: Option<NodeId>, specifiers: Vec<NodeId>, source: Option<NodeId> },
    ExportSpecifier { local: NodeId, exported: NodeId },
    ExportDefaultDeclaration { declaration: NodeId },
    ExportAllDeclaration { exported: Option<NodeId>, source: NodeId },

    // Expressions
    Identifier { name: String, optional: bool, type_annotation: Option<NodeId> },
    Literal { raw: String },
    TemplateLiteral { raw: String },
    TaggedTemplateExpression { tag: NodeId, quasi: NodeId },
    ThisExpression,
    Super,
    ArrayExpression { elements: Vec<Option<NodeId>> },
    ObjectExpression { properties: Vec<NodeId> },
    Property { key: NodeId, value: NodeId, kind: PropertyKind, shorthand: bool, computed: bool, method: bool },
    SpreadElement { argument: NodeId },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<NodeId>,
        return_type: Option<NodeId>,
        body: NodeId,
        expression: bool,
        is_async: bool,
    },
    CallExpression { callee: NodeId, arguments: Vec<NodeId>, optional: bool },
    NewExpression { callee: NodeId, arguments: Vec<NodeId> },
    MemberExpression { object: NodeId, property: NodeId, computed: bool, optional: bool },
    UnaryExpression { operator: String, argument: NodeId },
    UpdateExpression { operator: String, prefix: bool, argument: NodeId },
    AwaitExpression { argument: NodeId },
    YieldExpression { argument: Option<NodeId>, delegate: bool },
    BinaryExpression { operator: String, left: NodeId, right: NodeId },
    LogicalExpression { operator: String, left: NodeId, right: NodeId },
    AssignmentExpression { operator: String, left: NodeId, right: NodeId },
    ConditionalExpression { test: NodeId, consequent: NodeId, alternate: NodeId },
    SequenceExpression { expressions: Vec<NodeId> },

    // Patterns
    ArrayPattern { elements: Vec<Option<NodeId>>, type_annotation: Option<NodeId> },
    ObjectPattern { properties: Vec<NodeId>, type_annotation: Option<NodeId> },
    AssignmentPattern { left: NodeId, right: NodeId },
    RestElement { argument: NodeId, type_annotation: Option<NodeId> },

    // TypeScript
    TSAsExpression { expression: NodeId, type_annotation: NodeId },
    TSNonNullExpression { expression: NodeId },
    TSTypeAnnotation { type_annotation: NodeId },
    TSInterfaceDeclaration { id: NodeId, type_parameters: Option<NodeId>, extends: Vec<NodeId>, body: NodeId },
    TSInterfaceHeritage { expression: NodeId, type_arguments: Option<NodeId> },
    TSInterfaceBody { body: Vec<NodeId> },
    TSPropertySignature {
        key: NodeId,
        type_annotation: Option<NodeId>,
        computed: bool,
        optional: bool,
        readonly: bool,
    },
    TSMethodSignature { key: NodeId, params: Vec<NodeId>, return_type: Option<NodeId>, optional: bool },
    TSIndexSignature { parameters: Vec<NodeId>, type_annotation: Option<NodeId> },
    TSTypeAliasDeclaration { id: NodeId, type_parameters: Option<NodeId>, type_annotation: NodeId },
    TSTypeLiteral { members: Vec<NodeId> },
    TSTypeReference { type_name: NodeId, type_arguments: Option<NodeId> },
    TSQualifiedName { left: NodeId, right: NodeId },
    TSTypeParameterInstantiation { params: Vec<NodeId> },
    TSTypeParameterDeclaration { params: Vec<NodeId> },
    TSTypeParameter { name: NodeId, constraint: Option<NodeId>, default: Option<NodeId> },
    TSKeywordType { name: String },
    TSTypeQuery { expr_name: NodeId },
    TSArrayType { element_type: NodeId },
    TSUnionType { types: Vec<NodeId> },
    TSIntersectionType { types: Vec<NodeId> },
    TSTupleType { element_types: Vec<NodeId> },
    TSLiteralType { literal: NodeId },
    TSFunctionType { params: Vec<NodeId>, return_type: NodeId },
    TSEnumDeclaration { id: NodeId, members: Vec<NodeId>, is_const: bool },
    TSEnumMember { id: NodeId, initializer: Option<NodeId> },
}

impl NodeKind {
    /// ESTree `type` name of this node
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::ForInStatement { .. } => "ForInStatement",
            NodeKind::ForOfStatement { .. } => "ForOfStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
            NodeKind::SwitchStatement { .. } => "SwitchStatement",
            NodeKind::SwitchCase { .. } => "SwitchCase",
            NodeKind::TryStatement { .. } => "TryStatement",
            NodeKind::CatchClause { .. } => "CatchClause",
            NodeKind::ThrowStatement { .. } => "ThrowStatement",
            NodeKind::BreakStatement { .. } => "BreakStatement",
            NodeKind::ContinueStatement { .. } => "ContinueStatement",
            NodeKind::LabeledStatement { .. } => "LabeledStatement",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::ClassBody { .. } => "ClassBody",
            NodeKind::MethodDefinition { .. } => "MethodDefinition",
            NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
            NodeKind::ImportDeclaration { .. } => "ImportDeclaration",
            NodeKind::ImportSpecifier { .. } => "ImportSpecifier",
            NodeKind::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            NodeKind::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            NodeKind::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeKind::ExportSpecifier { .. } => "ExportSpecifier",
            NodeKind::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeKind::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            NodeKind::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::SpreadElement { .. } => "SpreadElement",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::NewExpression { .. } => "NewExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::UpdateExpression { .. } => "UpdateExpression",
            NodeKind::AwaitExpression { .. } => "AwaitExpression",
            NodeKind::YieldExpression { .. } => "YieldExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::SequenceExpression { .. } => "SequenceExpression",
            NodeKind::ArrayPattern { .. } => "ArrayPattern",
            NodeKind::ObjectPattern { .. } => "ObjectPattern",
            NodeKind::AssignmentPattern { .. } => "AssignmentPattern",
            NodeKind::RestElement { .. } => "RestElement",
            NodeKind::TSAsExpression { .. } => "TSAsExpression",
            NodeKind::TSNonNullExpression { .. } => "TSNonNullExpression",
            NodeKind::TSTypeAnnotation { .. } => "TSTypeAnnotation",
            NodeKind::TSInterfaceDeclaration { .. } => "TSInterfaceDeclaration",
            NodeKind::TSInterfaceHeritage { .. } => "TSInterfaceHeritage",
            NodeKind::TSInterfaceBody { .. } => "TSInterfaceBody",
            NodeKind::TSPropertySignature { .. } => "TSPropertySignature",
            NodeKind::TSMethodSignature { .. } => "TSMethodSignature",
            NodeKind::TSIndexSignature { .. } => "TSIndexSignature",
            NodeKind::TSTypeAliasDeclaration { .. } => "TSTypeAliasDeclaration",
            NodeKind::TSTypeLiteral { .. } => "TSTypeLiteral",
            NodeKind::TSTypeReference { .. } => "TSTypeReference",
            NodeKind::TSQualifiedName { .. } => "TSQualifiedName",
            NodeKind::TSTypeParameterInstantiation { .. } => "TSTypeParameterInstantiation",
            NodeKind::TSTypeParameterDeclaration { .. } => "TSTypeParameterDeclaration",
            NodeKind::TSTypeParameter { .. } => "TSTypeParameter",
            NodeKind::TSKeywordType { .. } => "TSKeywordType",
            NodeKind::TSTypeQuery { .. } => "TSTypeQuery",
            NodeKind::TSArrayType { .. } => "TSArrayType",
            NodeKind::TSUnionType { .. } => "TSUnionType",
            NodeKind::TSIntersectionType { .. } => "TSIntersectionType",
            NodeKind::TSTupleType { .. } => "TSTupleType",
            NodeKind::TSLiteralType { .. } => "TSLiteralType",
            NodeKind::TSFunctionType { .. } => "TSFunctionType",
            NodeKind::TSEnumDeclaration { .. } => "TSEnumDeclaration",
            NodeKind::TSEnumMember { .. } => "TSEnumMember",
        }
    }

    /// Whether this node owns a list of statements (`STATEMENT_LIST_PARENTS`)
    pub fn is_statement_list_parent(&self) -> bool {
        matches!(
            self,
            NodeKind::Program { .. } | NodeKind::BlockStatement { .. } | NodeKind::SwitchCase { .. }
        )
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut push = |id: &NodeId| out.push(*id);
        match self {
            NodeKind::Program { body }
            | NodeKind::BlockStatement { body }
            | NodeKind::ClassBody { body }
            | NodeKind::TSInterfaceBody { body } => body.iter().for_each(push),
            NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement
            | NodeKind::Literal { .. }
            | NodeKind::TemplateLiteral { .. }
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::TSKeywordType { .. } => {}
            NodeKind::ExpressionStatement { expression } => push(expression),
            NodeKind::VariableDeclaration { declarations, .. } => declarations.iter().for_each(push),
            NodeKind::VariableDeclarator { id, init } => {
                push(id);
                init.iter().for_each(push);
            }
            NodeKind::FunctionDeclaration(function) | NodeKind::FunctionExpression(function) => {
                function.id.iter().for_each(&mut push);
                function.type_parameters.iter().for_each(&mut push);
                function.params.iter().for_each(&mut push);
                function.return_type.iter().for_each(&mut push);
                push(&function.body);
            }
            NodeKind::ReturnStatement { argument } => argument.iter().for_each(push),
            NodeKind::IfStatement { test, consequent, alternate } => {
                push(test);
                push(consequent);
                alternate.iter().for_each(push);
            }
            NodeKind::ForStatement { init, test, update, body } => {
                init.iter().for_each(&mut push);
                test.iter().for_each(&mut push);
                update.iter().for_each(&mut push);
                push(body);
            }
            NodeKind::ForInStatement { left, right, body } | NodeKind::ForOfStatement { left, right, body } => {
                push(left);
                push(right);
                push(body);
            }
            NodeKind::WhileStatement { test, body } => {
                push(test);
                push(body);
            }
            NodeKind::DoWhileStatement { body, test } => {
                push(body);
                push(test);
            }
            NodeKind::SwitchStatement { discriminant, cases } => {
                push(discriminant);
                cases.iter().for_each(push);
            }
            NodeKind::SwitchCase { test, consequent } => {
                test.iter().for_each(&mut push);
                consequent.iter().for_each(push);
            }
            NodeKind::TryStatement { block, handler, finalizer } => {
                push(block);
                handler.iter().for_each(&mut push);
                finalizer.iter().for_each(push);
            }
            NodeKind::CatchClause { param, body } => {
                param.iter().for_each(&mut push);
                push(body);
            }
            NodeKind::ThrowStatement { argument }
            | NodeKind::SpreadElement { argument }
            | NodeKind::AwaitExpression { argument }
            | NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => push(argument),
            NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
                label.iter().for_each(push)
            }
            NodeKind::LabeledStatement { label, body } => {
                push(label);
                push(body);
            }
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => {
                class.id.iter().for_each(&mut push);
                class.type_parameters.iter().for_each(&mut push);
                class.super_class.iter().for_each(&mut push);
                class.implements.iter().for_each(&mut push);
                push(&class.body);
            }
            NodeKind::MethodDefinition { key, value, .. } => {
                push(key);
                push(value);
            }
            NodeKind::PropertyDefinition { key, value, type_annotation, .. } => {
                push(key);
                type_annotation.iter().for_each(&mut push);
                value.iter().for_each(push);
            }
            NodeKind::ImportDeclaration { specifiers, source } => {
                specifiers.iter().for_each(&mut push);
                push(source);
            }
            NodeKind::ImportSpecifier { imported, local } => {
                push(imported);
                if local != imported {
                    push(local);
                }
            }
            NodeKind::ImportDefaultSpecifier { local } | NodeKind::ImportNamespaceSpecifier { local } => push(local),
            NodeKind::ExportNamedDeclaration { declaration, specifiers, source } => {
                declaration.iter().for_each(&mut push);
                specifiers.iter().for_each(&mut push);
                source.iter().for_each(push);
            }
            NodeKind::ExportSpecifier { local, exported } => {
                push(local);
                if local != exported {
                    push(exported);
                }
            }
            NodeKind::ExportDefaultDeclaration { declaration } => push(declaration),
            NodeKind::ExportAllDeclaration { exported, source } => {
                exported.iter().for_each(&mut push);
                push(source);
            }
            NodeKind::Identifier { type_annotation, .. } => type_annotation.iter().for_each(push),
            NodeKind::TaggedTemplateExpression { tag, quasi } => {
                push(tag);
                push(quasi);
            }
            NodeKind::ArrayExpression { elements } => elements.iter().flatten().for_each(push),
            NodeKind::ArrayPattern { elements, type_annotation } => {
                elements.iter().flatten().for_each(&mut push);
                type_annotation.iter().for_each(push);
            }
            NodeKind::ObjectExpression { properties } => properties.iter().for_each(push),
            NodeKind::ObjectPattern { properties, type_annotation } => {
                properties.iter().for_each(&mut push);
                type_annotation.iter().for_each(push);
            }
            NodeKind::Property { key, value, shorthand, .. } => {
                if *shorthand {
                    // shorthand key and value may share a node, or the value wraps the key in a default
                    if key != value {
                        push(value);
                    } else {
                        push(key);
                    }
                } else {
                    push(key);
                    push(value);
                }
            }
            NodeKind::ArrowFunctionExpression { params, return_type, body, .. } => {
                params.iter().for_each(&mut push);
                return_type.iter().for_each(&mut push);
                push(body);
            }
            NodeKind::CallExpression { callee, arguments, .. } | NodeKind::NewExpression { callee, arguments } => {
                push(callee);
                arguments.iter().for_each(push);
            }
            NodeKind::MemberExpression { object, property, .. } => {
                push(object);
                push(property);
            }
            NodeKind::YieldExpression { argument, .. } => argument.iter().for_each(push),
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. }
            | NodeKind::AssignmentPattern { left, right } => {
                push(left);
                push(right);
            }
            NodeKind::ConditionalExpression { test, consequent, alternate } => {
                push(test);
                push(consequent);
                push(alternate);
            }
            NodeKind::SequenceExpression { expressions } => expressions.iter().for_each(push),
            NodeKind::RestElement { argument, type_annotation } => {
                push(argument);
                type_annotation.iter().for_each(push);
            }
            NodeKind::TSAsExpression { expression, type_annotation } => {
                push(expression);
                push(type_annotation);
            }
            NodeKind::TSNonNullExpression { expression } => push(expression),
            NodeKind::TSTypeAnnotation { type_annotation } => push(type_annotation),
            NodeKind::TSInterfaceDeclaration { id, type_parameters, extends, body } => {
                push(id);
                type_parameters.iter().for_each(&mut push);
                extends.iter().for_each(&mut push);
                push(body);
            }
            NodeKind::TSInterfaceHeritage { expression, type_arguments } => {
                push(expression);
                type_arguments.iter().for_each(push);
            }
            NodeKind::TSPropertySignature { key, type_annotation, .. } => {
                push(key);
                type_annotation.iter().for_each(push);
            }
            NodeKind::TSMethodSignature { key, params, return_type, .. } => {
                push(key);
                params.iter().for_each(&mut push);
                return_type.iter().for_each(push);
            }
            NodeKind::TSIndexSignature { parameters, type_annotation } => {
                parameters.iter().for_each(&mut push);
                type_annotation.iter().for_each(push);
            }
            NodeKind::TSTypeAliasDeclaration { id, type_parameters, type_annotation } => {
                push(id);
                type_parameters.iter().for_each(&mut push);
                push(type_annotation);
            }
            NodeKind::TSTypeLiteral { members } => members.iter().for_each(push),
            NodeKind::TSTypeReference { type_name, type_arguments } => {
                push(type_name);
                type_arguments.iter().for_each(push);
            }
            NodeKind::TSQualifiedName { left, right } => {
                push(left);
                push(right);
            }
            NodeKind::TSTypeParameterInstantiation { params } | NodeKind::TSTypeParameterDeclaration { params } => {
                params.iter().for_each(push)
            }
            NodeKind::TSTypeParameter { name, constraint, default } => {
                push(name);
                constraint.iter().for_each(&mut push);
                default.iter().for_each(push);
            }
            NodeKind::TSTypeQuery { expr_name } => push(expr_name),
            NodeKind::TSArrayType { element_type } => push(element_type),
            NodeKind::TSUnionType { types } | NodeKind::TSIntersectionType { types } => types.iter().for_each(push),
            NodeKind::TSTupleType { element_types } => element_types.iter().for_each(push),
            NodeKind::TSLiteralType { literal } => push(literal),
            NodeKind::TSFunctionType { params, return_type } => {
                params.iter().for_each(&mut push);
                push(return_type);
            }
            NodeKind::TSEnumDeclaration { id, members, .. } => {
                push(id);
                members.iter().for_each(push);
            }
            NodeKind::TSEnumMember { id, initializer } => {
                push(id);
                initializer.iter().for_each(push);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range<usize>,
    pub loc: SourceLocation,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

impl Spanned for Node {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Traversal event delivered by [`Ast::walk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitEvent {
    Enter(NodeId),
    Exit(NodeId),
}

#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Build the tree from an arena and fill in parent back-references.
    pub(crate) fn new(mut nodes: Vec<Node>, root: NodeId) -> Self {
        for index in 0..nodes.len() {
            for child in nodes[index].kind.children() {
                nodes[child.index()].parent = Some(NodeId(index as u32));
            }
        }
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn parent_node(&self, id: NodeId) -> Option<&Node> {
        self.parent(id).map(|parent| self.get(parent))
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).kind.children()
    }

    /// Depth-first traversal delivering enter and exit events
    pub fn walk(&self, mut visit: impl FnMut(VisitEvent)) {
        let mut stack = vec![(self.root, false)];
        while let Some((id, exiting)) = stack.pop() {
            if exiting {
                visit(VisitEvent::Exit(id));
                continue;
            }
            visit(VisitEvent::Enter(id));
            stack.push((id, true));
            for child in self.children(id).into_iter().rev() {
                stack.push((child, false));
            }
        }
    }

    /// All node ids in pre-order (visitation order)
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.walk(|event| {
            if let VisitEvent::Enter(id) = event {
                order.push(id);
            }
        });
        order
    }

    /// The innermost node whose range contains `offset`
    pub fn node_at_offset(&self, offset: usize) -> Option<NodeId> {
        let mut current = self.root;
        if !self.get(current).range.contains(&offset) {
            return None;
        }
        'descend: loop {
            for child in self.children(current) {
                if self.get(child).range.contains(&offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Nearest ancestor (excluding `id` itself) matching the predicate
    pub fn find_ancestor(&self, id: NodeId, mut predicate: impl FnMut(&Node) -> bool) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if predicate(self.get(ancestor)) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
