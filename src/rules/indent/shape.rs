//! Layout shapes for the indent rule.
//!
//! Several node kinds indent exactly like another: a type literal or an enum lays out
//! like an object, an interface body like a class body, a tuple like an array, an `as`
//! cast like a binary expression. [`project`] maps each node onto the shape whose
//! offsets it follows, and the rule only ever matches on [`Shape`].

use crate::syntax::ast::{Ast, VariableKind};
use crate::syntax::{NodeId, NodeKind};

/// Which option controls the indentation of a delimited list's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFamily {
    Array,
    Object,
    /// Type parameter and argument lists, always one level
    TypeParameters,
}

/// Which function option controls parameters and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFamily {
    Declaration,
    Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// `open elements close`, e.g. `{ a, b }`, `[1, 2]`, `<T, U>`
    ElementList {
        open: &'static str,
        close: &'static str,
        /// Node after which the opening delimiter is searched; the node's own first
        /// token otherwise
        open_after: Option<NodeId>,
        elements: Vec<Option<NodeId>>,
        family: ListFamily,
    },
    /// Braced statement or member list: blocks, class bodies, interface bodies
    Body { elements: Vec<NodeId> },
    /// `left op right` with the operator and its right operand left as written
    Operator { left: NodeId, right: NodeId, operator: String },
    Assignment { left: NodeId, right: NodeId, operator: String },
    Conditional { test: NodeId, consequent: NodeId, alternate: NodeId },
    /// `id = init`: variable declarators and type aliases
    Declarator { id: NodeId, init: Option<NodeId> },
    Declaration { kind: VariableKind, declarations: Vec<NodeId> },
    Call { callee: NodeId, arguments: Vec<NodeId>, is_new: bool },
    /// Parenthesised parameter list closed by the `)` before `close_before`, or by the
    /// node's last `)`
    Parameters {
        params: Vec<NodeId>,
        close_before: Option<NodeId>,
        family: FunctionFamily,
    },
    Arrow {
        params: Vec<NodeId>,
        close_before: NodeId,
        body: NodeId,
        is_async: bool,
    },
    /// `class A extends B`, `interface A extends B`
    Heritage { super_class: NodeId, body: NodeId },
    /// Statement bodies that may be written without braces
    Blockless { bodies: Vec<NodeId> },
    For {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    Switch { discriminant: NodeId, cases: Vec<NodeId> },
    SwitchCase { consequent: Vec<NodeId> },
    Import { named: Vec<NodeId> },
    ExportList { specifiers: Vec<NodeId>, has_source: bool },
    Member { object: NodeId, property: NodeId, computed: bool },
    Property { key: NodeId, value: NodeId },
    ClassField { key: NodeId, value: Option<NodeId>, computed: bool },
}

/// The layout shape of a node, if it has offsets beyond the generic ones every node gets
pub fn project(ast: &Ast, id: NodeId) -> Option<Shape> {
    let shape = match &ast[id].kind {
        NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements, .. } => Shape::ElementList {
            open: "[",
            close: "]",
            open_after: None,
            elements: elements.clone(),
            family: ListFamily::Array,
        },
        NodeKind::TSTupleType { element_types } => Shape::ElementList {
            open: "[",
            close: "]",
            open_after: None,
            elements: element_types.iter().copied().map(Some).collect(),
            family: ListFamily::Array,
        },
        NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties, .. } => {
            object_like(None, properties)
        }
        NodeKind::TSTypeLiteral { members } => object_like(None, members),
        NodeKind::TSEnumDeclaration { id: name, members, .. } => object_like(Some(*name), members),
        NodeKind::TSTypeParameterDeclaration { params } | NodeKind::TSTypeParameterInstantiation { params } => {
            Shape::ElementList {
                open: "<",
                close: ">",
                open_after: None,
                elements: params.iter().copied().map(Some).collect(),
                family: ListFamily::TypeParameters,
            }
        }
        NodeKind::BlockStatement { body } | NodeKind::ClassBody { body } | NodeKind::TSInterfaceBody { body } => {
            Shape::Body { elements: body.clone() }
        }
        NodeKind::BinaryExpression { operator, left, right } | NodeKind::LogicalExpression { operator, left, right } => {
            Shape::Operator {
                left: *left,
                right: *right,
                operator: operator.clone(),
            }
        }
        NodeKind::TSAsExpression {
            expression,
            type_annotation,
        } => Shape::Operator {
            left: *expression,
            right: *type_annotation,
            operator: "as".to_string(),
        },
        NodeKind::AssignmentExpression { operator, left, right } => Shape::Assignment {
            left: *left,
            right: *right,
            operator: operator.clone(),
        },
        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => Shape::Conditional {
            test: *test,
            consequent: *consequent,
            alternate: *alternate,
        },
        NodeKind::VariableDeclarator { id: name, init } => Shape::Declarator {
            id: *name,
            init: *init,
        },
        NodeKind::TSTypeAliasDeclaration {
            id: name,
            type_parameters,
            type_annotation,
        } => Shape::Declarator {
            id: type_parameters.unwrap_or(*name),
            init: Some(*type_annotation),
        },
        NodeKind::VariableDeclaration { kind, declarations } => Shape::Declaration {
            kind: *kind,
            declarations: declarations.clone(),
        },
        NodeKind::CallExpression { callee, arguments, .. } => Shape::Call {
            callee: *callee,
            arguments: arguments.clone(),
            is_new: false,
        },
        NodeKind::NewExpression { callee, arguments } => Shape::Call {
            callee: *callee,
            arguments: arguments.clone(),
            is_new: true,
        },
        NodeKind::FunctionDeclaration(function) => Shape::Parameters {
            params: function.params.clone(),
            close_before: Some(function.return_type.unwrap_or(function.body)),
            family: FunctionFamily::Declaration,
        },
        NodeKind::FunctionExpression(function) => Shape::Parameters {
            params: function.params.clone(),
            close_before: Some(function.return_type.unwrap_or(function.body)),
            family: FunctionFamily::Expression,
        },
        NodeKind::TSFunctionType { params, return_type } => Shape::Parameters {
            params: params.clone(),
            close_before: Some(*return_type),
            family: FunctionFamily::Expression,
        },
        NodeKind::TSMethodSignature { params, return_type, .. } => Shape::Parameters {
            params: params.clone(),
            close_before: *return_type,
            family: FunctionFamily::Expression,
        },
        NodeKind::ArrowFunctionExpression {
            params,
            return_type,
            body,
            is_async,
            ..
        } => Shape::Arrow {
            params: params.clone(),
            close_before: return_type.unwrap_or(*body),
            body: *body,
            is_async: *is_async,
        },
        NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => Shape::Heritage {
            super_class: class.super_class?,
            body: class.body,
        },
        NodeKind::TSInterfaceDeclaration { extends, body, .. } => Shape::Heritage {
            super_class: *extends.first()?,
            body: *body,
        },
        NodeKind::IfStatement {
            consequent, alternate, ..
        } => Shape::Blockless {
            bodies: std::iter::once(*consequent).chain(*alternate).collect(),
        },
        NodeKind::WhileStatement { body, .. }
        | NodeKind::DoWhileStatement { body, .. }
        | NodeKind::ForInStatement { body, .. }
        | NodeKind::ForOfStatement { body, .. } => Shape::Blockless { bodies: vec![*body] },
        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        } => Shape::For {
            init: *init,
            test: *test,
            update: *update,
            body: *body,
        },
        NodeKind::SwitchStatement { discriminant, cases } => Shape::Switch {
            discriminant: *discriminant,
            cases: cases.clone(),
        },
        NodeKind::SwitchCase { consequent, .. } => Shape::SwitchCase {
            consequent: consequent.clone(),
        },
        NodeKind::ImportDeclaration { specifiers, .. } => Shape::Import {
            named: specifiers
                .iter()
                .copied()
                .filter(|s| matches!(ast[*s].kind, NodeKind::ImportSpecifier { .. }))
                .collect(),
        },
        NodeKind::ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
        } => Shape::ExportList {
            specifiers: specifiers.clone(),
            has_source: source.is_some(),
        },
        NodeKind::MemberExpression {
            object,
            property,
            computed,
            ..
        } => Shape::Member {
            object: *object,
            property: *property,
            computed: *computed,
        },
        NodeKind::TSQualifiedName { left, right } => Shape::Member {
            object: *left,
            property: *right,
            computed: false,
        },
        NodeKind::Property {
            key,
            value,
            kind: crate::syntax::ast::PropertyKind::Init,
            shorthand: false,
            method: false,
            ..
        } => Shape::Property {
            key: *key,
            value: *value,
        },
        NodeKind::PropertyDefinition {
            key, value, computed, ..
        } => Shape::ClassField {
            key: *key,
            value: *value,
            computed: *computed,
        },
        _ => return None,
    };
    Some(shape)
}

fn object_like(open_after: Option<NodeId>, members: &[NodeId]) -> Shape {
    Shape::ElementList {
        open: "{",
        close: "}",
        open_after,
        elements: members.iter().copied().map(Some).collect(),
        family: ListFamily::Object,
    }
}

/// Whether a function is called immediately at the top level, e.g. `(function () { ... })();`
pub fn is_outer_iife(ast: &Ast, function: NodeId) -> bool {
    let Some(call) = ast.parent(function) else {
        return false;
    };
    if !matches!(ast[call].kind, NodeKind::CallExpression { callee, .. } if callee == function) {
        return false;
    }
    let mut statement = ast.parent(call);
    while let Some(current) = statement {
        let passes_through = match &ast[current].kind {
            NodeKind::UnaryExpression { operator, .. } => matches!(operator.as_str(), "!" | "~" | "+" | "-"),
            NodeKind::AssignmentExpression { .. }
            | NodeKind::LogicalExpression { .. }
            | NodeKind::SequenceExpression { .. }
            | NodeKind::VariableDeclarator { .. } => true,
            _ => false,
        };
        if !passes_through {
            break;
        }
        statement = ast.parent(current);
    }
    statement.is_some_and(|statement| {
        matches!(
            ast[statement].kind,
            NodeKind::ExpressionStatement { .. } | NodeKind::VariableDeclaration { .. }
        ) && ast
            .parent_node(statement)
            .is_some_and(|parent| matches!(parent.kind, NodeKind::Program { .. }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn shape_of(content: &str, type_name: &str) -> Option<Shape> {
        let parsed = parse(content).unwrap();
        let id = parsed
            .ast
            .preorder()
            .into_iter()
            .find(|id| parsed.ast[*id].type_name() == type_name)
            .unwrap();
        project(&parsed.ast, id)
    }

    #[test]
    fn test_type_literal_and_enum_are_object_like() {
        for (content, type_name) in [
            ("type T = { a: string };", "TSTypeLiteral"),
            ("enum E { A, B }", "TSEnumDeclaration"),
            ("const o = { a: 1 };", "ObjectExpression"),
        ] {
            match shape_of(content, type_name) {
                Some(Shape::ElementList { open, family, .. }) => {
                    assert_eq!(open, "{");
                    assert_eq!(family, ListFamily::Object);
                }
                other => panic!("{type_name}: unexpected shape {other:?}"),
            }
        }
    }

    #[test]
    fn test_tuple_is_array_like() {
        assert!(matches!(
            shape_of("type T = [string, number];", "TSTupleType"),
            Some(Shape::ElementList {
                family: ListFamily::Array,
                ..
            })
        ));
    }

    #[test]
    fn test_interface_body_is_body_and_as_is_operator() {
        assert!(matches!(
            shape_of("interface I { a: string }", "TSInterfaceBody"),
            Some(Shape::Body { .. })
        ));
        assert!(matches!(
            shape_of("const a = b as string;", "TSAsExpression"),
            Some(Shape::Operator { ref operator, .. }) if operator == "as"
        ));
    }

    #[test]
    fn test_plain_class_has_no_heritage() {
        assert_eq!(shape_of("class A {}", "ClassDeclaration"), None);
        assert!(matches!(
            shape_of("class A extends B {}", "ClassDeclaration"),
            Some(Shape::Heritage { .. })
        ));
    }

    #[test]
    fn test_outer_iife() {
        let parsed = parse("(function () {\n  x();\n})();\nfoo(function () {});").unwrap();
        let functions: Vec<NodeId> = parsed
            .ast
            .preorder()
            .into_iter()
            .filter(|id| parsed.ast[*id].type_name() == "FunctionExpression")
            .collect();
        assert!(is_outer_iife(&parsed.ast, functions[0]));
        assert!(!is_outer_iife(&parsed.ast, functions[1]));
    }
}
