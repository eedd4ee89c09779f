use crate::rule_config_serde::RuleConfig;
use crate::syntax::ast::VariableKind;
use serde::{Deserialize, Serialize};

/// Width of one indentation level: a number of spaces or a single tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndentWidth {
    Spaces(usize),
    Tab(TabKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKeyword {
    Tab,
}

impl Default for IndentWidth {
    fn default() -> Self {
        IndentWidth::Spaces(4)
    }
}

impl IndentWidth {
    /// Indent character and the number of them per level
    pub fn unit(self) -> (char, usize) {
        match self {
            IndentWidth::Spaces(size) => (' ', size),
            IndentWidth::Tab(_) => ('\t', 1),
        }
    }
}

/// An offset option: a number of levels, or one of the keywords `first` / `off`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    Levels(usize),
    Keyword(OffsetKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKeyword {
    First,
    Off,
}

impl Default for OffsetValue {
    fn default() -> Self {
        OffsetValue::Levels(1)
    }
}

impl OffsetValue {
    pub const FIRST: Self = OffsetValue::Keyword(OffsetKeyword::First);
    pub const OFF: Self = OffsetValue::Keyword(OffsetKeyword::Off);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PerKindOffsets {
    #[serde(default)]
    pub var: OffsetValue,
    #[serde(default)]
    pub r#let: OffsetValue,
    #[serde(default)]
    pub r#const: OffsetValue,
}

/// `variable-declarator = 2`, `"first"`, or `{ var = 2, let = 1, const = "first" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableDeclaratorOption {
    Uniform(OffsetValue),
    PerKind(PerKindOffsets),
}

impl Default for VariableDeclaratorOption {
    fn default() -> Self {
        VariableDeclaratorOption::Uniform(OffsetValue::default())
    }
}

impl VariableDeclaratorOption {
    pub fn for_kind(&self, kind: VariableKind) -> OffsetValue {
        match self {
            VariableDeclaratorOption::Uniform(value) => *value,
            VariableDeclaratorOption::PerKind(per_kind) => match kind {
                VariableKind::Var => per_kind.var,
                VariableKind::Let => per_kind.r#let,
                VariableKind::Const => per_kind.r#const,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FunctionOffsets {
    #[serde(default)]
    pub parameters: OffsetValue,
    #[serde(default = "one")]
    pub body: usize,
}

impl Default for FunctionOffsets {
    fn default() -> Self {
        Self {
            parameters: OffsetValue::default(),
            body: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CallOffsets {
    #[serde(default)]
    pub arguments: OffsetValue,
}

fn one() -> usize {
    1
}

/// Configuration for indent
///
/// ```toml
/// [indent]
/// indent = 2
/// switch-case = 1
/// variable-declarator = { var = 2, let = 2, const = 3 }
/// member-expression = "off"
/// function-declaration = { parameters = "first", body = 1 }
/// ignored-nodes = ["ConditionalExpression"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct IndentConfig {
    #[serde(default)]
    pub indent: IndentWidth,

    #[serde(default = "one", alias = "switch_case")]
    pub switch_case: usize,

    #[serde(default, alias = "variable_declarator")]
    pub variable_declarator: VariableDeclaratorOption,

    #[serde(default, alias = "outer_iife_body")]
    pub outer_iife_body: OffsetValue,

    #[serde(default, alias = "member_expression")]
    pub member_expression: OffsetValue,

    #[serde(default, alias = "function_declaration")]
    pub function_declaration: FunctionOffsets,

    #[serde(default, alias = "function_expression")]
    pub function_expression: FunctionOffsets,

    #[serde(default, alias = "call_expression")]
    pub call_expression: CallOffsets,

    #[serde(default, alias = "array_expression")]
    pub array_expression: OffsetValue,

    #[serde(default, alias = "object_expression")]
    pub object_expression: OffsetValue,

    #[serde(default, alias = "import_declaration")]
    pub import_declaration: OffsetValue,

    #[serde(default, alias = "flat_ternary_expressions")]
    pub flat_ternary_expressions: bool,

    #[serde(default, alias = "offset_ternary_expressions")]
    pub offset_ternary_expressions: bool,

    #[serde(default, alias = "ignore_comments")]
    pub ignore_comments: bool,

    /// Node type names whose tokens are left alone
    #[serde(default, alias = "ignored_nodes")]
    pub ignored_nodes: Vec<String>,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent: IndentWidth::default(),
            switch_case: 1,
            variable_declarator: VariableDeclaratorOption::default(),
            outer_iife_body: OffsetValue::default(),
            member_expression: OffsetValue::default(),
            function_declaration: FunctionOffsets::default(),
            function_expression: FunctionOffsets::default(),
            call_expression: CallOffsets::default(),
            array_expression: OffsetValue::default(),
            object_expression: OffsetValue::default(),
            import_declaration: OffsetValue::default(),
            flat_ternary_expressions: false,
            offset_ternary_expressions: false,
            ignore_comments: false,
            ignored_nodes: Vec::new(),
        }
    }
}

impl RuleConfig for IndentConfig {
    const RULE_NAME: &'static str = "indent";
}
