use crate::rule_config_serde::RuleConfig;
use phf::phf_set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node types whose lists are skipped unless `exceptions` says otherwise
static DEFAULT_EXCEPTIONS: phf::Set<&'static str> = phf_set! {
    "ArrayPattern",
    "ArrowFunctionExpression",
    "CallExpression",
    "FunctionDeclaration",
    "FunctionExpression",
    "ImportDeclaration",
    "ObjectPattern",
    "NewExpression",
    "TSFunctionType",
    "TSMethodSignature",
};

/// Where commas go in a multi-line list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommaStyleKind {
    /// Comma at the end of the line, after the item
    #[default]
    Last,
    /// Comma at the start of the line, before the item
    First,
}

/// Configuration for comma-style
///
/// ```toml
/// [comma-style]
/// style = "first"
///
/// [comma-style.exceptions]
/// VariableDeclaration = true
/// CallExpression = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CommaStyleConfig {
    #[serde(default)]
    pub style: CommaStyleKind,

    /// Node type names whose lists are not checked; merged over the defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exceptions: BTreeMap<String, bool>,
}

impl CommaStyleConfig {
    pub fn is_exception(&self, node_type: &str) -> bool {
        self.exceptions
            .get(node_type)
            .copied()
            .unwrap_or_else(|| DEFAULT_EXCEPTIONS.contains(node_type))
    }
}

impl RuleConfig for CommaStyleConfig {
    const RULE_NAME: &'static str = "comma-style";
}
