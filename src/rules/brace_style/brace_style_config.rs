use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Brace placement style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BraceStyleKind {
    /// One true brace style: opening brace on the same line, `else` after the closing brace
    #[default]
    #[serde(rename = "1tbs")]
    OneTrueBrace,
    /// Like 1tbs, but `else`/`catch`/`finally` start on their own line
    #[serde(rename = "stroustrup")]
    Stroustrup,
    /// Opening braces on their own line
    #[serde(rename = "allman")]
    Allman,
}

/// Configuration for brace-style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BraceStyleConfig {
    /// Brace style (default: 1tbs)
    #[serde(default)]
    pub style: BraceStyleKind,

    /// Allow a block's braces to open and close on the same line (default: false)
    #[serde(default, alias = "allow_single_line")]
    pub allow_single_line: bool,
}

impl RuleConfig for BraceStyleConfig {
    const RULE_NAME: &'static str = "brace-style";
}
