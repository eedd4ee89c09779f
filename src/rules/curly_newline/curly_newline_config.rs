use crate::rule_config_serde::RuleConfig;
use crate::utils::newline_policy::NewlineOptions;
use serde::{Deserialize, Serialize};

/// Configuration for curly-newline
///
/// ```toml
/// [curly-newline]
/// multiline = true
/// min-elements = 2
///
/// [curly-newline.overrides]
/// FunctionDeclaration = "always"
/// IfStatementConsequent = { consistent = true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CurlyNewlineConfig {
    #[serde(flatten)]
    pub options: NewlineOptions,
}

impl RuleConfig for CurlyNewlineConfig {
    const RULE_NAME: &'static str = "curly-newline";
}
