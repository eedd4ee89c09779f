use crate::rule_config_serde::RuleConfig;
use crate::utils::newline_policy::NewlineOptions;
use serde::{Deserialize, Serialize};

/// Configuration for array-bracket-newline
///
/// Without any option, breaks are required around arrays whose elements span lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArrayBracketNewlineConfig {
    #[serde(flatten)]
    pub options: NewlineOptions,
}

impl RuleConfig for ArrayBracketNewlineConfig {
    const RULE_NAME: &'static str = "array-bracket-newline";
}
