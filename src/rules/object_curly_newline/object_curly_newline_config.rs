use crate::rule_config_serde::RuleConfig;
use crate::utils::newline_policy::NewlineOptions;
use serde::{Deserialize, Serialize};

/// Configuration for object-curly-newline
///
/// ```toml
/// [object-curly-newline]
/// multiline = true
///
/// [object-curly-newline.overrides]
/// ImportDeclaration = "never"
/// ExportDeclaration = { min-elements = 3 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectCurlyNewlineConfig {
    #[serde(flatten)]
    pub options: NewlineOptions,
}

impl RuleConfig for ObjectCurlyNewlineConfig {
    const RULE_NAME: &'static str = "object-curly-newline";
}
