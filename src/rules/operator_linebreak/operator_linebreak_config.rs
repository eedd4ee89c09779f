use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where an operator goes when an expression is broken across lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinebreakStyle {
    /// At the end of the line
    After,
    /// At the start of the next line
    Before,
    /// Never break around the operator
    None,
}

/// Per-operator style; `ignore` turns checking off for that operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorStyle {
    After,
    Before,
    None,
    Ignore,
}

impl From<LinebreakStyle> for OperatorStyle {
    fn from(style: LinebreakStyle) -> Self {
        match style {
            LinebreakStyle::After => OperatorStyle::After,
            LinebreakStyle::Before => OperatorStyle::Before,
            LinebreakStyle::None => OperatorStyle::None,
        }
    }
}

/// Configuration for operator-linebreak
///
/// Without `style`, operators go after the break except `?` and `:`, which go before.
///
/// ```toml
/// [operator-linebreak]
/// style = "before"
///
/// [operator-linebreak.overrides]
/// "=" = "none"
/// "&&" = "ignore"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OperatorLinebreakConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<LinebreakStyle>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, OperatorStyle>,
}

impl OperatorLinebreakConfig {
    /// The global style and the overrides with the implicit ternary defaults applied
    pub fn resolve(&self) -> (OperatorStyle, BTreeMap<String, OperatorStyle>) {
        let mut overrides = self.overrides.clone();
        if self.style.is_none() {
            for operator in ["?", ":"] {
                overrides.entry(operator.to_string()).or_insert(OperatorStyle::Before);
            }
        }
        (self.style.unwrap_or(LinebreakStyle::After).into(), overrides)
    }
}

impl RuleConfig for OperatorLinebreakConfig {
    const RULE_NAME: &'static str = "operator-linebreak";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ternary_overrides() {
        let (global, overrides) = OperatorLinebreakConfig::default().resolve();
        assert_eq!(global, OperatorStyle::After);
        assert_eq!(overrides.get("?"), Some(&OperatorStyle::Before));
        assert_eq!(overrides.get(":"), Some(&OperatorStyle::Before));
    }

    #[test]
    fn test_explicit_style_drops_ternary_defaults() {
        let config: OperatorLinebreakConfig = toml::from_str(
            r#"
style = "after"
[overrides]
"+" = "ignore"
"#,
        )
        .unwrap();
        let (global, overrides) = config.resolve();
        assert_eq!(global, OperatorStyle::After);
        assert_eq!(overrides.get("?"), None);
        assert_eq!(overrides.get("+"), Some(&OperatorStyle::Ignore));
    }

    #[test]
    fn test_ignore_is_not_a_global_style() {
        assert!(toml::from_str::<OperatorLinebreakConfig>("style = \"ignore\"").is_err());
    }
}
