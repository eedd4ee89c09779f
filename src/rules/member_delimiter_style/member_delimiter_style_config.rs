use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Delimiter allowed between members of a multi-line body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultilineDelimiter {
    #[default]
    Semi,
    Comma,
    None,
}

/// Delimiter allowed between members of a single-line body; omitting delimiters is
/// not valid on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinglelineDelimiter {
    #[default]
    Semi,
    Comma,
}

impl From<SinglelineDelimiter> for MultilineDelimiter {
    fn from(delimiter: SinglelineDelimiter) -> Self {
        match delimiter {
            SinglelineDelimiter::Semi => MultilineDelimiter::Semi,
            SinglelineDelimiter::Comma => MultilineDelimiter::Comma,
        }
    }
}

/// How a body is judged single-line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultilineDetection {
    /// The braces are on one line
    #[default]
    Brackets,
    /// The last member ends on the line of the closing brace
    LastMember,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MultilineOptions {
    #[serde(default)]
    pub delimiter: MultilineDelimiter,
    #[serde(default = "default_true", alias = "require_last", alias = "requireLast")]
    pub require_last: bool,
}

impl Default for MultilineOptions {
    fn default() -> Self {
        Self {
            delimiter: MultilineDelimiter::Semi,
            require_last: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SinglelineOptions {
    #[serde(default)]
    pub delimiter: SinglelineDelimiter,
    #[serde(default, alias = "require_last", alias = "requireLast")]
    pub require_last: bool,
}

/// Partial multi-line options in an override; unset keys keep the base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MultilineOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<MultilineDelimiter>,
    #[serde(default, alias = "require_last", alias = "requireLast", skip_serializing_if = "Option::is_none")]
    pub require_last: Option<bool>,
}

/// Partial single-line options in an override; unset keys keep the base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SinglelineOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<SinglelineDelimiter>,
    #[serde(default, alias = "require_last", alias = "requireLast", skip_serializing_if = "Option::is_none")]
    pub require_last: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DelimiterOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<MultilineOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singleline: Option<SinglelineOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DelimiterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<DelimiterOverride>,
    #[serde(
        default,
        alias = "type_literal",
        alias = "typeLiteral",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_literal: Option<DelimiterOverride>,
}

/// Configuration for member-delimiter-style
///
/// ```toml
/// [member-delimiter-style]
/// multiline = { delimiter = "none" }
/// singleline = { delimiter = "comma", require-last = false }
/// multiline-detection = "last-member"
///
/// [member-delimiter-style.overrides.interface]
/// multiline = { delimiter = "semi" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MemberDelimiterStyleConfig {
    #[serde(default)]
    pub multiline: MultilineOptions,
    #[serde(default)]
    pub singleline: SinglelineOptions,
    #[serde(default, alias = "multiline_detection", alias = "multilineDetection")]
    pub multiline_detection: MultilineDetection,
    #[serde(default)]
    pub overrides: DelimiterOverrides,
}

impl RuleConfig for MemberDelimiterStyleConfig {
    const RULE_NAME: &'static str = "member-delimiter-style";
}
