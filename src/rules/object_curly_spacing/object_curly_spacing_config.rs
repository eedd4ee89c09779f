use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

/// Whether braces are padded with a space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpacingStyle {
    Always,
    #[default]
    Never,
}

/// Configuration for object-curly-spacing
///
/// An exception takes effect when it is set to the opposite of the style, e.g.
/// `style = "always"` with `arrays-in-objects = false` allows `{ a: [1]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectCurlySpacingConfig {
    #[serde(default)]
    pub style: SpacingStyle,

    #[serde(default, alias = "arrays_in_objects", skip_serializing_if = "Option::is_none")]
    pub arrays_in_objects: Option<bool>,

    #[serde(default, alias = "objects_in_objects", skip_serializing_if = "Option::is_none")]
    pub objects_in_objects: Option<bool>,
}

impl ObjectCurlySpacingConfig {
    pub fn spaced(&self) -> bool {
        self.style == SpacingStyle::Always
    }

    fn is_exception(&self, value: Option<bool>) -> bool {
        value == Some(!self.spaced())
    }

    pub fn arrays_in_objects_exception(&self) -> bool {
        self.is_exception(self.arrays_in_objects)
    }

    pub fn objects_in_objects_exception(&self) -> bool {
        self.is_exception(self.objects_in_objects)
    }
}

impl RuleConfig for ObjectCurlySpacingConfig {
    const RULE_NAME: &'static str = "object-curly-spacing";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceptions_apply_only_when_opposite() {
        let config: ObjectCurlySpacingConfig =
            toml::from_str("style = \"always\"\narrays_in_objects = false\nobjects-in-objects = true").unwrap();
        assert!(config.spaced());
        assert!(config.arrays_in_objects_exception());
        assert!(!config.objects_in_objects_exception());

        let config = ObjectCurlySpacingConfig::default();
        assert!(!config.spaced());
        assert!(!config.arrays_in_objects_exception());
    }
}
