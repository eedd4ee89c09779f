/// Serde-based configuration system for rules
///
/// Each rule declares a config struct deriving `Serialize`/`Deserialize`; the rule's
/// TOML table is converted and deserialized into it, falling back to defaults.
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{Config, ConfigError};

/// Trait for rule configurations
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name (e.g., "brace-style")
    const RULE_NAME: &'static str;
}

/// Load a rule's configuration, reporting malformed tables as errors
pub fn try_load_rule_config<T: RuleConfig>(config: &Config) -> Result<T, ConfigError> {
    let Some(rule_config) = config.rules.get(T::RULE_NAME) else {
        return Ok(T::default());
    };

    // Convert BTreeMap<String, toml::Value> to serde_json::Value
    let json_map: serde_json::Map<String, serde_json::Value> = rule_config
        .values
        .iter()
        .filter_map(|(k, v)| toml_value_to_json(v).map(|json_v| (k.clone(), json_v)))
        .collect();

    serde_json::from_value(serde_json::Value::Object(json_map)).map_err(|e| ConfigError::InvalidRuleConfig {
        rule: T::RULE_NAME.to_string(),
        message: e.to_string(),
    })
}

/// Helper to load rule configuration from the global config.
/// Invalid tables are logged and replaced by the defaults.
pub fn load_rule_config<T: RuleConfig>(config: &Config) -> T {
    try_load_rule_config(config).unwrap_or_else(|err| {
        log::warn!("{err}; using defaults");
        T::default()
    })
}

/// The rule's default configuration as a TOML table, if it has any options
pub fn default_config_section<T: RuleConfig>() -> Option<(String, toml::Value)> {
    let json_value = serde_json::to_value(T::default()).ok()?;
    match json_to_toml_value(&json_value)? {
        toml::Value::Table(table) if !table.is_empty() => Some((T::RULE_NAME.to_string(), toml::Value::Table(table))),
        _ => None,
    }
}

/// Convert TOML value to JSON value for serde deserialization
fn toml_value_to_json(toml_val: &toml::Value) -> Option<serde_json::Value> {
    match toml_val {
        toml::Value::String(s) => Some(serde_json::Value::String(s.clone())),
        toml::Value::Integer(i) => Some(serde_json::Value::Number((*i).into())),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f).map(serde_json::Value::Number),
        toml::Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
        toml::Value::Array(arr) => {
            let json_arr: Vec<_> = arr.iter().filter_map(toml_value_to_json).collect();
            Some(serde_json::Value::Array(json_arr))
        }
        toml::Value::Table(table) => {
            let json_map: serde_json::Map<_, _> = table
                .iter()
                .filter_map(|(k, v)| toml_value_to_json(v).map(|json_v| (k.clone(), json_v)))
                .collect();
            Some(serde_json::Value::Object(json_map))
        }
        toml::Value::Datetime(_) => None,
    }
}

/// Convert JSON value to TOML value for default config generation
pub fn json_to_toml_value(json_val: &serde_json::Value) -> Option<toml::Value> {
    match json_val {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(toml::Value::Boolean(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(toml::Value::Integer(i))
            } else {
                n.as_f64().map(toml::Value::Float)
            }
        }
        serde_json::Value::String(s) => Some(toml::Value::String(s.clone())),
        serde_json::Value::Array(arr) => {
            let toml_arr: Vec<_> = arr.iter().filter_map(json_to_toml_value).collect();
            Some(toml::Value::Array(toml_arr))
        }
        serde_json::Value::Object(obj) => {
            let mut toml_table = toml::map::Map::new();
            for (k, v) in obj {
                if let Some(toml_v) = json_to_toml_value(v) {
                    toml_table.insert(k.clone(), toml_v);
                }
            }
            Some(toml::Value::Table(toml_table))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "kebab-case", deny_unknown_fields)]
    struct DemoConfig {
        #[serde(default = "default_size")]
        size: usize,
        #[serde(default, alias = "allow_empty")]
        allow_empty: bool,
    }

    fn default_size() -> usize {
        4
    }

    impl Default for DemoConfig {
        fn default() -> Self {
            Self {
                size: default_size(),
                allow_empty: false,
            }
        }
    }

    impl RuleConfig for DemoConfig {
        const RULE_NAME: &'static str = "demo";
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = Config::default();
        assert_eq!(load_rule_config::<DemoConfig>(&config), DemoConfig::default());
    }

    #[test]
    fn test_table_values_are_applied() {
        let config = Config::from_toml_str("[demo]\nsize = 2\nallow_empty = true\n").unwrap();
        let demo: DemoConfig = load_rule_config(&config);
        assert_eq!(demo.size, 2);
        assert!(demo.allow_empty);
    }

    #[test]
    fn test_invalid_table_is_reported_or_defaulted() {
        let config = Config::from_toml_str("[demo]\nsize = \"big\"\n").unwrap();
        assert!(matches!(
            try_load_rule_config::<DemoConfig>(&config),
            Err(ConfigError::InvalidRuleConfig { .. })
        ));
        assert_eq!(load_rule_config::<DemoConfig>(&config), DemoConfig::default());
    }

    #[test]
    fn test_default_config_section() {
        let (name, value) = default_config_section::<DemoConfig>().unwrap();
        assert_eq!(name, "demo");
        assert_eq!(value.get("size").and_then(toml::Value::as_integer), Some(4));
    }
}
