use crate::AuthError;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

static ABSENT: ConfigValue = ConfigValue::Absent;

/// A raw configuration value after primitive coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigValue {
    #[default]
    Absent,
    Str(String),
    Bool(bool),
    Blocks(Vec<ConfigBlock>),
}

impl ConfigValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Absent => "absent value",
            ConfigValue::Str(_) => "string",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Blocks(_) => "block list",
        }
    }

    /// Whether the value counts as configured. An empty block list does not.
    pub fn is_present(&self) -> bool {
        match self {
            ConfigValue::Absent => false,
            ConfigValue::Blocks(blocks) => !blocks.is_empty(),
            ConfigValue::Str(_) | ConfigValue::Bool(_) => true,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// A nested configuration block (one element of a block list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBlock {
    fields: BTreeMap<String, ConfigValue>,
}

impl ConfigBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ConfigValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> &ConfigValue {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Source of raw configuration values for login schemes.
pub trait ConfigReader: Send + Sync {
    /// Top-level field lookup.
    fn get(&self, field: &str) -> ConfigValue;

    /// Environment lookup used for field defaults. Empty values count as unset.
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl ConfigReader for ConfigBlock {
    fn get(&self, field: &str) -> ConfigValue {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

/// `ConfigReader` over a JSON document.
///
/// Arrays of objects become block lists, a bare object is a one-element block
/// list, numbers are coerced to strings and `null` is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    root: ConfigBlock,
    environ: Option<HashMap<String, String>>,
}

impl JsonConfig {
    pub fn from_value(value: serde_json::Value) -> Result<Self, AuthError> {
        let root = match value {
            serde_json::Value::Object(map) => block_from_map(map)?,
            other => {
                return Err(AuthError::FieldType {
                    field: "<root>".to_string(),
                    expected: "object",
                    found: json_kind(&other),
                });
            }
        };
        Ok(Self {
            root,
            environ: None,
        })
    }

    pub fn parse(content: &str) -> Result<Self, AuthError> {
        Self::from_value(serde_json::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Replace the process environment for default lookups (for testing)
    pub fn with_environ(mut self, environ: HashMap<String, String>) -> Self {
        self.environ = Some(environ);
        self
    }
}

impl ConfigReader for JsonConfig {
    fn get(&self, field: &str) -> ConfigValue {
        self.root.get(field).clone()
    }

    fn env(&self, name: &str) -> Option<String> {
        match &self.environ {
            Some(environ) => environ.get(name).filter(|v| !v.is_empty()).cloned(),
            None => std::env::var(name).ok().filter(|v| !v.is_empty()),
        }
    }
}

fn block_from_map(map: serde_json::Map<String, serde_json::Value>) -> Result<ConfigBlock, AuthError> {
    let mut block = ConfigBlock::new();
    for (name, value) in map {
        let value = convert(&name, value)?;
        block.insert(name, value);
    }
    Ok(block)
}

fn convert(name: &str, value: serde_json::Value) -> Result<ConfigValue, AuthError> {
    use serde_json::Value;

    Ok(match value {
        Value::Null => ConfigValue::Absent,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => ConfigValue::Str(n.to_string()),
        Value::String(s) => ConfigValue::Str(s),
        Value::Object(map) => ConfigValue::Blocks(vec![block_from_map(map)?]),
        Value::Array(items) => {
            let blocks = items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => block_from_map(map),
                    other => Err(AuthError::FieldType {
                        field: name.to_string(),
                        expected: "block list",
                        found: json_kind(&other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            ConfigValue::Blocks(blocks)
        }
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
