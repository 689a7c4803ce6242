use super::params::{ParamStore, ParamValue};
use crate::config::{ConfigBlock, ConfigReader, ConfigValue};
use crate::consts::{FIELD_MOUNT, FIELD_NAMESPACE};
use crate::AuthError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Str,
    Bool,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldDefault {
    Zero,
    Value(&'static str),
    Env(&'static str),
}

/// A recognized sub-field of a scheme block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Str,
            default: FieldDefault::Zero,
        }
    }

    pub const fn bool(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Bool,
            default: FieldDefault::Zero,
        }
    }

    pub const fn or_value(mut self, value: &'static str) -> Self {
        self.default = FieldDefault::Value(value);
        self
    }

    pub const fn or_env(mut self, var: &'static str) -> Self {
        self.default = FieldDefault::Env(var);
        self
    }
}

/// Shared `init` protocol: locate the block, extract fields, check required ones.
pub(crate) fn init(
    reader: &dyn ConfigReader,
    field: &str,
    mount_type: &'static str,
    fields: &[FieldSpec],
    required: &[&str],
) -> Result<ParamStore, AuthError> {
    let mut store = extract(reader, field, mount_type, fields)?;
    require(&store, required)?;
    store.mark_initialized();
    Ok(store)
}

/// Copy the universal fields and the scheme's `fields` out of the single block at `field`.
pub(crate) fn extract(
    reader: &dyn ConfigReader,
    field: &str,
    mount_type: &'static str,
    fields: &[FieldSpec],
) -> Result<ParamStore, AuthError> {
    let blocks = match reader.get(field) {
        ConfigValue::Absent => {
            return Err(AuthError::MissingField {
                field: field.to_string(),
            });
        }
        ConfigValue::Blocks(blocks) => blocks,
        other => {
            return Err(AuthError::FieldType {
                field: field.to_string(),
                expected: "block list",
                found: other.kind(),
            });
        }
    };

    let block = match blocks.as_slice() {
        [] => {
            return Err(AuthError::MissingField {
                field: field.to_string(),
            });
        }
        [block] => block,
        many => {
            return Err(AuthError::MultipleBlocks {
                field: field.to_string(),
                count: many.len(),
            });
        }
    };

    let universal = [
        FieldSpec::string(FIELD_NAMESPACE),
        FieldSpec::string(FIELD_MOUNT).or_value(mount_type),
    ];

    let mut store = ParamStore::new();
    for def in universal.iter().chain(fields) {
        let value = resolve_field(reader, field, block, def)?;
        store.insert(def.name, value);
    }

    tracing::debug!(field, names = ?store.names().collect::<Vec<_>>(), "extracted login block");
    Ok(store)
}

fn resolve_field(
    reader: &dyn ConfigReader,
    field: &str,
    block: &ConfigBlock,
    def: &FieldSpec,
) -> Result<ParamValue, AuthError> {
    match (def.kind, block.get(def.name)) {
        (FieldKind::Str, ConfigValue::Str(s)) if !s.is_empty() => Ok(ParamValue::Str(s.clone())),
        (FieldKind::Str, ConfigValue::Str(_) | ConfigValue::Absent) => {
            Ok(ParamValue::Str(default_value(reader, def).unwrap_or_default()))
        }
        (FieldKind::Bool, ConfigValue::Bool(b)) => Ok(ParamValue::Bool(*b)),
        (FieldKind::Bool, ConfigValue::Absent) => match default_value(reader, def) {
            None => Ok(ParamValue::Bool(false)),
            Some(raw) => raw.parse::<bool>().map(ParamValue::Bool).map_err(|_| {
                AuthError::FieldType {
                    field: format!("{}.{}", field, def.name),
                    expected: FieldKind::Bool.name(),
                    found: "string",
                }
            }),
        },
        (kind, other) => Err(AuthError::FieldType {
            field: format!("{}.{}", field, def.name),
            expected: kind.name(),
            found: other.kind(),
        }),
    }
}

fn default_value(reader: &dyn ConfigReader, def: &FieldSpec) -> Option<String> {
    match def.default {
        FieldDefault::Zero => None,
        FieldDefault::Value(v) => Some(v.to_string()),
        FieldDefault::Env(var) => reader.env(var),
    }
}

/// Fail with every unset required field, in declaration order.
pub(crate) fn require(store: &ParamStore, required: &[&str]) -> Result<(), AuthError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !store.is_set(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::RequiredFieldsUnset(missing))
    }
}

/// Flat wire map: `mount` plus every set field in `names`. Bools are always emitted.
pub(crate) fn wire_params(
    store: &ParamStore,
    mount: &str,
    names: &[&str],
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.insert(FIELD_MOUNT.to_string(), mount.to_string());
    for name in names {
        match store.get(name) {
            Some(ParamValue::Str(s)) if !s.is_empty() => {
                params.insert(name.to_string(), s.clone());
            }
            Some(ParamValue::Bool(b)) => {
                params.insert(name.to_string(), b.to_string());
            }
            _ => {}
        }
    }
    params
}
