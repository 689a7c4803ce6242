use crate::AuthError;
use std::collections::BTreeMap;
use std::fmt;

/// A resolved configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
}

impl ParamValue {
    /// Zero values (empty string, `false`) count as unset.
    pub fn is_set(&self) -> bool {
        match self {
            ParamValue::Str(s) => !s.is_empty(),
            ParamValue::Bool(b) => *b,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

/// Resolved parameters of one login attempt.
///
/// Filled once by `init`, read-only afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParamStore {
    values: BTreeMap<String, ParamValue>,
    initialized: bool,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// String value, or `""` when absent or not a string
    pub fn get_str(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(ParamValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParamValue::Bool(true)))
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(ParamValue::is_set)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn ready(&self) -> Result<(), AuthError> {
        if self.initialized {
            Ok(())
        } else {
            Err(AuthError::NotInitialized)
        }
    }

    #[cfg(test)]
    pub(crate) fn initialized_with(values: &[(&str, &str)]) -> Self {
        let mut store = Self::new();
        for (name, value) in values {
            store.insert(*name, ParamValue::from(*value));
        }
        store.mark_initialized();
        store
    }
}

// Values may hold secrets, only names are printed.
impl fmt::Debug for ParamStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamStore")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .field("initialized", &self.initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_unset() {
        let mut store = ParamStore::new();
        store.insert("role", ParamValue::from(""));
        store.insert("skip", ParamValue::Bool(false));
        store.insert("name", ParamValue::from("web"));

        assert!(!store.is_set("role"));
        assert!(!store.is_set("skip"));
        assert!(!store.is_set("missing"));
        assert!(store.is_set("name"));
    }

    #[test]
    fn test_ready_requires_initialization() {
        let mut store = ParamStore::new();
        assert!(matches!(store.ready(), Err(AuthError::NotInitialized)));
        store.mark_initialized();
        assert!(store.ready().is_ok());
    }

    #[test]
    fn test_typed_getters() {
        let mut store = ParamStore::new();
        store.insert("flag", ParamValue::Bool(true));
        store.insert("role", ParamValue::from("alice"));

        assert_eq!(store.get_str("role"), "alice");
        assert_eq!(store.get_str("flag"), "");
        assert!(store.get_bool("flag"));
        assert!(!store.get_bool("role"));
    }

    #[test]
    fn test_debug_hides_values() {
        let store = ParamStore::initialized_with(&[("password", "hunter2")]);
        let printed = format!("{:?}", store);
        assert!(printed.contains("password"));
        assert!(!printed.contains("hunter2"));
    }
}
