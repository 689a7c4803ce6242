use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::{ConfigReader, ConfigValue};
use crate::consts::*;
use crate::AuthError;
use std::collections::{BTreeMap, HashMap};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_PATH),
    FieldSpec::string(FIELD_METHOD),
];

const REQUIRED: &[&str] = &[FIELD_PATH];

/// Login against an explicit API path.
///
/// `parameters` is passed through to the request unchanged, so the set of
/// emitted keys is not fixed.
#[derive(Debug, Default, Clone)]
pub struct GenericLogin {
    params: ParamStore,
    parameters: BTreeMap<String, String>,
}

impl GenericLogin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured auth method name, empty when unset
    pub fn method(&self) -> &str {
        self.params.get_str(FIELD_METHOD)
    }
}

impl AuthLogin for GenericLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Generic
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        // no canonical mount, `mount()` falls back to the method name
        let mut store = common::extract(reader, field, "", FIELDS)?;
        common::require(&store, REQUIRED)?;

        let parameters = match reader.get(field) {
            ConfigValue::Blocks(blocks) => match blocks.first() {
                Some(block) => parameters(field, block.get(FIELD_PARAMETERS))?,
                None => BTreeMap::new(),
            },
            _ => BTreeMap::new(),
        };

        store.mark_initialized();
        self.params = store;
        self.parameters = parameters;
        Ok(())
    }

    fn login_path(&self) -> String {
        self.params
            .get_str(FIELD_PATH)
            .trim_start_matches('/')
            .to_string()
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;
        let mut params = common::wire_params(&self.params, self.mount(), &[]);
        params.extend(self.parameters.clone());
        Ok(params)
    }

    fn mount(&self) -> &str {
        [FIELD_MOUNT, FIELD_METHOD]
            .into_iter()
            .map(|name| self.params.get_str(name))
            .find(|value| !value.is_empty())
            .unwrap_or(MOUNT_TYPE_GENERIC)
    }
}

fn parameters(field: &str, value: &ConfigValue) -> Result<BTreeMap<String, String>, AuthError> {
    let name = format!("{}.{}", field, FIELD_PARAMETERS);
    let block = match value {
        ConfigValue::Absent => return Ok(BTreeMap::new()),
        ConfigValue::Blocks(blocks) => match blocks.as_slice() {
            [] => return Ok(BTreeMap::new()),
            [block] => block,
            many => {
                return Err(AuthError::MultipleBlocks {
                    field: name,
                    count: many.len(),
                });
            }
        },
        other => {
            return Err(AuthError::FieldType {
                field: name,
                expected: "map",
                found: other.kind(),
            });
        }
    };

    let mut parameters = BTreeMap::new();
    for (key, value) in block.iter() {
        match value {
            ConfigValue::Str(s) => {
                parameters.insert(key.to_string(), s.clone());
            }
            ConfigValue::Bool(b) => {
                parameters.insert(key.to_string(), b.to_string());
            }
            ConfigValue::Absent => {}
            ConfigValue::Blocks(_) => {
                return Err(AuthError::FieldType {
                    field: format!("{}.{}", name, key),
                    expected: "string",
                    found: value.kind(),
                });
            }
        }
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    fn isolated(value: serde_json::Value) -> JsonConfig {
        JsonConfig::from_value(value)
            .unwrap()
            .with_environ(HashMap::new())
    }

    #[test]
    fn test_parameters_pass_through() {
        let config = isolated(json!({
            "auth_login": [{
                "path": "/auth/approle/login",
                "method": "approle",
                "namespace": "team-a",
                "parameters": {"role_id": "r-1", "secret_id": "s-1", "ttl": 600, "renew": true}
            }]
        }));

        let mut login = GenericLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_GENERIC).unwrap();

        assert_eq!(login.login_path(), "auth/approle/login");
        assert_eq!(login.method(), "approle");
        assert_eq!(login.mount(), "approle");
        assert_eq!(login.namespace(), Some("team-a"));

        let params = login.auth_params().unwrap();
        assert_eq!(params.len(), 5);
        assert_eq!(params["mount"], "approle");
        assert_eq!(params["role_id"], "r-1");
        assert_eq!(params["secret_id"], "s-1");
        assert_eq!(params["ttl"], "600");
        assert_eq!(params["renew"], "true");
    }

    #[test]
    fn test_path_is_required() {
        let config = isolated(json!({"auth_login": [{"parameters": {"role": "x"}}]}));

        let mut login = GenericLogin::new();
        let err = login.init(&config, FIELD_AUTH_LOGIN_GENERIC).unwrap_err();
        assert_eq!(err.to_string(), "required fields are unset: [path]");
    }

    #[test]
    fn test_without_parameters_or_method() {
        let config = isolated(json!({"auth_login": [{"path": "auth/custom/login"}]}));

        let mut login = GenericLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_GENERIC).unwrap();

        assert_eq!(login.mount(), MOUNT_TYPE_GENERIC);
        let params = login.auth_params().unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["mount"], MOUNT_TYPE_GENERIC);
    }

    #[test]
    fn test_nested_parameters_rejected() {
        let config = isolated(json!({
            "auth_login": [{"path": "auth/x/login", "parameters": {"nested": {"a": "b"}}}]
        }));

        let mut login = GenericLogin::new();
        match login.init(&config, FIELD_AUTH_LOGIN_GENERIC) {
            Err(AuthError::FieldType { field, expected, .. }) => {
                assert_eq!(field, "auth_login.parameters.nested");
                assert_eq!(expected, "string");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_scalar_parameters_rejected() {
        let config = isolated(json!({"auth_login": [{"path": "auth/x/login", "parameters": "role=x"}]}));

        let mut login = GenericLogin::new();
        assert!(matches!(
            login.init(&config, FIELD_AUTH_LOGIN_GENERIC),
            Err(AuthError::FieldType { expected: "map", found: "string", .. })
        ));
    }
}
