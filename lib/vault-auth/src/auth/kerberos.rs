use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_TOKEN).or_env(ENV_KRB_SPNEGO_TOKEN),
    FieldSpec::string(FIELD_USERNAME),
    FieldSpec::string(FIELD_SERVICE),
    FieldSpec::string(FIELD_REALM),
    FieldSpec::string(FIELD_KEYTAB_PATH).or_env(ENV_KRB_KEYTAB),
    FieldSpec::string(FIELD_KRB5CONF_PATH).or_env(ENV_KRB5_CONF),
    FieldSpec::bool(FIELD_DISABLE_FAST_NEGOTIATION),
    FieldSpec::bool(FIELD_REMOVE_INSTANCE_NAME),
];

/// Needed to generate a SPNEGO token when none is configured
const KEYTAB_FIELDS: &[&str] = &[
    FIELD_USERNAME,
    FIELD_SERVICE,
    FIELD_REALM,
    FIELD_KEYTAB_PATH,
    FIELD_KRB5CONF_PATH,
];

const KEYTAB_PARAMS: &[&str] = &[
    FIELD_USERNAME,
    FIELD_SERVICE,
    FIELD_REALM,
    FIELD_KEYTAB_PATH,
    FIELD_KRB5CONF_PATH,
    FIELD_DISABLE_FAST_NEGOTIATION,
    FIELD_REMOVE_INSTANCE_NAME,
];

pub(crate) const WIRE_FIELDS: &[&str] = &[
    FIELD_MOUNT,
    FIELD_AUTHORIZATION,
    FIELD_USERNAME,
    FIELD_SERVICE,
    FIELD_REALM,
    FIELD_KEYTAB_PATH,
    FIELD_KRB5CONF_PATH,
    FIELD_DISABLE_FAST_NEGOTIATION,
    FIELD_REMOVE_INSTANCE_NAME,
];

/// Kerberos (SPNEGO) login.
///
/// With a `token` the request carries `authorization: Negotiate <token>`.
/// Without one, the keytab parameters are emitted for an external token
/// generator.
#[derive(Debug, Default, Clone)]
pub struct KerberosLogin {
    params: ParamStore,
}

impl KerberosLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for KerberosLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Kerberos
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        let mut store = common::extract(reader, field, MOUNT_TYPE_KERBEROS, FIELDS)?;
        if !store.is_set(FIELD_TOKEN) {
            common::require(&store, KEYTAB_FIELDS)?;
        }
        store.mark_initialized();
        self.params = store;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!("auth/{}/login", self.mount())
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;

        let token = self.params.get_str(FIELD_TOKEN);
        if token.is_empty() {
            return Ok(common::wire_params(&self.params, self.mount(), KEYTAB_PARAMS));
        }

        let mut params = common::wire_params(&self.params, self.mount(), &[]);
        params.insert(FIELD_AUTHORIZATION.to_string(), format!("Negotiate {}", token));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    #[test]
    fn test_token_from_environment_skips_keytab_fields() {
        let environ = HashMap::from([(ENV_KRB_SPNEGO_TOKEN.to_string(), "YIIB".to_string())]);
        let config = JsonConfig::from_value(json!({"auth_login_kerberos": [{}]}))
            .unwrap()
            .with_environ(environ);

        let mut login = KerberosLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_KERBEROS).unwrap();

        let params = login.auth_params().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["authorization"], "Negotiate YIIB");
        assert_eq!(params["mount"], "kerberos");
    }

    #[test]
    fn test_keytab_parameters() {
        let environ = HashMap::from([(ENV_KRB5_CONF.to_string(), "/etc/krb5.conf".to_string())]);
        let config = JsonConfig::from_value(json!({
            "auth_login_kerberos": [{
                "username": "svc-vault",
                "service": "HTTP/vault.example.com",
                "realm": "EXAMPLE.COM",
                "keytab_path": "/etc/krb5.keytab",
                "remove_instance_name": true
            }]
        }))
        .unwrap()
        .with_environ(environ);

        let mut login = KerberosLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_KERBEROS).unwrap();

        let params = login.auth_params().unwrap();
        assert!(!params.contains_key(FIELD_AUTHORIZATION));
        assert_eq!(params["krb5conf_path"], "/etc/krb5.conf");
        assert_eq!(params["remove_instance_name"], "true");
        assert_eq!(params["disable_fast_negotiation"], "false");
        assert!(params.keys().all(|k| WIRE_FIELDS.contains(&k.as_str())));
    }

    #[test]
    fn test_partial_keytab_config_lists_missing() {
        let config = JsonConfig::from_value(json!({
            "auth_login_kerberos": [{"username": "svc-vault", "realm": "EXAMPLE.COM"}]
        }))
        .unwrap()
        .with_environ(HashMap::new());

        let err = KerberosLogin::new()
            .init(&config, FIELD_AUTH_LOGIN_KERBEROS)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "required fields are unset: [service keytab_path krb5conf_path]"
        );
    }
}
