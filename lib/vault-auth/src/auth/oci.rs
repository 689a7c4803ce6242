use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_AUTH_TYPE),
];

const REQUIRED: &[&str] = &[FIELD_ROLE, FIELD_AUTH_TYPE];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_ROLE, FIELD_AUTH_TYPE];

/// Oracle Cloud Infrastructure login
#[derive(Debug, Default, Clone)]
pub struct OciLogin {
    params: ParamStore,
}

impl OciLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for OciLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Oci
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        let mut store = common::extract(reader, field, MOUNT_TYPE_OCI, FIELDS)?;
        common::require(&store, REQUIRED)?;

        let auth_type = store.get_str(FIELD_AUTH_TYPE);
        if !OCI_AUTH_TYPES.contains(&auth_type) {
            return Err(AuthError::InvalidValue {
                field: FIELD_AUTH_TYPE.to_string(),
                value: auth_type.to_string(),
                allowed: OCI_AUTH_TYPES,
            });
        }

        store.mark_initialized();
        self.params = store;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!(
            "auth/{}/login/{}",
            self.mount(),
            self.params.get_str(FIELD_ROLE)
        )
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;
        Ok(common::wire_params(
            &self.params,
            self.mount(),
            &[FIELD_ROLE, FIELD_AUTH_TYPE],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    fn config(auth_type: &str) -> JsonConfig {
        JsonConfig::from_value(json!({
            "auth_login_oci": [{"role": "compute", "auth_type": auth_type}]
        }))
        .unwrap()
    }

    #[test]
    fn test_login_path_embeds_role() {
        let mut login = OciLogin::new();
        login.init(&config("instance"), FIELD_AUTH_LOGIN_OCI).unwrap();
        assert_eq!(login.login_path(), "auth/oci/login/compute");
        assert_eq!(login.auth_params().unwrap()["auth_type"], "instance");
    }

    #[test]
    fn test_unknown_auth_type_rejected() {
        let mut login = OciLogin::new();
        let err = login.init(&config("password"), FIELD_AUTH_LOGIN_OCI).unwrap_err();
        assert!(matches!(err, AuthError::InvalidValue { ref value, .. } if value == "password"));
        assert!(!login.params().is_initialized());
    }
}
