use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_USERNAME).or_env(ENV_RADIUS_USERNAME),
    FieldSpec::string(FIELD_PASSWORD).or_env(ENV_RADIUS_PASSWORD),
];

const REQUIRED: &[&str] = &[FIELD_USERNAME, FIELD_PASSWORD];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_USERNAME, FIELD_PASSWORD];

/// RADIUS login
#[derive(Debug, Default, Clone)]
pub struct RadiusLogin {
    params: ParamStore,
}

impl RadiusLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for RadiusLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Radius
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_RADIUS, FIELDS, REQUIRED)?;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!("auth/{}/login", self.mount())
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;
        Ok(common::wire_params(
            &self.params,
            self.mount(),
            &[FIELD_USERNAME, FIELD_PASSWORD],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    #[test]
    fn test_password_from_environment() {
        let environ = HashMap::from([(ENV_RADIUS_PASSWORD.to_string(), "pin".to_string())]);
        let config = JsonConfig::from_value(json!({"auth_login_radius": {"username": "ops"}}))
            .unwrap()
            .with_environ(environ);

        let mut login = RadiusLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_RADIUS).unwrap();

        assert_eq!(login.login_path(), "auth/radius/login");
        let params = login.auth_params().unwrap();
        assert_eq!(params["username"], "ops");
        assert_eq!(params["password"], "pin");
    }

    #[test]
    fn test_missing_password() {
        let config = JsonConfig::from_value(json!({"auth_login_radius": [{"username": "ops"}]}))
            .unwrap()
            .with_environ(HashMap::new());

        let err = RadiusLogin::new()
            .init(&config, FIELD_AUTH_LOGIN_RADIUS)
            .unwrap_err();
        assert_eq!(err.to_string(), "required fields are unset: [password]");
    }
}
