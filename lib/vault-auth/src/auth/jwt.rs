use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_JWT).or_env(ENV_AUTH_JWT),
];

const REQUIRED: &[&str] = &[FIELD_ROLE, FIELD_JWT];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_ROLE, FIELD_JWT];

/// JWT login with a pre-issued token
#[derive(Debug, Default, Clone)]
pub struct JwtLogin {
    params: ParamStore,
}

impl JwtLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for JwtLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Jwt
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_JWT, FIELDS, REQUIRED)?;
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
            &[FIELD_ROLE, FIELD_JWT],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use serde_json::json;

    #[test]
    fn test_jwt_login() {
        let config = JsonConfig::from_value(json!({
            "auth_login_jwt": [{"role": "ci", "jwt": "eyJhbGciOi", "namespace": "team-a"}]
        }))
        .unwrap()
        .with_environ(HashMap::new());

        let mut login = JwtLogin::new();
        login.init(&config, FIELD_AUTH_LOGIN_JWT).unwrap();

        assert_eq!(login.login_path(), "auth/jwt/login");
        assert_eq!(login.namespace(), Some("team-a"));
        let params = login.auth_params().unwrap();
        assert_eq!(
            params,
            HashMap::from([
                ("mount".to_string(), "jwt".to_string()),
                ("role".to_string(), "ci".to_string()),
                ("jwt".to_string(), "eyJhbGciOi".to_string()),
            ])
        );
    }
}
