use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, ParamValue, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_USERNAME).or_env(ENV_USERNAME),
    FieldSpec::string(FIELD_PASSWORD).or_env(ENV_PASSWORD),
    FieldSpec::string(FIELD_PASSWORD_FILE).or_env(ENV_PASSWORD_FILE),
];

const REQUIRED: &[&str] = &[FIELD_USERNAME, FIELD_PASSWORD];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_USERNAME, FIELD_PASSWORD];

/// Username and password login.
///
/// The password may come from `password_file` when `password` is unset.
#[derive(Debug, Default, Clone)]
pub struct UserpassLogin {
    params: ParamStore,
}

impl UserpassLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for UserpassLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Userpass
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        let mut store = common::extract(reader, field, MOUNT_TYPE_USERPASS, FIELDS)?;

        if !store.is_set(FIELD_PASSWORD) && store.is_set(FIELD_PASSWORD_FILE) {
            let password = read_password_file(store.get_str(FIELD_PASSWORD_FILE))?;
            store.insert(FIELD_PASSWORD, ParamValue::Str(password));
        }

        common::require(&store, REQUIRED)?;
        store.mark_initialized();
        self.params = store;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!(
            "auth/{}/login/{}",
            self.mount(),
            self.params.get_str(FIELD_USERNAME)
        )
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

fn read_password_file(path: &str) -> Result<String, AuthError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}
