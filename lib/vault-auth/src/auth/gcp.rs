use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

// credentials and service_account feed an external JWT signer and are not sent
const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_JWT).or_env(ENV_GCP_AUTH_JWT),
    FieldSpec::string(FIELD_CREDENTIALS).or_env(ENV_GOOGLE_APPLICATION_CREDENTIALS),
    FieldSpec::string(FIELD_SERVICE_ACCOUNT),
];

const REQUIRED: &[&str] = &[FIELD_ROLE, FIELD_JWT];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_ROLE, FIELD_JWT];

/// Google Cloud IAM login with a signed service-account JWT
#[derive(Debug, Default, Clone)]
pub struct GcpLogin {
    params: ParamStore,
}

impl GcpLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for GcpLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Gcp
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_GCP, FIELDS, REQUIRED)?;
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
