use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_NAME),
    FieldSpec::string(FIELD_CERT_FILE),
    FieldSpec::string(FIELD_KEY_FILE),
    FieldSpec::string(FIELD_CA_CERT_FILE),
    FieldSpec::string(FIELD_CA_CERT_DIR),
    FieldSpec::string(FIELD_TLS_SERVER_NAME),
    FieldSpec::bool(FIELD_SKIP_TLS_VERIFY),
];

const REQUIRED: &[&str] = &[FIELD_NAME, FIELD_CERT_FILE, FIELD_KEY_FILE];

pub(crate) const WIRE_FIELDS: &[&str] = &[FIELD_MOUNT, FIELD_NAME];

/// TLS material for certificate login. Paths are read by the transport.
///
/// `tls_server_name` stays in the parameter store only, the HTTP transport
/// always verifies against the host of the base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsSettings {
    pub cert_file: String,
    pub key_file: String,
    pub ca_cert_file: String,
    pub ca_cert_dir: String,
    pub skip_tls_verify: bool,
}

/// TLS client certificate login
#[derive(Debug, Default, Clone)]
pub struct CertLogin {
    params: ParamStore,
}

impl CertLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for CertLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Cert
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_CERT, FIELDS, REQUIRED)?;
        Ok(())
    }

    fn login_path(&self) -> String {
        format!("auth/{}/login", self.mount())
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;
        Ok(common::wire_params(&self.params, self.mount(), &[FIELD_NAME]))
    }

    fn tls(&self) -> Option<TlsSettings> {
        if !self.params.is_initialized() {
            return None;
        }
        Some(TlsSettings {
            cert_file: self.params.get_str(FIELD_CERT_FILE).to_string(),
            key_file: self.params.get_str(FIELD_KEY_FILE).to_string(),
            ca_cert_file: self.params.get_str(FIELD_CA_CERT_FILE).to_string(),
            ca_cert_dir: self.params.get_str(FIELD_CA_CERT_DIR).to_string(),
            skip_tls_verify: self.params.get_bool(FIELD_SKIP_TLS_VERIFY),
        })
    }
}
