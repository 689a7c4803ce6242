use super::common::{self, FieldSpec};
use super::{AuthLogin, ParamStore, Scheme};
use crate::config::ConfigReader;
use crate::consts::*;
use crate::{AddressError, AuthError};
use std::collections::HashMap;
use url::{Host, Url};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::string(FIELD_ROLE),
    FieldSpec::string(FIELD_CALLBACK_LISTENER_ADDRESS),
    FieldSpec::string(FIELD_CALLBACK_ADDRESS),
];

const REQUIRED: &[&str] = &[FIELD_ROLE];

pub(crate) const WIRE_FIELDS: &[&str] = &[
    FIELD_MOUNT,
    FIELD_ROLE,
    FIELD_SKIP_BROWSER,
    FIELD_LISTEN_ADDRESS,
    FIELD_PORT,
    FIELD_CALLBACK_HOST,
    FIELD_CALLBACK_PORT,
    FIELD_CALLBACK_METHOD,
];

/// OIDC (browser redirect) login.
///
/// There is no single login endpoint: the parameters drive an external
/// helper that runs the local callback listener and the browser handshake.
#[derive(Debug, Default, Clone)]
pub struct OidcLogin {
    params: ParamStore,
}

impl OidcLogin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthLogin for OidcLogin {
    fn scheme(&self) -> Scheme {
        Scheme::Oidc
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError> {
        self.params = common::init(reader, field, MOUNT_TYPE_OIDC, FIELDS, REQUIRED)?;
        Ok(())
    }

    fn login_path(&self) -> String {
        String::new()
    }

    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError> {
        self.params.ready()?;

        let role = self.params.get_str(FIELD_ROLE);
        if role.is_empty() {
            return Err(AuthError::FieldNotSet {
                field: FIELD_ROLE.to_string(),
            });
        }

        let mut params = HashMap::new();
        params.insert(FIELD_MOUNT.to_string(), self.mount().to_string());
        params.insert(FIELD_ROLE.to_string(), role.to_string());

        let listener = self.params.get_str(FIELD_CALLBACK_LISTENER_ADDRESS);
        let callback = self.params.get_str(FIELD_CALLBACK_ADDRESS);

        // any explicit endpoint means a non-interactive handshake
        if !listener.is_empty() || !callback.is_empty() {
            params.insert(FIELD_SKIP_BROWSER.to_string(), "true".to_string());
        }

        if !listener.is_empty() {
            let addr = parse_field(FIELD_CALLBACK_LISTENER_ADDRESS, listener)?;
            params.insert(FIELD_LISTEN_ADDRESS.to_string(), addr.host);
            params.insert(FIELD_PORT.to_string(), addr.port.to_string());
        }

        if !callback.is_empty() {
            let addr = parse_field(FIELD_CALLBACK_ADDRESS, callback)?;
            params.insert(FIELD_CALLBACK_HOST.to_string(), addr.host);
            params.insert(FIELD_CALLBACK_PORT.to_string(), addr.port.to_string());
            params.insert(FIELD_CALLBACK_METHOD.to_string(), addr.scheme);
        }

        Ok(params)
    }
}

fn parse_field(field: &str, value: &str) -> Result<RedirectAddress, AuthError> {
    RedirectAddress::parse(value).map_err(|source| AuthError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
        source,
    })
}

/// A `scheme://host:port` address used by the redirect handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAddress {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl RedirectAddress {
    /// Parse an address. The port may only be omitted for schemes with a
    /// well-known default (`http`, `https`).
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        match value.split_once("://") {
            Some((scheme, _)) if !scheme.is_empty() => {}
            _ => return Err(AddressError::MissingScheme),
        }

        let url = Url::parse(value).map_err(|e| match e {
            url::ParseError::EmptyHost => AddressError::MissingHost,
            url::ParseError::InvalidPort => AddressError::InvalidPort,
            other => AddressError::Malformed(other.to_string()),
        })?;

        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => return Err(AddressError::MissingHost),
        };

        let port = url.port_or_known_default().ok_or(AddressError::MissingPort)?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
        })
    }
}
