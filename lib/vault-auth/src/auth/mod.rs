mod aws;
mod azure;
mod cert;
mod common;
mod gcp;
mod generic;
mod jwt;
mod kerberos;
mod oci;
mod oidc;
mod params;
mod radius;
mod userpass;

pub use aws::AwsLogin;
pub use azure::AzureLogin;
pub use cert::{CertLogin, TlsSettings};
pub use gcp::GcpLogin;
pub use generic::GenericLogin;
pub use jwt::JwtLogin;
pub use kerberos::KerberosLogin;
pub use oci::OciLogin;
pub use oidc::{OidcLogin, RedirectAddress};
pub use params::{ParamStore, ParamValue};
pub use radius::RadiusLogin;
pub use userpass::UserpassLogin;

use crate::config::ConfigReader;
use crate::consts::*;
use crate::AuthError;
use std::collections::HashMap;
use std::fmt;

/// Trait for login schemes
pub trait AuthLogin: Send + Sync + fmt::Debug {
    fn scheme(&self) -> Scheme;

    /// Parameters resolved by `init`
    fn params(&self) -> &ParamStore;

    /// Read the scheme block at `field` and validate it
    fn init(&mut self, reader: &dyn ConfigReader, field: &str) -> Result<(), AuthError>;

    /// API path of the login endpoint; empty when the scheme has no single path
    fn login_path(&self) -> String;

    /// Parameters submitted as the login request body
    fn auth_params(&self) -> Result<HashMap<String, String>, AuthError>;

    fn mount(&self) -> &str {
        match self.params().get_str(FIELD_MOUNT) {
            "" => self.scheme().mount_type(),
            mount => mount,
        }
    }

    fn namespace(&self) -> Option<&str> {
        match self.params().get_str(FIELD_NAMESPACE) {
            "" => None,
            namespace => Some(namespace),
        }
    }

    /// Client TLS material the transport must present, if any
    fn tls(&self) -> Option<TlsSettings> {
        None
    }
}

/// Supported login schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    Userpass,
    Aws,
    Cert,
    Gcp,
    Kerberos,
    Radius,
    Oci,
    Oidc,
    Jwt,
    Azure,
    Generic,
}

impl Scheme {
    pub const ALL: [Scheme; 11] = [
        Scheme::Userpass,
        Scheme::Aws,
        Scheme::Cert,
        Scheme::Gcp,
        Scheme::Kerberos,
        Scheme::Radius,
        Scheme::Oci,
        Scheme::Oidc,
        Scheme::Jwt,
        Scheme::Azure,
        Scheme::Generic,
    ];

    /// Configuration field holding this scheme's block
    pub fn field(self) -> &'static str {
        match self {
            Scheme::Userpass => FIELD_AUTH_LOGIN_USERPASS,
            Scheme::Aws => FIELD_AUTH_LOGIN_AWS,
            Scheme::Cert => FIELD_AUTH_LOGIN_CERT,
            Scheme::Gcp => FIELD_AUTH_LOGIN_GCP,
            Scheme::Kerberos => FIELD_AUTH_LOGIN_KERBEROS,
            Scheme::Radius => FIELD_AUTH_LOGIN_RADIUS,
            Scheme::Oci => FIELD_AUTH_LOGIN_OCI,
            Scheme::Oidc => FIELD_AUTH_LOGIN_OIDC,
            Scheme::Jwt => FIELD_AUTH_LOGIN_JWT,
            Scheme::Azure => FIELD_AUTH_LOGIN_AZURE,
            Scheme::Generic => FIELD_AUTH_LOGIN_GENERIC,
        }
    }

    /// Default mount, also the auth method name
    pub fn mount_type(self) -> &'static str {
        match self {
            Scheme::Userpass => MOUNT_TYPE_USERPASS,
            Scheme::Aws => MOUNT_TYPE_AWS,
            Scheme::Cert => MOUNT_TYPE_CERT,
            Scheme::Gcp => MOUNT_TYPE_GCP,
            Scheme::Kerberos => MOUNT_TYPE_KERBEROS,
            Scheme::Radius => MOUNT_TYPE_RADIUS,
            Scheme::Oci => MOUNT_TYPE_OCI,
            Scheme::Oidc => MOUNT_TYPE_OIDC,
            Scheme::Jwt => MOUNT_TYPE_JWT,
            Scheme::Azure => MOUNT_TYPE_AZURE,
            Scheme::Generic => MOUNT_TYPE_GENERIC,
        }
    }

    /// Every key `auth_params` may emit for this scheme.
    ///
    /// `None` for the generic block, whose parameters are free-form.
    pub fn wire_fields(self) -> Option<&'static [&'static str]> {
        let fields = match self {
            Scheme::Userpass => userpass::WIRE_FIELDS,
            Scheme::Aws => aws::WIRE_FIELDS,
            Scheme::Cert => cert::WIRE_FIELDS,
            Scheme::Gcp => gcp::WIRE_FIELDS,
            Scheme::Kerberos => kerberos::WIRE_FIELDS,
            Scheme::Radius => radius::WIRE_FIELDS,
            Scheme::Oci => oci::WIRE_FIELDS,
            Scheme::Oidc => oidc::WIRE_FIELDS,
            Scheme::Jwt => jwt::WIRE_FIELDS,
            Scheme::Azure => azure::WIRE_FIELDS,
            Scheme::Generic => return None,
        };
        Some(fields)
    }

    /// Fresh, uninitialized login for this scheme
    pub fn login(self) -> Box<dyn AuthLogin> {
        match self {
            Scheme::Userpass => Box::new(UserpassLogin::new()),
            Scheme::Aws => Box::new(AwsLogin::new()),
            Scheme::Cert => Box::new(CertLogin::new()),
            Scheme::Gcp => Box::new(GcpLogin::new()),
            Scheme::Kerberos => Box::new(KerberosLogin::new()),
            Scheme::Radius => Box::new(RadiusLogin::new()),
            Scheme::Oci => Box::new(OciLogin::new()),
            Scheme::Oidc => Box::new(OidcLogin::new()),
            Scheme::Jwt => Box::new(JwtLogin::new()),
            Scheme::Azure => Box::new(AzureLogin::new()),
            Scheme::Generic => Box::new(GenericLogin::new()),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mount_type())
    }
}
